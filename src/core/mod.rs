pub mod generator;
pub mod parser;
pub mod prompt;
pub mod registry;
pub mod service;
pub mod session;

pub use crate::domain::model::{
    CategoryAttributes, CategorySummary, GenerationRequest, GenerationResult,
};
pub use crate::domain::ports::{ChatMessage, ChatPayload, ChatRole, ChatTransport, ConfigProvider};
pub use crate::utils::error::Result;
