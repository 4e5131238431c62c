pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::Cli;

pub use adapters::http::OpenAiChatTransport;
pub use config::ServiceConfig;
pub use core::{
    generator::MessageGenerator, parser::OverflowPolicy, registry::CategoryRegistry,
    service::BirthdayService, session::AppState,
};
pub use domain::model::{CategoryAttributes, CategorySummary, GenerationRequest, GenerationResult};
pub use utils::error::{BirthdayError, GenerationError, Result};
