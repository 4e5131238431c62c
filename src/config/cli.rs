use crate::config::ServiceConfig;
use crate::core::parser::OverflowPolicy;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "birthday-mms")]
#[command(about = "Generate personalized birthday MMS messages per age group")]
pub struct Cli {
    /// TOML file replacing the built-in age groups
    #[arg(long, global = true)]
    pub registry: Option<PathBuf>,

    /// Model identifier (overrides BIRTHDAY_MODEL)
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Endpoint base URL (overrides OPENAI_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds (overrides BIRTHDAY_TIMEOUT_SECONDS)
    #[arg(long, global = true)]
    pub timeout_seconds: Option<u64>,

    /// How to handle replies with more than four sections
    #[arg(long, global = true, default_value = "truncate")]
    pub overflow: OverflowPolicy,

    #[arg(long, short, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the available age groups
    List,
    /// Show the attributes of one age group
    Show { id: String },
    /// Generate a birthday message for an age group
    Generate {
        id: String,

        /// Print the whole result as JSON
        #[arg(long, conflicts_with = "part")]
        json: bool,

        /// Print only one section of the message
        #[arg(long, value_enum, default_value_t = MessagePart::Full)]
        part: MessagePart,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MessagePart {
    Full,
    Title,
    Body,
    Value,
    Closing,
}

impl Cli {
    /// Applies command-line overrides on top of the environment settings.
    pub fn apply_overrides(&self, mut config: ServiceConfig) -> ServiceConfig {
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            config.timeout_seconds = timeout;
        }
        config.overflow = self.overflow;
        config
    }
}
