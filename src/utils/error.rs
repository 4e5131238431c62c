use thiserror::Error;

/// Failure of a single round trip to the text-generation endpoint.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Transport error: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Request timed out after {seconds}s")]
    TimeoutError { seconds: u64 },

    #[error("Authentication rejected by endpoint (HTTP {status})")]
    AuthenticationError { status: u16 },

    #[error("Endpoint returned HTTP {status}: {body}")]
    StatusError { status: u16, body: String },

    #[error("Malformed response: {message}")]
    MalformedResponseError { message: String },

    #[error("Endpoint returned an empty message")]
    EmptyResponseError,

    #[error("Generation cancelled")]
    CancelledError,
}

#[derive(Error, Debug)]
pub enum BirthdayError {
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown category: {id}")]
    NotFoundError { id: String },

    #[error("No category selected")]
    NoSelectionError,

    #[error("Message generation failed: {0}")]
    GenerationError(#[from] GenerationError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Generation,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BirthdayError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::NotFoundError { .. } | Self::NoSelectionError => ErrorCategory::Input,
            Self::GenerationError(_) => ErrorCategory::Generation,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::GenerationError(GenerationError::CancelledError) => ErrorSeverity::Low,
            Self::NotFoundError { .. } | Self::NoSelectionError => ErrorSeverity::Medium,
            Self::GenerationError(_) => ErrorSeverity::High,
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::IoError(_)
            | Self::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    /// True for every failure of the remote call itself.
    pub fn is_generation_failure(&self) -> bool {
        matches!(self, Self::GenerationError(_))
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::MissingConfigError { field } => {
                format!("Required setting '{}' is not configured", field)
            }
            Self::NotFoundError { id } => format!("'{}' is not a known age group", id),
            Self::NoSelectionError => "Select an age group before generating".to_string(),
            Self::GenerationError(GenerationError::AuthenticationError { .. }) => {
                "The model endpoint rejected the API key".to_string()
            }
            Self::GenerationError(GenerationError::TimeoutError { seconds }) => {
                format!("The model did not answer within {} seconds", seconds)
            }
            Self::GenerationError(GenerationError::CancelledError) => {
                "Message generation was cancelled".to_string()
            }
            Self::GenerationError(_) => "The birthday message could not be generated".to_string(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::MissingConfigError { .. } => {
                "Set OPENAI_API_KEY in the environment or in a .env file"
            }
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Check the environment variables and the registry file"
            }
            Self::NotFoundError { .. } => "Run the `list` command to see valid age group ids",
            Self::NoSelectionError => "Select an age group first",
            Self::GenerationError(GenerationError::AuthenticationError { .. }) => {
                "Verify that OPENAI_API_KEY is valid for the configured base URL"
            }
            Self::GenerationError(GenerationError::TimeoutError { .. }) => {
                "Retry, or raise BIRTHDAY_TIMEOUT_SECONDS"
            }
            Self::GenerationError(_) => "Retry the generation; the request is not retried automatically",
            Self::IoError(_) | Self::SerializationError(_) => "Check file permissions and contents",
        }
    }
}

pub type Result<T> = std::result::Result<T, BirthdayError>;
