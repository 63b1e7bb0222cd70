use thiserror::Error;

#[derive(Error, Debug)]
pub enum MorningError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Email could not be built: {0}")]
    EmailBuildError(#[from] lettre::error::Error),

    #[error("SMTP delivery failed: {0}")]
    SmtpError(#[from] lettre::transport::smtp::Error),

    #[error("Invalid email address: {0}")]
    AddressError(#[from] lettre::address::AddressError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Malformed image URL '{url}': {reason}")]
    MalformedImageUrl { url: String, reason: String },

    #[error("Dog API error: {message}")]
    DogApiError { message: String },

    #[error("Text generation failed: {message}")]
    GenerationError { message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    DataFormat,
    Generation,
    Delivery,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl MorningError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError(_) | Self::DogApiError { .. } => ErrorCategory::Network,
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigValidationError { .. }
            | Self::AddressError(_) => ErrorCategory::Configuration,
            Self::SerializationError(_)
            | Self::MalformedImageUrl { .. }
            | Self::ProcessingError { .. }
            | Self::ValidationError { .. } => ErrorCategory::DataFormat,
            Self::GenerationError { .. } => ErrorCategory::Generation,
            Self::EmailBuildError(_) | Self::SmtpError(_) => ErrorCategory::Delivery,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // A rerun may well succeed for remote failures.
            Self::ApiError(_)
            | Self::DogApiError { .. }
            | Self::GenerationError { .. }
            | Self::SmtpError(_) => ErrorSeverity::Medium,
            Self::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => {
                "Check network connectivity and that the Dog API endpoint is reachable, then rerun"
            }
            ErrorCategory::Configuration => {
                "Review the TOML config, .env file and CLI flags; credentials may be missing"
            }
            ErrorCategory::DataFormat => {
                "The remote service returned an unexpected shape; check the endpoint configuration"
            }
            ErrorCategory::Generation => {
                "Verify the Gemini API key and model name, or adjust the prompt template"
            }
            ErrorCategory::Delivery => {
                "Verify SMTP host, port, security mode and app password for the sender account"
            }
            ErrorCategory::System => {
                "Check that the config file and output directory exist and are accessible"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::MissingConfigError { field } => {
                format!("Configuration value '{}' is required but was not set", field)
            }
            Self::MalformedImageUrl { url, .. } => {
                format!("Could not work out the dog breed from '{}'", url)
            }
            Self::GenerationError { message } => {
                format!("The language model did not produce a message: {}", message)
            }
            Self::SmtpError(_) | Self::EmailBuildError(_) => {
                format!("The email could not be sent: {}", self)
            }
            _ => self.to_string(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, MorningError>;
