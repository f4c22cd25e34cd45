use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Unknown region: {slug}")]
    UnknownRegion { slug: String },

    #[error("Consultation submission failed: {message}")]
    SubmissionFailed { message: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Validation,
    Storage,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SiteError {
    pub fn validation(message: impl Into<String>) -> Self {
        SiteError::ValidationError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            SiteError::ApiError(_) | SiteError::SubmissionFailed { .. } => ErrorCategory::Network,
            SiteError::TomlError(_)
            | SiteError::ConfigError { .. }
            | SiteError::MissingConfigError { .. }
            | SiteError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            SiteError::ValidationError { .. } | SiteError::UnknownRegion { .. } => {
                ErrorCategory::Validation
            }
            SiteError::IoError(_) | SiteError::StorageError { .. } => ErrorCategory::Storage,
            SiteError::CsvError(_) | SiteError::SerializationError(_) => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SiteError::ApiError(_) | SiteError::SubmissionFailed { .. } => {
                "The consultation service could not be reached".to_string()
            }
            SiteError::UnknownRegion { slug } => format!("'{}' is not a known region", slug),
            SiteError::ValidationError { message } => format!("Please check the form: {}", message),
            SiteError::MissingConfigError { field } => {
                format!("Configuration is missing '{}'", field)
            }
            SiteError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check the submission endpoint and network, or call the office directly",
            ErrorCategory::Configuration => "Review the site TOML configuration file",
            ErrorCategory::Validation => "Fix the reported fields and try again",
            ErrorCategory::Storage => "Check that the output path exists and is writable",
            ErrorCategory::Data => "Check that the input file is well-formed",
        }
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;
