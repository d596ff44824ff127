use std::error::Error;

/// Base trait for all blues-traveler errors
pub trait TravelerError: Error + Send + Sync + 'static {
    /// Error code for programmatic handling
    fn error_code(&self) -> &'static str;

    /// Whether this error was caused by user input rather than the environment
    fn is_user_error(&self) -> bool {
        false
    }
}

/// Common result type for the application
pub type TravelerResult<T> = Result<T, Box<dyn TravelerError>>;

/// Errors from the app-config document and the strategy-selecting loader.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {message}")]
    ParseFailed { path: String, message: String },

    #[error("Failed to write config file '{path}': {message}")]
    WriteFailed { path: String, message: String },

    #[error("Config document does not match the expected shape: {message}")]
    InvalidShape { message: String },

    #[error("Registry operation failed: {source}")]
    Registry {
        #[from]
        source: crate::registry::RegistryError,
    },
}

impl TravelerError for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::ReadFailed { .. } => "CONFIG_READ_FAILED",
            ConfigError::ParseFailed { .. } => "CONFIG_PARSE_FAILED",
            ConfigError::WriteFailed { .. } => "CONFIG_WRITE_FAILED",
            ConfigError::InvalidShape { .. } => "CONFIG_INVALID_SHAPE",
            ConfigError::Registry { .. } => "CONFIG_REGISTRY_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            ConfigError::ParseFailed { .. } | ConfigError::InvalidShape { .. }
        )
    }
}
