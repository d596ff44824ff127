use crate::codec::CodecError;
use crate::errors::TravelerError;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Project '{path}' is not registered")]
    NotRegistered { path: String },

    #[error("Unsupported config format '{format}' (expected json or toml)")]
    UnsupportedFormat { format: String },

    #[error("Cannot resolve project path '{path}': {source}")]
    InvalidProjectPath {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read '{path}': {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Registry file '{path}' is corrupted: {message}")]
    RegistryCorrupted { path: String, message: String },

    #[error("Failed to write '{path}': {message}")]
    WriteFailed { path: String, message: String },

    #[error("Config document error: {source}")]
    Codec {
        #[from]
        source: CodecError,
    },
}

impl TravelerError for RegistryError {
    fn error_code(&self) -> &'static str {
        match self {
            RegistryError::NotRegistered { .. } => "REGISTRY_NOT_REGISTERED",
            RegistryError::UnsupportedFormat { .. } => "REGISTRY_UNSUPPORTED_FORMAT",
            RegistryError::InvalidProjectPath { .. } => "REGISTRY_INVALID_PROJECT_PATH",
            RegistryError::ReadFailed { .. } => "REGISTRY_READ_FAILED",
            RegistryError::RegistryCorrupted { .. } => "REGISTRY_CORRUPTED",
            RegistryError::WriteFailed { .. } => "REGISTRY_WRITE_FAILED",
            RegistryError::Codec { .. } => "REGISTRY_CODEC_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        // Exhaustive match ensures new variants force an explicit classification.
        match self {
            RegistryError::NotRegistered { .. }
            | RegistryError::UnsupportedFormat { .. }
            | RegistryError::InvalidProjectPath { .. } => true,

            RegistryError::ReadFailed { .. }
            | RegistryError::RegistryCorrupted { .. }
            | RegistryError::WriteFailed { .. }
            | RegistryError::Codec { .. } => false,
        }
    }
}
