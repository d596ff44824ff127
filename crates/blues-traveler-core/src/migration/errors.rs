use crate::errors::TravelerError;
use crate::registry::RegistryError;

#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Failed to read legacy config '{path}': {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Legacy config '{path}' is not valid: {message}")]
    ParseFailed { path: String, message: String },

    #[error("Failed to back up '{path}': {source}")]
    BackupFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Registry error: {source}")]
    Registry {
        #[from]
        source: RegistryError,
    },
}

impl TravelerError for MigrationError {
    fn error_code(&self) -> &'static str {
        match self {
            MigrationError::ReadFailed { .. } => "MIGRATION_READ_FAILED",
            MigrationError::ParseFailed { .. } => "MIGRATION_PARSE_FAILED",
            MigrationError::BackupFailed { .. } => "MIGRATION_BACKUP_FAILED",
            MigrationError::Registry { .. } => "MIGRATION_REGISTRY_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, MigrationError::ParseFailed { .. })
    }
}
