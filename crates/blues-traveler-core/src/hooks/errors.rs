use crate::errors::TravelerError;

#[derive(Debug, thiserror::Error)]
pub enum HooksConfigError {
    #[error("Failed to read hooks config '{path}': {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse hooks config '{path}': {message}")]
    ParseFailed { path: String, message: String },

    #[error("Invalid hooks config: group '{group}' event '{event}' job #{index}: {message}")]
    InvalidJob {
        group: String,
        event: String,
        index: usize,
        message: String,
    },

    #[error("Invalid hooks config: group '{group}' defines event '{event}' with no body")]
    NullEvent { group: String, event: String },

    #[error("Failed to load app config: {source}")]
    AppConfig {
        #[from]
        source: crate::errors::ConfigError,
    },
}

impl TravelerError for HooksConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            HooksConfigError::ReadFailed { .. } => "HOOKS_CONFIG_READ_FAILED",
            HooksConfigError::ParseFailed { .. } => "HOOKS_CONFIG_PARSE_FAILED",
            HooksConfigError::InvalidJob { .. } => "HOOKS_CONFIG_INVALID_JOB",
            HooksConfigError::NullEvent { .. } => "HOOKS_CONFIG_NULL_EVENT",
            HooksConfigError::AppConfig { .. } => "HOOKS_CONFIG_APP_CONFIG_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            HooksConfigError::ParseFailed { .. }
                | HooksConfigError::InvalidJob { .. }
                | HooksConfigError::NullEvent { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_job_display() {
        let error = HooksConfigError::InvalidJob {
            group: "python".to_string(),
            event: "PostToolUse".to_string(),
            index: 2,
            message: "job name is blank".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid hooks config: group 'python' event 'PostToolUse' job #2: job name is blank"
        );
        assert_eq!(error.error_code(), "HOOKS_CONFIG_INVALID_JOB");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_null_event_display() {
        let error = HooksConfigError::NullEvent {
            group: "go".to_string(),
            event: "Stop".to_string(),
        };
        assert!(error.to_string().contains("'go'"));
        assert_eq!(error.error_code(), "HOOKS_CONFIG_NULL_EVENT");
    }
}
