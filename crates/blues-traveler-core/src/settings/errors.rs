use crate::errors::TravelerError;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error(
        "Unknown hook event '{event}'. Valid events: PreToolUse, PostToolUse, UserPromptSubmit, \
         Notification, Stop, SubagentStop, PreCompact, SessionStart, SessionEnd"
    )]
    UnknownEvent { event: String },

    #[error("Invalid hook type '{hook_type}': {reason}")]
    InvalidHookType {
        hook_type: String,
        reason: &'static str,
    },

    #[error("Failed to read settings file '{path}': {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings file '{path}': {message}")]
    ParseFailed { path: String, message: String },

    #[error("Failed to write settings file '{path}': {message}")]
    WriteFailed { path: String, message: String },
}

impl TravelerError for SettingsError {
    fn error_code(&self) -> &'static str {
        match self {
            SettingsError::UnknownEvent { .. } => "SETTINGS_UNKNOWN_EVENT",
            SettingsError::InvalidHookType { .. } => "SETTINGS_INVALID_HOOK_TYPE",
            SettingsError::ReadFailed { .. } => "SETTINGS_READ_FAILED",
            SettingsError::ParseFailed { .. } => "SETTINGS_PARSE_FAILED",
            SettingsError::WriteFailed { .. } => "SETTINGS_WRITE_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            SettingsError::UnknownEvent { .. }
                | SettingsError::InvalidHookType { .. }
                | SettingsError::ParseFailed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_event_lists_valid_events() {
        let error = SettingsError::UnknownEvent {
            event: "OnSave".to_string(),
        };
        assert!(error.to_string().starts_with("Unknown hook event 'OnSave'"));
        assert!(error.to_string().contains("SessionEnd"));
        assert_eq!(error.error_code(), "SETTINGS_UNKNOWN_EVENT");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_write_failed_is_not_user_error() {
        let error = SettingsError::WriteFailed {
            path: "/x/settings.json".to_string(),
            message: "read-only file system".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to write settings file '/x/settings.json': read-only file system"
        );
        assert!(!error.is_user_error());
    }
}
