//! The app config document (`blues-traveler-config.json`).
//!
//! This is the flat JSON file the tool has always kept next to the hooks
//! directory. It may embed a `customHooks` section which, when non-empty,
//! preempts file-based hooks discovery entirely.
//!
//! ```json
//! {
//!   "logRotation": { "maxAge": 30, "maxSize": 10, "maxBackups": 3, "compress": true },
//!   "customHooks": { "python": { "PostToolUse": { "jobs": [] } } },
//!   "blockedUrls": [ { "prefix": "https://internal", "suggestion": "use the mirror" } ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::codec::{self, ConfigDocument, ConfigFormat};
use crate::errors::ConfigError;
use crate::files;
use crate::hooks::types::{CustomHooksConfig, is_empty_config};

/// Typed view of the app config. Unknown fields are kept in `other`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_rotation: Option<LogRotationConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_hooks: Option<CustomHooksConfig>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blocked_urls: Vec<BlockedUrl>,

    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRotationConfig {
    /// Days to keep rotated files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age: Option<u32>,
    /// Megabytes before rotation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_backups: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compress: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedUrl {
    pub prefix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl AppConfig {
    /// Build a typed view from a generic document.
    pub fn from_document(doc: ConfigDocument) -> Result<Self, ConfigError> {
        codec::decode_typed(Value::Object(doc)).map_err(|e| ConfigError::InvalidShape {
            message: e.to_string(),
        })
    }

    /// Convert back into a generic document.
    pub fn to_document(&self) -> Result<ConfigDocument, ConfigError> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(ConfigError::InvalidShape {
                message: "app config did not serialize to a mapping".to_string(),
            }),
            Err(e) => Err(ConfigError::InvalidShape {
                message: e.to_string(),
            }),
        }
    }

    /// The embedded hooks section, if it defines at least one job.
    pub fn embedded_custom_hooks(&self) -> Option<&CustomHooksConfig> {
        self.custom_hooks
            .as_ref()
            .filter(|hooks| !is_empty_config(hooks))
    }
}

/// Load the app config at `path`. A missing file yields the default config.
pub fn load_app_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(source) => {
            return Err(ConfigError::ReadFailed {
                path: path.display().to_string(),
                source,
            });
        }
    };

    let doc = codec::parse_document(&content, ConfigFormat::Json).map_err(|e| {
        ConfigError::ParseFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        }
    })?;

    AppConfig::from_document(doc).map_err(|e| ConfigError::ParseFailed {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Write the app config to `path` as pretty JSON.
pub fn save_app_config(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
    let json = codec::serialize(config, ConfigFormat::Json).map_err(|e| {
        ConfigError::WriteFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        }
    })?;

    files::atomic_write(path, json.as_bytes(), files::DEFAULT_FILE_MODE).map_err(|e| {
        ConfigError::WriteFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        }
    })?;

    tracing::info!(event = "core.app_config.saved", path = %path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_default() {
        let temp = TempDir::new().unwrap();
        let config = load_app_config(&temp.path().join("missing.json")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_preserves_unknown_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("blues-traveler-config.json");
        std::fs::write(
            &path,
            r#"{
                "logRotation": {"maxAge": 30, "compress": true},
                "blockedUrls": [{"prefix": "https://x.internal"}],
                "customField": {"nested": [1, 2]}
            }"#,
        )
        .unwrap();

        let config = load_app_config(&path).unwrap();
        assert_eq!(config.log_rotation.as_ref().unwrap().max_age, Some(30));
        assert_eq!(config.blocked_urls[0].prefix, "https://x.internal");
        assert_eq!(
            config.other["customField"],
            serde_json::json!({"nested": [1, 2]})
        );

        save_app_config(&path, &config).unwrap();
        let reloaded = load_app_config(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_embedded_hooks_requires_jobs() {
        let config: AppConfig =
            serde_json::from_str(r#"{"customHooks": {"python": {"Stop": {"jobs": []}}}}"#)
                .unwrap();
        assert!(config.embedded_custom_hooks().is_none());

        let config: AppConfig = serde_json::from_str(
            r#"{"customHooks": {"python": {"Stop": {"jobs": [{"name": "a", "run": "b"}]}}}}"#,
        )
        .unwrap();
        assert!(config.embedded_custom_hooks().is_some());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.json");
        std::fs::write(&path, "{ nope").unwrap();

        let err = load_app_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseFailed { .. }));
        assert!(err.to_string().contains("bad.json"));
    }
}
