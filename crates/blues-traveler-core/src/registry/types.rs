use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::RegistryError;
use crate::codec::ConfigFormat;

/// Schema version written into new registries.
pub const REGISTRY_VERSION: &str = "1.0";

fn default_version() -> String {
    REGISTRY_VERSION.to_string()
}

/// Index of registered projects, keyed by absolute project path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRegistry {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub projects: BTreeMap<String, ProjectConfig>,
}

impl Default for ProjectRegistry {
    fn default() -> Self {
        Self {
            version: default_version(),
            projects: BTreeMap::new(),
        }
    }
}

/// Registry metadata for one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    /// Path of the project's document, relative to the registry base directory.
    pub config_file: String,
    pub last_modified: DateTime<Utc>,
    /// Kept as free text so an unrecognized value surfaces as an error at load
    /// time rather than making the whole registry unreadable.
    pub config_format: String,
}

impl ProjectConfig {
    /// The document format, restricted to the formats the registry writes.
    pub fn format(&self) -> Result<ConfigFormat, RegistryError> {
        parse_registry_format(&self.config_format)
    }
}

/// Parse a registry format name. Only JSON and TOML are accepted.
pub fn parse_registry_format(format: &str) -> Result<ConfigFormat, RegistryError> {
    match format.parse::<ConfigFormat>() {
        Ok(format @ (ConfigFormat::Json | ConfigFormat::Toml)) => Ok(format),
        _ => Err(RegistryError::UnsupportedFormat {
            format: format.to_string(),
        }),
    }
}

/// Require a format the registry can write.
pub fn ensure_registry_format(format: ConfigFormat) -> Result<ConfigFormat, RegistryError> {
    parse_registry_format(format.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_wire_format() {
        let raw = r#"{
  "version": "1.0",
  "projects": {
    "/work/app": {
      "configFile": "projects/work-app.toml",
      "lastModified": "2025-03-01T12:00:00Z",
      "configFormat": "toml"
    }
  }
}"#;
        let registry: ProjectRegistry = serde_json::from_str(raw).unwrap();
        let entry = &registry.projects["/work/app"];
        assert_eq!(entry.config_file, "projects/work-app.toml");
        assert_eq!(entry.format().unwrap(), ConfigFormat::Toml);

        let out = serde_json::to_value(&registry).unwrap();
        assert_eq!(
            out["projects"]["/work/app"]["configFormat"],
            serde_json::json!("toml")
        );
    }

    #[test]
    fn test_missing_fields_default() {
        let registry: ProjectRegistry = serde_json::from_str("{}").unwrap();
        assert_eq!(registry, ProjectRegistry::default());
        assert_eq!(registry.version, REGISTRY_VERSION);
    }

    #[test]
    fn test_unrecognized_format_is_error() {
        let entry = ProjectConfig {
            config_file: "projects/x.ini".to_string(),
            last_modified: Utc::now(),
            config_format: "ini".to_string(),
        };
        assert!(matches!(
            entry.format(),
            Err(RegistryError::UnsupportedFormat { .. })
        ));
        assert!(parse_registry_format("yaml").is_err());
        assert!(ensure_registry_format(ConfigFormat::Yaml).is_err());
    }
}
