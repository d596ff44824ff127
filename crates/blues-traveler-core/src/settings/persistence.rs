//! Settings file persistence
//!
//! Reads tolerate a missing file; writes are atomic.

use std::path::Path;

use super::errors::SettingsError;
use super::types::Settings;
use crate::files;
use crate::paths::{Scope, ScopeRoots};

/// Load settings from `path`. A missing file yields empty settings.
pub fn load_settings(path: &Path) -> Result<Settings, SettingsError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Settings::default()),
        Err(source) => {
            return Err(SettingsError::ReadFailed {
                path: path.display().to_string(),
                source,
            });
        }
    };

    if content.trim().is_empty() {
        return Ok(Settings::default());
    }

    serde_json::from_str(&content).map_err(|e| {
        tracing::error!(
            event = "core.settings.json_parse_failed",
            path = %path.display(),
            error = %e,
            "Settings file exists but contains invalid JSON"
        );
        SettingsError::ParseFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        }
    })
}

/// Write settings to `path` atomically, creating parent directories.
pub fn save_settings(path: &Path, settings: &Settings) -> Result<(), SettingsError> {
    let mut json =
        serde_json::to_string_pretty(settings).map_err(|e| SettingsError::WriteFailed {
            path: path.display().to_string(),
            message: format!("Failed to serialize settings: {}", e),
        })?;
    json.push('\n');

    files::atomic_write(path, json.as_bytes(), files::DEFAULT_FILE_MODE).map_err(|e| {
        SettingsError::WriteFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        }
    })?;

    tracing::info!(event = "core.settings.saved", path = %path.display());
    Ok(())
}

/// Load the settings file of `scope`.
pub fn load_scope_settings(roots: &ScopeRoots, scope: Scope) -> Result<Settings, SettingsError> {
    load_settings(&roots.settings_path(scope))
}

/// Save the settings file of `scope`.
pub fn save_scope_settings(
    roots: &ScopeRoots,
    scope: Scope,
    settings: &Settings,
) -> Result<(), SettingsError> {
    save_settings(&roots.settings_path(scope), settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::install::add_hook_to_settings;
    use crate::settings::types::HookEvent;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_default() {
        let temp = TempDir::new().unwrap();
        let settings = load_settings(&temp.path().join("settings.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_round_trip_preserves_unknown_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".claude").join("settings.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(
            &path,
            r#"{
  "permissions": {"allow": ["Bash(git status)"], "deny": []},
  "statusLine": {"type": "command", "command": "~/bin/status"},
  "includeCoAuthoredBy": false,
  "hooks": {},
  "defaultModel": "opus"
}"#,
        )
        .unwrap();

        let mut settings = load_settings(&path).unwrap();
        let other_before = settings.other.clone();
        add_hook_to_settings(
            &mut settings,
            HookEvent::PreToolUse,
            "*",
            "blues-traveler hooks run security",
            None,
        );
        save_settings(&path, &settings).unwrap();

        let reloaded = load_settings(&path).unwrap();
        assert_eq!(reloaded.other, other_before);
        assert_eq!(reloaded.default_model.as_deref(), Some("opus"));
        assert_eq!(reloaded.hooks.pre_tool_use.len(), 1);

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["includeCoAuthoredBy"], serde_json::json!(false));
        assert_eq!(
            raw["statusLine"]["command"],
            serde_json::json!("~/bin/status")
        );
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");
        std::fs::write(&path, "{ invalid").unwrap();

        let err = load_settings(&path).unwrap_err();
        assert!(matches!(err, SettingsError::ParseFailed { .. }));
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let temp = TempDir::new().unwrap();
        let roots = ScopeRoots::new(temp.path().join("p"), temp.path().join("h"));

        save_scope_settings(&roots, Scope::Global, &Settings::default()).unwrap();
        assert!(roots.settings_path(Scope::Global).exists());
        assert_eq!(
            load_scope_settings(&roots, Scope::Global).unwrap(),
            Settings::default()
        );
    }
}
