//! Plugin enable/disable resolution across project and global settings.
//!
//! Resolution order:
//! 1. An explicit `enabled` in project settings
//! 2. An explicit `enabled` in global settings
//! 3. Enabled
//!
//! A missing settings file behaves exactly like a missing plugin key.

use super::errors::SettingsError;
use super::persistence::load_scope_settings;
use super::types::{PluginConfig, Settings};
use crate::paths::{Scope, ScopeRoots};

/// The explicit state recorded for `key` in one settings document, if any.
pub fn explicit_plugin_state(settings: &Settings, key: &str) -> Option<bool> {
    settings.plugins.get(key).and_then(|plugin| plugin.enabled)
}

/// Resolve the effective state of `key` from already-loaded settings.
pub fn resolve_plugin_enabled(
    project: Option<&Settings>,
    global: Option<&Settings>,
    key: &str,
) -> bool {
    project
        .and_then(|settings| explicit_plugin_state(settings, key))
        .or_else(|| global.and_then(|settings| explicit_plugin_state(settings, key)))
        .unwrap_or(true)
}

/// Settings document an effective plugin state came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginSource {
    Project,
    Global,
    Default,
}

impl PluginSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            PluginSource::Project => "project",
            PluginSource::Global => "global",
            PluginSource::Default => "default",
        }
    }
}

impl std::fmt::Display for PluginSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve the effective state of `key` and where it came from.
///
/// Global settings are only read when the project has no explicit value.
///
/// # Errors
///
/// Fails if a settings file that has to be consulted cannot be read or parsed.
pub fn plugin_state(roots: &ScopeRoots, key: &str) -> Result<(bool, PluginSource), SettingsError> {
    let project = load_scope_settings(roots, Scope::Project)?;
    let (enabled, source) = match explicit_plugin_state(&project, key) {
        Some(enabled) => (enabled, PluginSource::Project),
        None => {
            let global = load_scope_settings(roots, Scope::Global)?;
            match explicit_plugin_state(&global, key) {
                Some(enabled) => (enabled, PluginSource::Global),
                None => (true, PluginSource::Default),
            }
        }
    };

    tracing::info!(
        event = "core.plugins.resolved",
        plugin = key,
        enabled = enabled,
        source = source.as_str()
    );
    Ok((enabled, source))
}

/// Resolve the effective state of `key` by reading the settings files.
pub fn is_plugin_enabled(roots: &ScopeRoots, key: &str) -> Result<bool, SettingsError> {
    plugin_state(roots, key).map(|(enabled, _)| enabled)
}

/// Record an explicit state for `key`, or clear it with `None`.
///
/// Clearing removes the plugin entry entirely. Returns whether the document changed.
pub fn set_plugin_enabled(settings: &mut Settings, key: &str, enabled: Option<bool>) -> bool {
    match enabled {
        Some(value) => {
            let previous = settings
                .plugins
                .insert(key.to_string(), PluginConfig { enabled: Some(value) });
            previous.is_none_or(|p| p.enabled != Some(value))
        }
        None => settings.plugins.remove(key).is_some(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn settings_with(state: Option<bool>) -> Settings {
        let mut settings = Settings::default();
        if state.is_some() {
            set_plugin_enabled(&mut settings, "security", state);
        }
        settings
    }

    #[test]
    fn test_precedence_table() {
        let states = [Some(true), Some(false), None];

        for project in states {
            for global in states {
                let expected = project.or(global).unwrap_or(true);
                let p = settings_with(project);
                let g = settings_with(global);
                assert_eq!(
                    resolve_plugin_enabled(Some(&p), Some(&g), "security"),
                    expected,
                    "project={project:?} global={global:?}"
                );
            }
        }
    }

    #[test]
    fn test_precedence_examples() {
        let disabled = settings_with(Some(false));
        let enabled = settings_with(Some(true));
        let unset = settings_with(None);

        assert!(!resolve_plugin_enabled(Some(&disabled), Some(&enabled), "security"));
        assert!(resolve_plugin_enabled(Some(&enabled), Some(&disabled), "security"));
        assert!(!resolve_plugin_enabled(Some(&unset), Some(&disabled), "security"));
        assert!(resolve_plugin_enabled(Some(&unset), Some(&unset), "security"));
        assert!(resolve_plugin_enabled(None, None, "security"));
    }

    #[test]
    fn test_entry_without_enabled_inherits() {
        let mut project = Settings::default();
        project
            .plugins
            .insert("security".to_string(), PluginConfig { enabled: None });
        let global = settings_with(Some(false));

        assert!(!resolve_plugin_enabled(Some(&project), Some(&global), "security"));
    }

    #[test]
    fn test_is_plugin_enabled_reads_files() {
        let temp = TempDir::new().unwrap();
        let roots = ScopeRoots::new(temp.path().join("project"), temp.path().join("home"));

        // No settings files at all: default on.
        assert!(is_plugin_enabled(&roots, "security").unwrap());

        let global_path = roots.settings_path(Scope::Global);
        std::fs::create_dir_all(global_path.parent().unwrap()).unwrap();
        std::fs::write(&global_path, r#"{"plugins": {"security": {"enabled": false}}}"#).unwrap();
        assert!(!is_plugin_enabled(&roots, "security").unwrap());

        let project_path = roots.settings_path(Scope::Project);
        std::fs::create_dir_all(project_path.parent().unwrap()).unwrap();
        std::fs::write(&project_path, r#"{"plugins": {"security": {"enabled": true}}}"#).unwrap();
        assert!(is_plugin_enabled(&roots, "security").unwrap());
    }

    #[test]
    fn test_set_plugin_enabled_reports_change() {
        let mut settings = Settings::default();
        assert!(set_plugin_enabled(&mut settings, "fmt", Some(false)));
        assert!(!set_plugin_enabled(&mut settings, "fmt", Some(false)));
        assert!(set_plugin_enabled(&mut settings, "fmt", Some(true)));
        assert!(set_plugin_enabled(&mut settings, "fmt", None));
        assert!(!set_plugin_enabled(&mut settings, "fmt", None));
        assert!(settings.plugins.is_empty());
    }

    #[test]
    fn test_project_value_skips_unreadable_global() {
        let temp = TempDir::new().unwrap();
        let roots = ScopeRoots::new(temp.path().join("project"), temp.path().join("home"));

        let global_path = roots.settings_path(Scope::Global);
        std::fs::create_dir_all(global_path.parent().unwrap()).unwrap();
        std::fs::write(&global_path, "{ not json").unwrap();

        // Without a project value the broken global file has to be read.
        assert!(plugin_state(&roots, "security").is_err());

        let project_path = roots.settings_path(Scope::Project);
        std::fs::create_dir_all(project_path.parent().unwrap()).unwrap();
        std::fs::write(&project_path, r#"{"plugins": {"security": {"enabled": false}}}"#).unwrap();

        assert_eq!(
            plugin_state(&roots, "security").unwrap(),
            (false, PluginSource::Project)
        );
    }

    #[test]
    fn test_plugin_state_reports_source() {
        let temp = TempDir::new().unwrap();
        let roots = ScopeRoots::new(temp.path().join("project"), temp.path().join("home"));
        assert_eq!(
            plugin_state(&roots, "fmt").unwrap(),
            (true, PluginSource::Default)
        );

        let global_path = roots.settings_path(Scope::Global);
        std::fs::create_dir_all(global_path.parent().unwrap()).unwrap();
        std::fs::write(&global_path, r#"{"plugins": {"fmt": {"enabled": false}}}"#).unwrap();
        assert_eq!(
            plugin_state(&roots, "fmt").unwrap(),
            (false, PluginSource::Global)
        );
    }
}
