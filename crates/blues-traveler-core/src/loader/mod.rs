//! # Config loader
//!
//! Picks between the XDG registry and the legacy in-project files according
//! to a [`LoadStrategy`]. Data loads degrade to an empty document when
//! nothing is stored.

pub mod strategy;

use std::path::{Path, PathBuf};

pub use strategy::LoadStrategy;

use crate::app_config::AppConfig;
use crate::codec::{self, CodecError, ConfigDocument, ConfigFormat};
use crate::errors::ConfigError;
use crate::files;
use crate::paths::{PathError, Scope, ScopeRoots, app_config_path_for};
use crate::registry::{RegistryError, XdgConfig};

/// Where a loaded document came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Registry(PathBuf),
    Legacy(PathBuf),
    /// Nothing stored; the document is empty.
    Empty,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Registry(path) => write!(f, "registry ({})", path.display()),
            ConfigSource::Legacy(path) => write!(f, "legacy ({})", path.display()),
            ConfigSource::Empty => f.write_str("none"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigLoader {
    roots: ScopeRoots,
    xdg: XdgConfig,
    strategy: LoadStrategy,
    save_format: ConfigFormat,
}

impl ConfigLoader {
    pub fn new(roots: ScopeRoots, xdg: XdgConfig, strategy: LoadStrategy) -> Self {
        Self {
            roots,
            xdg,
            strategy,
            save_format: ConfigFormat::Json,
        }
    }

    /// Loader for the current directory and home, with the XDG store at its
    /// environment-resolved location.
    pub fn from_env(strategy: LoadStrategy) -> Result<Self, PathError> {
        let roots = ScopeRoots::from_env()?;
        let xdg = XdgConfig::for_home(roots.root(Scope::Global));
        Ok(Self::new(roots, xdg, strategy))
    }

    /// Format used for registry writes. Legacy writes are always JSON.
    pub fn with_save_format(mut self, format: ConfigFormat) -> Self {
        self.save_format = format;
        self
    }

    pub fn roots(&self) -> &ScopeRoots {
        &self.roots
    }

    pub fn xdg(&self) -> &XdgConfig {
        &self.xdg
    }

    pub fn strategy(&self) -> LoadStrategy {
        self.strategy
    }

    /// Load the document for `project`.
    pub fn load_project_config(&self, project: &Path) -> Result<ConfigDocument, ConfigError> {
        self.load_project_config_with_source(project)
            .map(|(document, _)| document)
    }

    pub fn load_project_config_with_source(
        &self,
        project: &Path,
    ) -> Result<(ConfigDocument, ConfigSource), ConfigError> {
        if self.strategy.reads_registry() {
            match self.xdg.project_config_info(project) {
                Ok(info) => {
                    let document = self.xdg.load_project_config(project)?;
                    let path = self.xdg.base_dir().join(info.config_file);
                    log_loaded("project", self.strategy, &path);
                    return Ok((document, ConfigSource::Registry(path)));
                }
                Err(RegistryError::NotRegistered { .. }) => {}
                Err(e) => return Err(e.into()),
            }
        }

        if self.strategy.reads_legacy() {
            let legacy = app_config_path_for(project);
            if let Some(document) = read_legacy(&legacy)? {
                log_loaded("project", self.strategy, &legacy);
                return Ok((document, ConfigSource::Legacy(legacy)));
            }
        }

        Ok((ConfigDocument::new(), ConfigSource::Empty))
    }

    /// Load the global document.
    pub fn load_global_config(&self) -> Result<ConfigDocument, ConfigError> {
        self.load_global_config_with_source()
            .map(|(document, _)| document)
    }

    pub fn load_global_config_with_source(
        &self,
    ) -> Result<(ConfigDocument, ConfigSource), ConfigError> {
        if self.strategy.reads_registry() {
            for format in [ConfigFormat::Json, ConfigFormat::Toml] {
                let path = self.xdg.global_config_path(format);
                if path.is_file() {
                    let document = self.xdg.load_global_config()?;
                    log_loaded("global", self.strategy, &path);
                    return Ok((document, ConfigSource::Registry(path)));
                }
            }
        }

        if self.strategy.reads_legacy() {
            let legacy = self.roots.app_config_path(Scope::Global);
            if let Some(document) = read_legacy(&legacy)? {
                log_loaded("global", self.strategy, &legacy);
                return Ok((document, ConfigSource::Legacy(legacy)));
            }
        }

        Ok((ConfigDocument::new(), ConfigSource::Empty))
    }

    /// Save the document for `project`. Returns the file written.
    pub fn save_project_config(
        &self,
        project: &Path,
        document: &ConfigDocument,
    ) -> Result<PathBuf, ConfigError> {
        match self.strategy {
            LoadStrategy::LegacyOnly => write_legacy(&app_config_path_for(project), document),
            LoadStrategy::XdgFirst | LoadStrategy::XdgOnly => Ok(self
                .xdg
                .save_project_config(project, document, self.save_format)?),
        }
    }

    /// Save the global document. Returns the file written.
    pub fn save_global_config(&self, document: &ConfigDocument) -> Result<PathBuf, ConfigError> {
        match self.strategy {
            LoadStrategy::LegacyOnly => {
                write_legacy(&self.roots.app_config_path(Scope::Global), document)
            }
            LoadStrategy::XdgFirst | LoadStrategy::XdgOnly => {
                Ok(self.xdg.save_global_config(document, self.save_format)?)
            }
        }
    }

    /// Typed view of the project's document.
    pub fn load_app_config(&self, project: &Path) -> Result<AppConfig, ConfigError> {
        AppConfig::from_document(self.load_project_config(project)?)
    }

    /// Typed view of the global document.
    pub fn load_global_app_config(&self) -> Result<AppConfig, ConfigError> {
        AppConfig::from_document(self.load_global_config()?)
    }
}

fn log_loaded(scope: &str, strategy: LoadStrategy, path: &Path) {
    tracing::info!(
        event = "core.loader.config_loaded",
        scope = scope,
        strategy = %strategy,
        path = %path.display()
    );
}

fn read_legacy(path: &Path) -> Result<Option<ConfigDocument>, ConfigError> {
    match codec::read_document_as(path, ConfigFormat::Json) {
        Ok(document) => Ok(Some(document)),
        Err(CodecError::Read { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
            Ok(None)
        }
        Err(CodecError::Read { path, source }) => Err(ConfigError::ReadFailed { path, source }),
        Err(e) => Err(ConfigError::ParseFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        }),
    }
}

fn write_legacy(path: &Path, document: &ConfigDocument) -> Result<PathBuf, ConfigError> {
    let json = codec::serialize(document, ConfigFormat::Json).map_err(|e| {
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

    tracing::info!(event = "core.loader.legacy_saved", path = %path.display());
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    struct Setup {
        _temp: TempDir,
        project: PathBuf,
        home: PathBuf,
        xdg: XdgConfig,
    }

    fn setup() -> Setup {
        let temp = TempDir::new().unwrap();
        let base = temp.path().canonicalize().unwrap();
        let project = base.join("project");
        let home = base.join("home");
        std::fs::create_dir_all(&project).unwrap();
        std::fs::create_dir_all(&home).unwrap();
        Setup {
            _temp: temp,
            xdg: XdgConfig::new(base.join("xdg")),
            project,
            home,
        }
    }

    fn loader(s: &Setup, strategy: LoadStrategy) -> ConfigLoader {
        ConfigLoader::new(
            ScopeRoots::new(&s.project, &s.home),
            s.xdg.clone(),
            strategy,
        )
    }

    fn doc(value: serde_json::Value) -> ConfigDocument {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn write_legacy_file(root: &Path, value: serde_json::Value) {
        let path = app_config_path_for(root);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, value.to_string()).unwrap();
    }

    #[test]
    fn test_nothing_stored_is_empty_for_every_strategy() {
        let s = setup();
        for strategy in LoadStrategy::ALL {
            let (document, source) = loader(&s, strategy)
                .load_project_config_with_source(&s.project)
                .unwrap();
            assert!(document.is_empty());
            assert_eq!(source, ConfigSource::Empty);
            assert!(loader(&s, strategy).load_global_config().unwrap().is_empty());
        }
    }

    #[test]
    fn test_project_strategy_matrix() {
        let s = setup();
        write_legacy_file(&s.project, json!({"from": "legacy"}));

        // Unregistered: only strategies that read legacy see it.
        assert_eq!(
            loader(&s, LoadStrategy::XdgFirst)
                .load_project_config(&s.project)
                .unwrap()["from"],
            json!("legacy")
        );
        assert!(loader(&s, LoadStrategy::XdgOnly)
            .load_project_config(&s.project)
            .unwrap()
            .is_empty());

        s.xdg
            .save_project_config(&s.project, &doc(json!({"from": "xdg"})), ConfigFormat::Json)
            .unwrap();

        assert_eq!(
            loader(&s, LoadStrategy::XdgFirst)
                .load_project_config(&s.project)
                .unwrap()["from"],
            json!("xdg")
        );
        assert_eq!(
            loader(&s, LoadStrategy::XdgOnly)
                .load_project_config(&s.project)
                .unwrap()["from"],
            json!("xdg")
        );
        assert_eq!(
            loader(&s, LoadStrategy::LegacyOnly)
                .load_project_config(&s.project)
                .unwrap()["from"],
            json!("legacy")
        );
    }

    #[test]
    fn test_global_strategy_matrix() {
        let s = setup();
        write_legacy_file(&s.home, json!({"from": "legacy"}));

        let (document, source) = loader(&s, LoadStrategy::XdgFirst)
            .load_global_config_with_source()
            .unwrap();
        assert_eq!(document["from"], json!("legacy"));
        assert!(matches!(source, ConfigSource::Legacy(_)));

        s.xdg
            .save_global_config(&doc(json!({"from": "xdg"})), ConfigFormat::Toml)
            .unwrap();
        let (document, source) = loader(&s, LoadStrategy::XdgFirst)
            .load_global_config_with_source()
            .unwrap();
        assert_eq!(document["from"], json!("xdg"));
        assert!(matches!(source, ConfigSource::Registry(_)));

        assert_eq!(
            loader(&s, LoadStrategy::LegacyOnly)
                .load_global_config()
                .unwrap()["from"],
            json!("legacy")
        );
    }

    #[test]
    fn test_legacy_only_saves_legacy_file() {
        let s = setup();
        let written = loader(&s, LoadStrategy::LegacyOnly)
            .save_project_config(&s.project, &doc(json!({"blockedUrls": []})))
            .unwrap();

        assert_eq!(written, app_config_path_for(&s.project));
        assert!(!s.xdg.is_registered(&s.project).unwrap());
    }

    #[test]
    fn test_xdg_save_registers_project() {
        let s = setup();
        let written = loader(&s, LoadStrategy::XdgFirst)
            .with_save_format(ConfigFormat::Toml)
            .save_project_config(&s.project, &doc(json!({"a": 1})))
            .unwrap();

        assert!(written.starts_with(s.xdg.projects_dir()));
        assert_eq!(written.extension().unwrap(), "toml");
        assert!(s.xdg.is_registered(&s.project).unwrap());
    }

    #[test]
    fn test_typed_app_config() {
        let s = setup();
        write_legacy_file(
            &s.project,
            json!({
                "logRotation": {"maxAge": 30, "compress": true},
                "blockedUrls": [{"prefix": "https://internal", "suggestion": "use the mirror"}],
                "extra": {"kept": true}
            }),
        );

        let config = loader(&s, LoadStrategy::XdgFirst)
            .load_app_config(&s.project)
            .unwrap();
        assert_eq!(config.log_rotation.unwrap().max_age, Some(30));
        assert_eq!(config.blocked_urls.len(), 1);
        assert_eq!(config.other["extra"], json!({"kept": true}));
    }

    #[test]
    fn test_malformed_legacy_is_parse_error() {
        let s = setup();
        let path = app_config_path_for(&s.project);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ nope").unwrap();

        let err = loader(&s, LoadStrategy::XdgFirst)
            .load_project_config(&s.project)
            .unwrap_err();
        assert!(matches!(err, ConfigError::ParseFailed { .. }));
    }
}
