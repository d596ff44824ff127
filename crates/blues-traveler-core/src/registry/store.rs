//! The XDG configuration store.
//!
//! Layout under the base directory:
//!
//! ```text
//! registry.json            project path -> ProjectConfig
//! global.json | global.toml
//! projects/<slug>.<ext>    one document per registered project
//! ```

use std::path::{Path, PathBuf};

use chrono::Utc;

use super::errors::RegistryError;
use super::sanitize::sanitize_project_path;
use super::types::{ProjectConfig, ProjectRegistry, ensure_registry_format};
use crate::codec::{self, ConfigDocument, ConfigFormat};
use crate::files;
use crate::paths::xdg_base_dir;

const REGISTRY_FILENAME: &str = "registry.json";
const PROJECTS_DIR: &str = "projects";
const GLOBAL_STEM: &str = "global";
const GLOBAL_FORMATS: [ConfigFormat; 2] = [ConfigFormat::Json, ConfigFormat::Toml];

/// Handle on an XDG store rooted at `base_dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XdgConfig {
    base_dir: PathBuf,
}

impl XdgConfig {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Store at the environment-resolved base directory for `home_dir`.
    pub fn for_home(home_dir: &Path) -> Self {
        Self::new(xdg_base_dir(home_dir))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn registry_path(&self) -> PathBuf {
        self.base_dir.join(REGISTRY_FILENAME)
    }

    pub fn projects_dir(&self) -> PathBuf {
        self.base_dir.join(PROJECTS_DIR)
    }

    pub fn global_config_path(&self, format: ConfigFormat) -> PathBuf {
        self.base_dir
            .join(format!("{}.{}", GLOBAL_STEM, format.extension()))
    }

    /// Load the registry. A missing file yields an empty registry.
    pub fn load_registry(&self) -> Result<ProjectRegistry, RegistryError> {
        let path = self.registry_path();
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(ProjectRegistry::default());
            }
            Err(source) => {
                return Err(RegistryError::ReadFailed {
                    path: path.display().to_string(),
                    source,
                });
            }
        };

        if content.trim().is_empty() {
            return Ok(ProjectRegistry::default());
        }

        serde_json::from_str(&content).map_err(|e| {
            tracing::error!(
                event = "core.registry.json_parse_failed",
                path = %path.display(),
                error = %e,
                "Registry file exists but contains invalid JSON"
            );
            RegistryError::RegistryCorrupted {
                path: path.display().to_string(),
                message: e.to_string(),
            }
        })
    }

    /// Persist the registry atomically.
    pub fn save_registry(&self, registry: &ProjectRegistry) -> Result<(), RegistryError> {
        let path = self.registry_path();
        let mut json =
            serde_json::to_string_pretty(registry).map_err(|e| RegistryError::WriteFailed {
                path: path.display().to_string(),
                message: format!("Failed to serialize registry: {}", e),
            })?;
        json.push('\n');
        self.write_file(&path, json.as_bytes())?;

        tracing::info!(
            event = "core.registry.saved",
            path = %path.display(),
            count = registry.projects.len()
        );
        Ok(())
    }

    /// Insert or refresh the registry entry for `project_path`.
    pub fn register_project(
        &self,
        project_path: &Path,
        format: ConfigFormat,
    ) -> Result<ProjectConfig, RegistryError> {
        let format = ensure_registry_format(format)?;
        let key = normalize_project_path(project_path)?;

        let mut registry = self.load_registry()?;
        let entry = ProjectConfig {
            config_file: project_config_file(&key, format),
            last_modified: Utc::now(),
            config_format: format.as_str().to_string(),
        };
        registry.projects.insert(key.clone(), entry.clone());
        self.save_registry(&registry)?;

        tracing::info!(
            event = "core.registry.project_registered",
            project = %key,
            config_file = %entry.config_file,
            format = %format
        );
        Ok(entry)
    }

    /// Whether `project_path` has a registry entry.
    pub fn is_registered(&self, project_path: &Path) -> Result<bool, RegistryError> {
        let key = normalize_project_path(project_path)?;
        Ok(self.load_registry()?.projects.contains_key(&key))
    }

    /// Registry metadata for `project_path`.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NotRegistered`] when the project has no entry.
    pub fn project_config_info(&self, project_path: &Path) -> Result<ProjectConfig, RegistryError> {
        let key = normalize_project_path(project_path)?;
        self.load_registry()?
            .projects
            .remove(&key)
            .ok_or(RegistryError::NotRegistered { path: key })
    }

    /// Write the project's document and register it.
    ///
    /// Switching format removes the document written under the previous format.
    pub fn save_project_config(
        &self,
        project_path: &Path,
        document: &ConfigDocument,
        format: ConfigFormat,
    ) -> Result<PathBuf, RegistryError> {
        let format = ensure_registry_format(format)?;
        let key = normalize_project_path(project_path)?;
        let previous = self.load_registry()?.projects.remove(&key);

        let relative = project_config_file(&key, format);
        let path = self.base_dir.join(&relative);
        let content = codec::serialize(document, format)?;
        self.write_file(&path, content.as_bytes())?;

        if let Some(previous) = previous
            && previous.config_file != relative
        {
            self.remove_file_if_present(&self.base_dir.join(&previous.config_file))?;
        }

        self.register_project(project_path, format)?;
        Ok(path)
    }

    /// Load the project's document.
    ///
    /// A registered project whose document file is missing yields an empty document.
    ///
    /// # Errors
    ///
    /// Fails when the project is not registered or its recorded format is not
    /// one the registry understands.
    pub fn load_project_config(&self, project_path: &Path) -> Result<ConfigDocument, RegistryError> {
        let info = self.project_config_info(project_path)?;
        let format = info.format()?;
        let path = self.base_dir.join(&info.config_file);

        if !path.exists() {
            tracing::warn!(
                event = "core.registry.project_file_missing",
                path = %path.display()
            );
            return Ok(ConfigDocument::new());
        }

        Ok(codec::read_document_as(&path, format)?)
    }

    /// Write the global document, replacing one stored in the other format.
    pub fn save_global_config(
        &self,
        document: &ConfigDocument,
        format: ConfigFormat,
    ) -> Result<PathBuf, RegistryError> {
        let format = ensure_registry_format(format)?;
        let path = self.global_config_path(format);
        let content = codec::serialize(document, format)?;
        self.write_file(&path, content.as_bytes())?;

        for other in GLOBAL_FORMATS.into_iter().filter(|f| *f != format) {
            self.remove_file_if_present(&self.global_config_path(other))?;
        }

        tracing::info!(event = "core.registry.global_saved", path = %path.display());
        Ok(path)
    }

    /// Load the global document. Absent yields an empty document.
    pub fn load_global_config(&self) -> Result<ConfigDocument, RegistryError> {
        for format in GLOBAL_FORMATS {
            let path = self.global_config_path(format);
            if path.exists() {
                return Ok(codec::read_document_as(&path, format)?);
            }
        }
        Ok(ConfigDocument::new())
    }

    /// Every registered project, sorted by path.
    pub fn list_projects(&self) -> Result<Vec<(String, ProjectConfig)>, RegistryError> {
        Ok(self.load_registry()?.projects.into_iter().collect())
    }

    /// Remove the document and registry entry of every project whose
    /// directory no longer exists.
    ///
    /// Returns the removed project paths, sorted. Entries whose document
    /// cannot be deleted are kept so a later run can retry.
    pub fn cleanup_orphaned_configs(&self) -> Result<Vec<String>, RegistryError> {
        let mut registry = self.load_registry()?;
        let mut removed = Vec::new();

        for (project, info) in &registry.projects {
            if !project_dir_missing(project, std::fs::metadata(project)) {
                continue;
            }

            let file = self.base_dir.join(&info.config_file);
            match self.remove_file_if_present(&file) {
                Ok(()) => {
                    tracing::info!(
                        event = "core.registry.orphan_removed",
                        project = %project,
                        config_file = %file.display()
                    );
                    removed.push(project.clone());
                }
                Err(e) => {
                    tracing::warn!(
                        event = "core.registry.orphan_remove_failed",
                        project = %project,
                        error = %e
                    );
                }
            }
        }

        if !removed.is_empty() {
            for project in &removed {
                registry.projects.remove(project);
            }
            self.save_registry(&registry)?;
        }

        Ok(removed)
    }

    fn write_file(&self, path: &Path, contents: &[u8]) -> Result<(), RegistryError> {
        files::atomic_write(path, contents, files::DEFAULT_FILE_MODE).map_err(|e| {
            RegistryError::WriteFailed {
                path: path.display().to_string(),
                message: e.to_string(),
            }
        })
    }

    fn remove_file_if_present(&self, path: &Path) -> Result<(), RegistryError> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(RegistryError::WriteFailed {
                path: path.display().to_string(),
                message: format!("Failed to remove file: {}", e),
            }),
        }
    }
}

/// The registry key for a project directory.
///
/// Existing directories are canonicalized; other paths are made absolute
/// against the current directory.
pub fn normalize_project_path(project_path: &Path) -> Result<String, RegistryError> {
    let resolved = match project_path.canonicalize() {
        Ok(canonical) => canonical,
        Err(_) => std::path::absolute(project_path).map_err(|source| {
            RegistryError::InvalidProjectPath {
                path: project_path.display().to_string(),
                source,
            }
        })?,
    };
    Ok(resolved.to_string_lossy().into_owned())
}

fn project_config_file(key: &str, format: ConfigFormat) -> String {
    format!(
        "{}/{}.{}",
        PROJECTS_DIR,
        sanitize_project_path(key),
        format.extension()
    )
}

/// Whether a registered project directory is gone.
///
/// Only a definite "not found" counts. Any other metadata failure keeps the
/// entry, since the directory may still exist.
fn project_dir_missing(project: &str, metadata: std::io::Result<std::fs::Metadata>) -> bool {
    match metadata {
        Ok(metadata) => !metadata.is_dir(),
        Err(e)
            if matches!(
                e.kind(),
                std::io::ErrorKind::NotFound | std::io::ErrorKind::NotADirectory
            ) =>
        {
            true
        }
        Err(e) => {
            tracing::warn!(
                event = "core.registry.project_stat_failed",
                project = %project,
                error = %e
            );
            false
        }
    }
}
