use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{error, info};

use super::discovery::discover_legacy_configs;
use super::errors::MigrationError;
use super::progress::ProgressReporter;
use super::types::{LegacyConfig, MigrationResult, MigrationStatus, ProjectOutcome};
use crate::codec::{self, ConfigFormat};
use crate::paths::app_config_path_for;
use crate::registry::{XdgConfig, normalize_project_path};

/// Parameters of a migration run.
#[derive(Debug, Clone, Default)]
pub struct MigrationOptions {
    pub search_roots: Vec<PathBuf>,
    /// Classify only; write nothing.
    pub dry_run: bool,
    /// Home directory. Its legacy file is the global config, not a project.
    pub home_dir: Option<PathBuf>,
}

/// Roots searched when the caller names none.
pub fn default_search_roots(home_dir: &Path) -> Vec<PathBuf> {
    vec![home_dir.to_path_buf()]
}

/// Discover legacy configs and move each unregistered one into the registry.
///
/// Failures are isolated per project and reported in the result; the run
/// itself never aborts. Re-running after success skips every project.
pub fn migrate_legacy_configs(
    xdg: &XdgConfig,
    options: &MigrationOptions,
    progress: &dyn ProgressReporter,
) -> MigrationResult {
    info!(
        event = "core.migration.started",
        roots = options.search_roots.len(),
        dry_run = options.dry_run
    );

    progress.discovery_started(&options.search_roots);
    let found = discover_legacy_configs(&options.search_roots, options.home_dir.as_deref());
    progress.discovery_finished(found.len());

    let mut result = MigrationResult::new(options.dry_run);
    let total = found.len();

    for (index, legacy) in found.iter().enumerate() {
        let project = legacy.project_root.display().to_string();
        progress.project_started(index, total, &project);

        let outcome = match migrate_project(xdg, legacy, options.dry_run) {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(
                    event = "core.migration.project_failed",
                    project = %project,
                    error = %e
                );
                ProjectOutcome::Failed {
                    message: e.to_string(),
                }
            }
        };

        progress.project_finished(&project, &outcome);
        result.record(project, outcome);
    }

    info!(
        event = "core.migration.completed",
        migrated = result.migrated.len(),
        skipped = result.skipped.len(),
        failed = result.errors.len(),
        dry_run = options.dry_run
    );
    progress.finished(&result);
    result
}

fn migrate_project(
    xdg: &XdgConfig,
    legacy: &LegacyConfig,
    dry_run: bool,
) -> Result<ProjectOutcome, MigrationError> {
    if xdg.is_registered(&legacy.project_root)? {
        info!(
            event = "core.migration.project_skipped",
            project = %legacy.project_root.display()
        );
        return Ok(ProjectOutcome::Skipped);
    }

    let path = &legacy.legacy_path;
    let content = std::fs::read_to_string(path).map_err(|source| MigrationError::ReadFailed {
        path: path.display().to_string(),
        source,
    })?;
    let document =
        codec::parse_document(&content, ConfigFormat::Json).map_err(|e| {
            MigrationError::ParseFailed {
                path: path.display().to_string(),
                message: e.to_string(),
            }
        })?;

    if dry_run {
        return Ok(ProjectOutcome::Migrated { backup: None });
    }

    let backup = backup_path(path);
    std::fs::copy(path, &backup).map_err(|source| MigrationError::BackupFailed {
        path: path.display().to_string(),
        source,
    })?;

    let saved = xdg.save_project_config(&legacy.project_root, &document, ConfigFormat::Json)?;
    info!(
        event = "core.migration.project_migrated",
        project = %legacy.project_root.display(),
        backup = %backup.display(),
        destination = %saved.display()
    );

    Ok(ProjectOutcome::Migrated {
        backup: Some(backup),
    })
}

/// `<file>.backup.<YYYYMMDD-HHMMSS>` next to the original.
fn backup_path(path: &Path) -> PathBuf {
    let stamp = Local::now().format("%Y%m%d-%H%M%S");
    let mut name = path.as_os_str().to_os_string();
    name.push(format!(".backup.{}", stamp));
    PathBuf::from(name)
}

/// Report whether `project_root` still needs migrating.
pub fn migration_status(
    xdg: &XdgConfig,
    project_root: &Path,
) -> Result<MigrationStatus, MigrationError> {
    let legacy_path = app_config_path_for(project_root);
    let project = normalize_project_path(project_root)?;

    let info = match xdg.project_config_info(project_root) {
        Ok(info) => Some(info),
        Err(crate::registry::RegistryError::NotRegistered { .. }) => None,
        Err(e) => return Err(e.into()),
    };

    Ok(MigrationStatus {
        project,
        legacy_exists: legacy_path.is_file(),
        legacy_path,
        registered: info.is_some(),
        xdg_config_file: info.map(|info| xdg.base_dir().join(info.config_file)),
    })
}
