//! Legacy config discovery.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use super::types::LegacyConfig;
use crate::paths::{APP_CONFIG_FILENAME, CLAUDE_DIR, HOOKS_DIR};

/// Deepest directory level searched below each root.
pub const MAX_DISCOVERY_DEPTH: usize = 8;

/// Directory names never descended into.
const SKIPPED_DIRS: [&str; 2] = ["node_modules", "target"];

/// Find every legacy config under `search_roots`.
///
/// Hidden directories are skipped except `.claude`. A project reached
/// through more than one root is reported once. `exclude` drops a project
/// root outright, which keeps the home directory's global file out of
/// project discovery. Results are sorted by project path.
pub fn discover_legacy_configs(search_roots: &[PathBuf], exclude: Option<&Path>) -> Vec<LegacyConfig> {
    let excluded = exclude.map(canonical_or_owned);
    let mut found: BTreeMap<String, LegacyConfig> = BTreeMap::new();

    for root in search_roots {
        if !root.is_dir() {
            tracing::warn!(
                event = "core.migration.search_root_missing",
                root = %root.display()
            );
            continue;
        }

        let walker = WalkDir::new(root)
            .max_depth(MAX_DISCOVERY_DEPTH)
            .follow_links(false)
            .into_iter()
            .filter_entry(should_descend);

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(
                        event = "core.migration.walk_error",
                        root = %root.display(),
                        error = %e
                    );
                    continue;
                }
            };

            let Some(config) = legacy_config_at(entry.path()) else {
                continue;
            };
            if excluded.as_deref() == Some(config.project_root.as_path()) {
                continue;
            }

            let key = config.project_root.to_string_lossy().into_owned();
            found.entry(key).or_insert(config);
        }
    }

    tracing::info!(event = "core.migration.discovery_completed", count = found.len());
    found.into_values().collect()
}

/// Recognize `<project>/.claude/hooks/blues-traveler-config.json`.
pub fn legacy_config_at(path: &Path) -> Option<LegacyConfig> {
    if path.file_name()? != APP_CONFIG_FILENAME || !path.is_file() {
        return None;
    }

    let hooks_dir = path.parent()?;
    let claude_dir = hooks_dir.parent()?;
    if hooks_dir.file_name()? != HOOKS_DIR || claude_dir.file_name()? != CLAUDE_DIR {
        return None;
    }

    let project_root = canonical_or_owned(claude_dir.parent()?);
    let legacy_path = project_root
        .join(CLAUDE_DIR)
        .join(HOOKS_DIR)
        .join(APP_CONFIG_FILENAME);

    Some(LegacyConfig {
        project_root,
        legacy_path,
    })
}

fn should_descend(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return true;
    }

    let name = entry.file_name().to_string_lossy();
    if name == CLAUDE_DIR {
        return true;
    }
    !name.starts_with('.') && !SKIPPED_DIRS.contains(&name.as_ref())
}

fn canonical_or_owned(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
