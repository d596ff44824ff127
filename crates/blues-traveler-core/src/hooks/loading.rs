//! Discovery and aggregation of hooks configuration files.

use std::path::{Path, PathBuf};

use serde_json::Value;

use super::errors::HooksConfigError;
use super::merge::merge_hooks_config;
use super::types::CustomHooksConfig;
use crate::app_config::load_app_config;
use crate::codec::{self, CodecError};
use crate::paths::{Scope, ScopeRoots, candidate_paths};

/// Where a loaded hooks configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HooksConfigSource {
    /// The `customHooks` section of the app config at this path.
    Embedded(PathBuf),
    /// Merged from these files, highest precedence first.
    Files(Vec<PathBuf>),
}

#[derive(Debug, Clone)]
pub struct LoadedHooksConfig {
    pub config: CustomHooksConfig,
    pub source: HooksConfigSource,
}

/// Load the effective hooks configuration for `roots`.
///
/// See [`load_hooks_config_with_source`].
pub fn load_hooks_config(roots: &ScopeRoots) -> Result<CustomHooksConfig, HooksConfigError> {
    load_hooks_config_with_source(roots).map(|loaded| loaded.config)
}

/// Load the effective hooks configuration and report where it came from.
///
/// 1. If the project app config, else the global app config, embeds a
///    non-empty `customHooks` section, it is returned as-is and no files are
///    discovered.
/// 2. Otherwise every existing candidate path is parsed and the results are
///    folded from lowest to highest precedence, so earlier candidates win.
///
/// # Errors
///
/// A read or parse failure in any file aborts the whole load; the error
/// carries the offending path.
pub fn load_hooks_config_with_source(
    roots: &ScopeRoots,
) -> Result<LoadedHooksConfig, HooksConfigError> {
    for scope in [Scope::Project, Scope::Global] {
        let app_config_path = roots.app_config_path(scope);
        let app_config = load_app_config(&app_config_path)?;
        if let Some(embedded) = app_config.embedded_custom_hooks() {
            tracing::info!(
                event = "core.hooks.embedded_config_used",
                scope = %scope,
                path = %app_config_path.display()
            );
            return Ok(LoadedHooksConfig {
                config: embedded.clone(),
                source: HooksConfigSource::Embedded(app_config_path),
            });
        }
    }

    let existing: Vec<PathBuf> = candidate_paths(roots)
        .into_iter()
        .filter(|path| path.is_file())
        .collect();

    let mut merged = CustomHooksConfig::new();
    for path in existing.iter().rev() {
        let file_config = load_hooks_file(path)?;
        merged = merge_hooks_config(&merged, &file_config);
    }

    tracing::info!(
        event = "core.hooks.config_loaded",
        files = existing.len(),
        groups = merged.len()
    );

    Ok(LoadedHooksConfig {
        config: merged,
        source: HooksConfigSource::Files(existing),
    })
}

/// Parse a single hooks file. The format follows the extension.
pub fn load_hooks_file(path: &Path) -> Result<CustomHooksConfig, HooksConfigError> {
    let doc = codec::read_document(path).map_err(|e| match e {
        CodecError::Read { source, .. } => HooksConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        },
        other => HooksConfigError::ParseFailed {
            path: path.display().to_string(),
            message: other.to_string(),
        },
    })?;

    codec::decode_typed(Value::Object(doc)).map_err(|e| {
        tracing::warn!(
            event = "core.hooks.file_shape_invalid",
            path = %path.display(),
            error = %e
        );
        HooksConfigError::ParseFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        }
    })
}
