//! # Path resolution
//!
//! Every location this crate reads or writes is derived from a [`ScopeRoots`]
//! value rather than from ambient process state. Only [`ScopeRoots::from_env`]
//! looks at the working directory and `$HOME`.
//!
//! ## Layout per scope
//!
//! ```text
//! <scope>/.claude/
//! ├── hooks/
//! │   ├── hooks.yml | hooks.yaml        canonical hooks config
//! │   ├── <group>.yml | <group>.yaml    per-group hooks config
//! │   └── blues-traveler-config.json    app (legacy flat) config
//! ├── hooks.yml | hooks.yaml | hooks.json
//! ├── hooks-local.yml
//! └── settings.json
//! ```

pub mod candidates;
pub mod errors;

use std::path::{Path, PathBuf};

pub use candidates::{candidate_paths, group_config_files};
pub use errors::PathError;

/// Directory under each scope root holding everything this tool touches.
pub const CLAUDE_DIR: &str = ".claude";
/// Sub-directory of [`CLAUDE_DIR`] holding hooks configuration.
pub const HOOKS_DIR: &str = "hooks";
/// File name of the app config (the legacy flat JSON document).
pub const APP_CONFIG_FILENAME: &str = "blues-traveler-config.json";
/// Stem reserved for the app config; never treated as a per-group file.
pub const APP_CONFIG_STEM: &str = "blues-traveler-config";
/// Settings file name under [`CLAUDE_DIR`].
pub const SETTINGS_FILENAME: &str = "settings.json";
/// Directory name used under the XDG config home.
pub const APP_NAME: &str = "blues-traveler";
/// Overrides the XDG base directory entirely when set and non-empty.
pub const CONFIG_DIR_ENV: &str = "BLUES_TRAVELER_CONFIG_DIR";

/// Which of the two configuration scopes an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Project,
    Global,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Project => "project",
            Scope::Global => "global",
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two roots every path is resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeRoots {
    /// Root of the project scope (normally the working directory).
    pub project_root: PathBuf,
    /// Root of the global scope (normally `$HOME`).
    pub home_dir: PathBuf,
}

impl ScopeRoots {
    pub fn new(project_root: impl Into<PathBuf>, home_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            home_dir: home_dir.into(),
        }
    }

    /// Resolve roots from the current working directory and home directory.
    ///
    /// # Errors
    ///
    /// Fails if either directory cannot be determined.
    pub fn from_env() -> Result<Self, PathError> {
        let project_root = std::env::current_dir()
            .map_err(|source| PathError::CurrentDirUnavailable { source })?;
        let home_dir = dirs::home_dir().ok_or(PathError::HomeDirNotFound)?;
        Ok(Self::new(project_root, home_dir))
    }

    pub fn root(&self, scope: Scope) -> &Path {
        match scope {
            Scope::Project => &self.project_root,
            Scope::Global => &self.home_dir,
        }
    }

    /// `<scope>/.claude`
    pub fn claude_dir(&self, scope: Scope) -> PathBuf {
        self.root(scope).join(CLAUDE_DIR)
    }

    /// `<scope>/.claude/hooks`
    pub fn hooks_dir(&self, scope: Scope) -> PathBuf {
        self.claude_dir(scope).join(HOOKS_DIR)
    }

    /// `<scope>/.claude/settings.json`
    pub fn settings_path(&self, scope: Scope) -> PathBuf {
        self.claude_dir(scope).join(SETTINGS_FILENAME)
    }

    /// `<scope>/.claude/hooks/blues-traveler-config.json`
    pub fn app_config_path(&self, scope: Scope) -> PathBuf {
        app_config_path_for(self.root(scope))
    }
}

/// Location of the app config (legacy flat file) for an arbitrary project root.
pub fn app_config_path_for(project_root: &Path) -> PathBuf {
    project_root
        .join(CLAUDE_DIR)
        .join(HOOKS_DIR)
        .join(APP_CONFIG_FILENAME)
}

/// Base directory of the XDG store.
///
/// Resolution order:
/// 1. `$BLUES_TRAVELER_CONFIG_DIR`
/// 2. `$XDG_CONFIG_HOME/blues-traveler`
/// 3. `<home>/.config/blues-traveler`
pub fn xdg_base_dir(home_dir: &Path) -> PathBuf {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV)
        && !dir.is_empty()
    {
        return PathBuf::from(dir);
    }

    match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join(APP_NAME),
        _ => home_dir.join(".config").join(APP_NAME),
    }
}
