//! blues-traveler-core: Configuration resolution for blues-traveler hooks
//!
//! This library decides which hook configuration is in effect for a project,
//! and keeps the CLI's `settings.json` in sync with what is installed. It is
//! used by the `blues-traveler` CLI.
//!
//! # Main Entry Points
//!
//! - [`hooks`] - Discover, merge and validate hooks configuration files
//! - [`settings`] - Install and remove hooks, resolve plugin state
//! - [`registry`] - XDG registry of per-project configuration documents
//! - [`migration`] - Move legacy in-project configs into the registry
//! - [`loader`] - Strategy-selecting loader over registry and legacy files

pub mod app_config;
pub mod codec;
pub mod errors;
pub mod events;
pub mod files;
pub mod hooks;
pub mod loader;
pub mod logging;
pub mod migration;
pub mod paths;
pub mod registry;
pub mod settings;

// Re-export commonly used types at crate root for convenience
pub use app_config::{AppConfig, BlockedUrl, LogRotationConfig};
pub use codec::{ConfigDocument, ConfigFormat};
pub use errors::{ConfigError, TravelerError, TravelerResult};
pub use hooks::{CustomHooksConfig, EventConfig, HookJob, HooksConfigError};
pub use loader::{ConfigLoader, ConfigSource, LoadStrategy};
pub use migration::{MigrationError, MigrationResult, MigrationStatus, ProgressReporter};
pub use paths::{PathError, Scope, ScopeRoots};
pub use registry::{RegistryError, XdgConfig};
pub use settings::{HookEvent, InstallOutcome, Settings, SettingsError};

// Re-export handler modules as the primary API
pub use migration::handler as migration_ops;

// Re-export logging initialization
pub use logging::init_logging;
