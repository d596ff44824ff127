//! # Legacy migration
//!
//! Older releases kept each project's app config at
//! `<project>/.claude/hooks/blues-traveler-config.json`. Migration finds those
//! files and copies each into the XDG registry exactly once, leaving a
//! timestamped backup beside the original.

pub mod discovery;
pub mod errors;
pub mod handler;
pub mod progress;
pub mod types;

pub use discovery::{MAX_DISCOVERY_DEPTH, discover_legacy_configs, legacy_config_at};
pub use errors::MigrationError;
pub use handler::{MigrationOptions, default_search_roots, migrate_legacy_configs, migration_status};
pub use progress::{NoopProgress, ProgressReporter};
pub use types::{
    LegacyConfig, MigrationFailure, MigrationResult, MigrationStatus, ProjectOutcome,
};
