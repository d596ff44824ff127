//! # Hooks configuration
//!
//! Hooks configuration is a three-level document: group → event → jobs.
//! It may be spread over many files in both scopes; [`load_hooks_config`]
//! discovers them through [`crate::paths::candidate_paths`] and folds them
//! with [`merge_hooks_config`].

pub mod errors;
pub mod loading;
pub mod merge;
pub mod types;
pub mod validation;

pub use errors::HooksConfigError;
pub use loading::{
    HooksConfigSource, LoadedHooksConfig, load_hooks_config, load_hooks_config_with_source,
    load_hooks_file,
};
pub use merge::{merge_all, merge_hooks_config};
pub use types::{CustomHooksConfig, EventConfig, HookGroup, HookJob, is_empty_config};
pub use validation::validate_hooks_config;
