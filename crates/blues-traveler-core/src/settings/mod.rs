//! # Settings store
//!
//! The CLI's `settings.json` records which hook commands are installed for
//! which events, and per-plugin enable flags. It is shared with other tools,
//! so fields this crate does not know about are carried through untouched.
//!
//! - [`persistence`] - load and atomic save
//! - [`install`] - add a hook with duplicate/replacement detection
//! - [`removal`] - remove by command, hook type, config group, or all
//! - [`hook_type`] - the command-string parser both of the above rely on
//! - [`plugins`] - project/global plugin precedence

pub mod errors;
pub mod hook_type;
pub mod install;
pub mod persistence;
pub mod plugins;
pub mod removal;
pub mod types;

pub use errors::SettingsError;
pub use hook_type::{
    build_hook_command, config_hook_type, extract_hook_type, is_traveler_command,
    matches_config_group, matches_hook_type, validate_hook_type,
};
pub use install::{
    InstallOutcome, InstalledHook, add_hook_to_settings, installed_hook_types, installed_hooks,
    is_hook_installed,
};
pub use persistence::{load_scope_settings, load_settings, save_scope_settings, save_settings};
pub use plugins::{
    PluginSource, explicit_plugin_state, is_plugin_enabled, plugin_state, resolve_plugin_enabled,
    set_plugin_enabled,
};
pub use removal::{
    remove_all_from_settings, remove_config_group_from_settings, remove_hook_from_settings,
    remove_hook_type_from_settings,
};
pub use types::{HookCommand, HookEvent, HookMatcher, HooksSection, PluginConfig, Settings};
