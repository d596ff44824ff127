//! # XDG registry
//!
//! Per-project configuration documents live under a central XDG directory
//! instead of inside each project. `registry.json` maps absolute project
//! paths to the document that belongs to them.

pub mod errors;
pub mod sanitize;
pub mod store;
pub mod types;

pub use errors::RegistryError;
pub use sanitize::{MAX_SLUG_LEN, sanitize_project_path};
pub use store::{XdgConfig, normalize_project_path};
pub use types::{ProjectConfig, ProjectRegistry, REGISTRY_VERSION, parse_registry_format};
