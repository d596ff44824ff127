//! Hooks configuration document types.
//!
//! ```yaml
//! python:
//!   PostToolUse:
//!     parallel: true
//!     jobs:
//!       - name: ruff
//!         run: ruff check --fix
//!         glob: "*.py"
//!         timeout: 30
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Group name → hook group. Root of the hooks configuration document.
pub type CustomHooksConfig = BTreeMap<String, HookGroup>;

/// Event name → event configuration.
///
/// A `None` value records an event key that was present with a `null` body;
/// it is rejected by validation and contributes nothing to a merge.
pub type HookGroup = BTreeMap<String, Option<EventConfig>>;

/// Execution hint and jobs for one lifecycle event within a group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventConfig {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub parallel: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub jobs: Vec<HookJob>,
}

impl EventConfig {
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

/// A named executable unit.
///
/// Identity is `name`. Jobs with a blank name are anonymous: a merge never
/// replaces them and always appends them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookJob {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub run: String,

    #[serde(
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub glob: Vec<String>,

    #[serde(
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub skip: Vec<String>,

    #[serde(
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub only: Vec<String>,

    /// Timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workdir: Option<String>,
}

impl HookJob {
    pub fn new(name: impl Into<String>, run: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            run: run.into(),
            ..Default::default()
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.name.trim().is_empty()
    }
}

/// True when no group defines a single job.
pub fn is_empty_config(config: &CustomHooksConfig) -> bool {
    config
        .values()
        .flat_map(|group| group.values())
        .all(|event| event.as_ref().is_none_or(EventConfig::is_empty))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(value)) => vec![value],
        Some(OneOrMany::Many(values)) => values,
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
