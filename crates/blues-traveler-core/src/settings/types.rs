//! Settings document types.
//!
//! ```json
//! {
//!   "hooks": {
//!     "PreToolUse": [
//!       { "matcher": "Edit,Write", "hooks": [ { "type": "command", "command": "blues-traveler hooks run security", "timeout": 30 } ] }
//!     ]
//!   },
//!   "plugins": { "security": { "enabled": false } },
//!   "defaultModel": "sonnet",
//!   "permissions": { "allow": [] }
//! }
//! ```
//!
//! Top-level fields outside the known schema (like `permissions` above) are
//! kept in [`Settings::other`] and written back unchanged.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::errors::SettingsError;

/// The nine lifecycle events a settings file can attach hooks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HookEvent {
    PreToolUse,
    PostToolUse,
    UserPromptSubmit,
    Notification,
    Stop,
    SubagentStop,
    PreCompact,
    SessionStart,
    SessionEnd,
}

impl HookEvent {
    pub const ALL: [HookEvent; 9] = [
        HookEvent::PreToolUse,
        HookEvent::PostToolUse,
        HookEvent::UserPromptSubmit,
        HookEvent::Notification,
        HookEvent::Stop,
        HookEvent::SubagentStop,
        HookEvent::PreCompact,
        HookEvent::SessionStart,
        HookEvent::SessionEnd,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HookEvent::PreToolUse => "PreToolUse",
            HookEvent::PostToolUse => "PostToolUse",
            HookEvent::UserPromptSubmit => "UserPromptSubmit",
            HookEvent::Notification => "Notification",
            HookEvent::Stop => "Stop",
            HookEvent::SubagentStop => "SubagentStop",
            HookEvent::PreCompact => "PreCompact",
            HookEvent::SessionStart => "SessionStart",
            HookEvent::SessionEnd => "SessionEnd",
        }
    }
}

impl std::fmt::Display for HookEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HookEvent {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HookEvent::ALL
            .into_iter()
            .find(|event| event.as_str() == s)
            .ok_or_else(|| SettingsError::UnknownEvent {
                event: s.to_string(),
            })
    }
}

/// The CLI's settings file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default, skip_serializing_if = "HooksSection::is_empty")]
    pub hooks: HooksSection,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub plugins: BTreeMap<String, PluginConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_model: Option<String>,

    /// Unrecognized top-level fields, preserved verbatim.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// One ordered matcher list per event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HooksSection {
    #[serde(
        rename = "PreToolUse",
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub pre_tool_use: Vec<HookMatcher>,

    #[serde(
        rename = "PostToolUse",
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub post_tool_use: Vec<HookMatcher>,

    #[serde(
        rename = "UserPromptSubmit",
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub user_prompt_submit: Vec<HookMatcher>,

    #[serde(
        rename = "Notification",
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub notification: Vec<HookMatcher>,

    #[serde(
        rename = "Stop",
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub stop: Vec<HookMatcher>,

    #[serde(
        rename = "SubagentStop",
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub subagent_stop: Vec<HookMatcher>,

    #[serde(
        rename = "PreCompact",
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub pre_compact: Vec<HookMatcher>,

    #[serde(
        rename = "SessionStart",
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub session_start: Vec<HookMatcher>,

    #[serde(
        rename = "SessionEnd",
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub session_end: Vec<HookMatcher>,
}

impl HooksSection {
    pub fn matchers(&self, event: HookEvent) -> &Vec<HookMatcher> {
        match event {
            HookEvent::PreToolUse => &self.pre_tool_use,
            HookEvent::PostToolUse => &self.post_tool_use,
            HookEvent::UserPromptSubmit => &self.user_prompt_submit,
            HookEvent::Notification => &self.notification,
            HookEvent::Stop => &self.stop,
            HookEvent::SubagentStop => &self.subagent_stop,
            HookEvent::PreCompact => &self.pre_compact,
            HookEvent::SessionStart => &self.session_start,
            HookEvent::SessionEnd => &self.session_end,
        }
    }

    pub fn matchers_mut(&mut self, event: HookEvent) -> &mut Vec<HookMatcher> {
        match event {
            HookEvent::PreToolUse => &mut self.pre_tool_use,
            HookEvent::PostToolUse => &mut self.post_tool_use,
            HookEvent::UserPromptSubmit => &mut self.user_prompt_submit,
            HookEvent::Notification => &mut self.notification,
            HookEvent::Stop => &mut self.stop,
            HookEvent::SubagentStop => &mut self.subagent_stop,
            HookEvent::PreCompact => &mut self.pre_compact,
            HookEvent::SessionStart => &mut self.session_start,
            HookEvent::SessionEnd => &mut self.session_end,
        }
    }

    pub fn is_empty(&self) -> bool {
        HookEvent::ALL
            .iter()
            .all(|event| self.matchers(*event).is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookMatcher {
    #[serde(default)]
    pub matcher: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub hooks: Vec<HookCommand>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookCommand {
    #[serde(rename = "type", default = "default_command_type")]
    pub kind: String,

    pub command: String,

    /// Timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl HookCommand {
    pub fn new(command: impl Into<String>, timeout: Option<u64>) -> Self {
        Self {
            kind: default_command_type(),
            command: command.into(),
            timeout,
        }
    }
}

/// Per-plugin settings. `enabled: None` means "not specified here".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

fn default_command_type() -> String {
    "command".to_string()
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
