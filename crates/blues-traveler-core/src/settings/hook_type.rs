//! Hook-type token parsing for installed commands.
//!
//! Commands installed by this tool look like:
//!
//! ```text
//! <prefix>blues-traveler [hooks] run <token>[ <flags>]
//! ```
//!
//! `<prefix>` is an optional directory path (possibly quoted), `hooks` is an
//! optional subcommand, and `<token>` runs up to the next whitespace or the
//! end of the string. The token is the identity used for conflict detection
//! and removal, so differing executable paths or trailing flags never hide a
//! conflict, while `security` never matches `security-test`.
//!
//! This is the only place that parses command strings.

use std::sync::LazyLock;

use regex::Regex;

use super::errors::SettingsError;

/// Executable name recognized in installed commands.
pub const TOOL_NAME: &str = "blues-traveler";

static HOOK_RUN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:^|[\s/\\"'])blues-traveler(?:\.exe)?["']?\s+(?:hooks\s+)?run\s+(\S+)"#)
        .expect("hook run pattern is valid")
});

/// Extract the hook-type token from a command string.
///
/// Returns `None` for commands that are not invocations of this tool.
pub fn extract_hook_type(command: &str) -> Option<&str> {
    HOOK_RUN_PATTERN
        .captures(command)
        .and_then(|caps| caps.get(1))
        .map(|token| token.as_str())
}

/// Whether `command` runs a hook through this tool.
pub fn is_traveler_command(command: &str) -> bool {
    extract_hook_type(command).is_some()
}

/// Whether `command` runs exactly the hook type `hook_type`.
pub fn matches_hook_type(command: &str, hook_type: &str) -> bool {
    extract_hook_type(command) == Some(hook_type)
}

/// Token prefix shared by every hook generated from config group `group`.
pub fn config_group_prefix(group: &str) -> String {
    format!("config:{group}:")
}

/// Whether `command` runs a hook generated from config group `group`.
pub fn matches_config_group(command: &str, group: &str) -> bool {
    let prefix = config_group_prefix(group);
    extract_hook_type(command).is_some_and(|token| token.starts_with(&prefix))
}

/// Check that `hook_type` survives a round trip through a command string.
///
/// The token ends at the first whitespace, so a type containing whitespace
/// would be installed under a shorter identity than the one requested.
pub fn validate_hook_type(hook_type: &str) -> Result<(), SettingsError> {
    let reason = if hook_type.is_empty() {
        Some("hook type is empty")
    } else if hook_type.contains(char::is_whitespace) {
        Some("hook type must not contain whitespace")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(SettingsError::InvalidHookType {
            hook_type: hook_type.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Hook type of the job `job` in config group `group`.
pub fn config_hook_type(group: &str, job: &str) -> Result<String, SettingsError> {
    let hook_type = format!("{}{job}", config_group_prefix(group));
    validate_hook_type(&hook_type)?;
    Ok(hook_type)
}

/// Build the command string that runs `hook_type` through `executable`.
///
/// The executable is quoted when it contains whitespace.
pub fn build_hook_command(executable: &str, hook_type: &str, extra_args: &[String]) -> String {
    let mut command = if executable.contains(char::is_whitespace) {
        format!("\"{executable}\" hooks run {hook_type}")
    } else {
        format!("{executable} hooks run {hook_type}")
    };

    for arg in extra_args {
        command.push(' ');
        command.push_str(arg);
    }

    command
}
