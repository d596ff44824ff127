//! Hook removal from a settings document.
//!
//! Every removal walks the nine event slots, drops the matching commands,
//! and drops a matcher only when this removal emptied it. Matchers that were
//! already empty are left alone, so removing something that is not installed
//! leaves the document untouched.

use super::hook_type::{is_traveler_command, matches_config_group, matches_hook_type};
use super::types::{HookCommand, HookEvent, Settings};

/// Remove every command equal to `command`. Returns whether anything was removed.
pub fn remove_hook_from_settings(settings: &mut Settings, command: &str) -> bool {
    remove_where(settings, &HookEvent::ALL, |hook| hook.command == command) > 0
}

/// Remove every command running `hook_type`. Returns whether anything was removed.
pub fn remove_hook_type_from_settings(settings: &mut Settings, hook_type: &str) -> bool {
    remove_where(settings, &HookEvent::ALL, |hook| {
        matches_hook_type(&hook.command, hook_type)
    }) > 0
}

/// Remove every command that runs a hook through this tool.
///
/// Commands not recognized as ours are kept. Returns the number removed.
pub fn remove_all_from_settings(settings: &mut Settings) -> usize {
    remove_where(settings, &HookEvent::ALL, |hook| {
        is_traveler_command(&hook.command)
    })
}

/// Remove the hooks generated from config group `group`.
///
/// Limited to `event` when given. Returns the number removed.
pub fn remove_config_group_from_settings(
    settings: &mut Settings,
    group: &str,
    event: Option<HookEvent>,
) -> usize {
    let events: Vec<HookEvent> = match event {
        Some(event) => vec![event],
        None => HookEvent::ALL.to_vec(),
    };

    remove_where(settings, &events, |hook| {
        matches_config_group(&hook.command, group)
    })
}

fn remove_where<F>(settings: &mut Settings, events: &[HookEvent], predicate: F) -> usize
where
    F: Fn(&HookCommand) -> bool,
{
    let mut removed = 0;

    for event in events {
        settings.hooks.matchers_mut(*event).retain_mut(|matcher| {
            let before = matcher.hooks.len();
            matcher.hooks.retain(|hook| !predicate(hook));
            let dropped = before - matcher.hooks.len();
            removed += dropped;
            !(dropped > 0 && matcher.hooks.is_empty())
        });
    }

    if removed > 0 {
        tracing::info!(event = "core.settings.hooks_removed", count = removed);
    }

    removed
}
