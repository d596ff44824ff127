//! Hook installation into a settings document.

use super::hook_type::extract_hook_type;
use super::types::{HookCommand, HookEvent, HookMatcher, Settings};

/// What [`add_hook_to_settings`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// No matcher with this pattern existed; a new one was appended.
    NewMatcher,
    /// The command was appended to an existing matcher.
    Appended,
    /// The exact command was already installed. Nothing changed.
    Duplicate,
    /// A command running the same hook type was replaced in place.
    Replaced { previous: String },
}

impl InstallOutcome {
    /// True for both exact duplicates and same-type replacements.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, InstallOutcome::Duplicate | InstallOutcome::Replaced { .. })
    }

    /// Whether the settings document was modified.
    pub fn changed(&self) -> bool {
        !matches!(self, InstallOutcome::Duplicate)
    }

    /// Human-readable explanation for CLI output.
    pub fn describe(&self, event: HookEvent, matcher: &str) -> String {
        match self {
            InstallOutcome::NewMatcher => {
                format!("Added hook for {event} with new matcher '{matcher}'")
            }
            InstallOutcome::Appended => {
                format!("Added hook to existing {event} matcher '{matcher}'")
            }
            InstallOutcome::Duplicate => {
                format!("Hook already installed for {event} matcher '{matcher}'; nothing changed")
            }
            InstallOutcome::Replaced { previous } => format!(
                "Replaced existing hook for {event} matcher '{matcher}' (was: {previous})"
            ),
        }
    }
}

/// Merge a command into the matcher list of `event`.
///
/// Within a matcher with the same pattern:
/// - an identical command string is a duplicate and nothing changes;
/// - a command running the same hook type through this tool is replaced in
///   place, keeping its position;
/// - anything else is appended.
///
/// Without such a matcher, a new matcher is appended.
pub fn add_hook_to_settings(
    settings: &mut Settings,
    event: HookEvent,
    matcher: &str,
    command: &str,
    timeout: Option<u64>,
) -> InstallOutcome {
    let new_hook = HookCommand::new(command, timeout);
    let matchers = settings.hooks.matchers_mut(event);

    let Some(index) = matchers.iter().position(|m| m.matcher == matcher) else {
        matchers.push(HookMatcher {
            matcher: matcher.to_string(),
            hooks: vec![new_hook],
        });
        log_outcome(event, matcher, command, &InstallOutcome::NewMatcher);
        return InstallOutcome::NewMatcher;
    };
    let existing = &mut matchers[index];

    if existing.hooks.iter().any(|hook| hook.command == command) {
        log_outcome(event, matcher, command, &InstallOutcome::Duplicate);
        return InstallOutcome::Duplicate;
    }

    let same_type = extract_hook_type(command).and_then(|new_type| {
        existing
            .hooks
            .iter()
            .position(|hook| extract_hook_type(&hook.command) == Some(new_type))
    });

    let outcome = match same_type {
        Some(position) => {
            let previous = std::mem::replace(&mut existing.hooks[position], new_hook).command;
            InstallOutcome::Replaced { previous }
        }
        None => {
            existing.hooks.push(new_hook);
            InstallOutcome::Appended
        }
    };

    log_outcome(event, matcher, command, &outcome);
    outcome
}

fn log_outcome(event: HookEvent, matcher: &str, command: &str, outcome: &InstallOutcome) {
    tracing::info!(
        event = "core.settings.hook_added",
        hook_event = %event,
        matcher = matcher,
        command = command,
        outcome = ?outcome
    );
}

/// Whether the exact command is installed under any event.
pub fn is_hook_installed(settings: &Settings, command: &str) -> bool {
    installed_hooks(settings)
        .iter()
        .any(|hook| hook.command.command == command)
}

/// A flattened view of one installed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledHook<'a> {
    pub event: HookEvent,
    pub matcher: &'a str,
    pub command: &'a HookCommand,
}

impl<'a> InstalledHook<'a> {
    pub fn hook_type(&self) -> Option<&'a str> {
        extract_hook_type(&self.command.command)
    }
}

/// Every installed command in event order, then file order.
pub fn installed_hooks(settings: &Settings) -> Vec<InstalledHook<'_>> {
    HookEvent::ALL
        .into_iter()
        .flat_map(|event| {
            settings.hooks.matchers(event).iter().flat_map(move |m| {
                m.hooks.iter().map(move |hook| InstalledHook {
                    event,
                    matcher: m.matcher.as_str(),
                    command: hook,
                })
            })
        })
        .collect()
}

/// Distinct hook types installed through this tool, sorted.
pub fn installed_hook_types(settings: &Settings) -> Vec<String> {
    let types: std::collections::BTreeSet<&str> = installed_hooks(settings)
        .iter()
        .filter_map(|hook| hook.hook_type())
        .collect();
    types.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECURITY: &str = "/usr/bin/blues-traveler hooks run security";

    #[test]
    fn test_install_then_query() {
        let mut settings = Settings::default();
        let outcome = add_hook_to_settings(
            &mut settings,
            HookEvent::PreToolUse,
            "*",
            SECURITY,
            Some(30),
        );

        assert_eq!(outcome, InstallOutcome::NewMatcher);
        assert!(is_hook_installed(&settings, SECURITY));
        let matcher = &settings.hooks.pre_tool_use[0];
        assert_eq!(matcher.matcher, "*");
        assert_eq!(matcher.hooks[0].timeout, Some(30));
        assert_eq!(matcher.hooks[0].kind, "command");
    }

    #[test]
    fn test_exact_duplicate_does_not_grow() {
        let mut settings = Settings::default();
        add_hook_to_settings(&mut settings, HookEvent::PreToolUse, "*", SECURITY, None);
        let before = settings.clone();

        let outcome =
            add_hook_to_settings(&mut settings, HookEvent::PreToolUse, "*", SECURITY, None);

        assert_eq!(outcome, InstallOutcome::Duplicate);
        assert!(outcome.is_duplicate());
        assert!(!outcome.changed());
        assert_eq!(settings, before);
    }

    #[test]
    fn test_same_hook_type_is_replaced_in_place() {
        let mut settings = Settings::default();
        add_hook_to_settings(&mut settings, HookEvent::PreToolUse, "*", "echo first", None);
        add_hook_to_settings(&mut settings, HookEvent::PreToolUse, "*", SECURITY, None);

        let updated = "/opt/bin/blues-traveler hooks run security --log";
        let outcome =
            add_hook_to_settings(&mut settings, HookEvent::PreToolUse, "*", updated, Some(9));

        assert_eq!(
            outcome,
            InstallOutcome::Replaced {
                previous: SECURITY.to_string()
            }
        );
        assert!(outcome.is_duplicate());
        let hooks = &settings.hooks.pre_tool_use[0].hooks;
        assert_eq!(hooks.len(), 2);
        assert_eq!(hooks[0].command, "echo first");
        assert_eq!(hooks[1].command, updated);
        assert_eq!(hooks[1].timeout, Some(9));
    }

    #[test]
    fn test_different_hook_type_is_appended() {
        let mut settings = Settings::default();
        add_hook_to_settings(&mut settings, HookEvent::PreToolUse, "*", SECURITY, None);
        let outcome = add_hook_to_settings(
            &mut settings,
            HookEvent::PreToolUse,
            "*",
            "/usr/bin/blues-traveler hooks run security-test",
            None,
        );

        assert_eq!(outcome, InstallOutcome::Appended);
        assert_eq!(settings.hooks.pre_tool_use[0].hooks.len(), 2);
    }

    #[test]
    fn test_foreign_commands_never_replace() {
        let mut settings = Settings::default();
        add_hook_to_settings(&mut settings, HookEvent::Stop, "*", "echo a", None);
        let outcome = add_hook_to_settings(&mut settings, HookEvent::Stop, "*", "echo b", None);

        assert_eq!(outcome, InstallOutcome::Appended);
        assert_eq!(settings.hooks.stop[0].hooks.len(), 2);
    }

    #[test]
    fn test_different_matcher_gets_its_own_entry() {
        let mut settings = Settings::default();
        add_hook_to_settings(&mut settings, HookEvent::PostToolUse, "Edit,Write", SECURITY, None);
        let outcome =
            add_hook_to_settings(&mut settings, HookEvent::PostToolUse, "*", SECURITY, None);

        assert_eq!(outcome, InstallOutcome::NewMatcher);
        assert_eq!(settings.hooks.post_tool_use.len(), 2);
    }

    #[test]
    fn test_installed_hooks_listing() {
        let mut settings = Settings::default();
        add_hook_to_settings(&mut settings, HookEvent::Stop, "*", "echo stop", None);
        add_hook_to_settings(&mut settings, HookEvent::PreToolUse, "Bash", SECURITY, None);

        let listed = installed_hooks(&settings);
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].event, HookEvent::PreToolUse);
        assert_eq!(listed[0].hook_type(), Some("security"));
        assert_eq!(listed[1].event, HookEvent::Stop);
        assert_eq!(listed[1].hook_type(), None);
    }

    #[test]
    fn test_installed_hook_types_dedupes() {
        let mut settings = Settings::default();
        add_hook_to_settings(&mut settings, HookEvent::PreToolUse, "*", SECURITY, None);
        add_hook_to_settings(&mut settings, HookEvent::PostToolUse, "Edit", SECURITY, None);
        add_hook_to_settings(
            &mut settings,
            HookEvent::Stop,
            "*",
            "/usr/bin/blues-traveler hooks run audit",
            None,
        );
        add_hook_to_settings(&mut settings, HookEvent::Stop, "*", "echo foreign", None);

        assert_eq!(installed_hook_types(&settings), vec!["audit", "security"]);
    }

    #[test]
    fn test_describe_mentions_previous_command() {
        let outcome = InstallOutcome::Replaced {
            previous: "old".to_string(),
        };
        let text = outcome.describe(HookEvent::PreToolUse, "*");
        assert!(text.contains("Replaced"));
        assert!(text.contains("old"));
    }
}
