use clap::ArgMatches;
use serde::Serialize;
use tracing::info;

use blues_traveler_core::settings::{InstalledHook, installed_hooks, load_scope_settings};

use super::helpers::{report_failure, scope_roots, selected_scope};

#[derive(Debug, Serialize)]
struct HookEntry<'a> {
    event: &'static str,
    matcher: &'a str,
    command: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    hook_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeout: Option<u64>,
}

impl<'a> From<&InstalledHook<'a>> for HookEntry<'a> {
    fn from(hook: &InstalledHook<'a>) -> Self {
        Self {
            event: hook.event.as_str(),
            matcher: hook.matcher,
            command: &hook.command.command,
            hook_type: hook.hook_type(),
            timeout: hook.command.timeout,
        }
    }
}

pub(crate) fn handle_list_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let scope = selected_scope(matches);
    let json_output = matches.get_flag("json");
    info!(event = "cli.list_started", scope = %scope, json_output = json_output);

    let roots = scope_roots()?;
    let settings = load_scope_settings(&roots, scope)
        .map_err(|e| report_failure("load settings", "cli.list_failed", e))?;
    let hooks = installed_hooks(&settings);
    let entries: Vec<HookEntry> = hooks.iter().map(HookEntry::from).collect();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else if entries.is_empty() {
        println!("No hooks installed in {} settings.", scope);
    } else {
        println!("Hooks installed in {} settings:", scope);
        for entry in &entries {
            let label = entry.hook_type.unwrap_or("(external)");
            let timeout = entry
                .timeout
                .map(|t| format!(" [timeout {}s]", t))
                .unwrap_or_default();
            println!(
                "  {:<16} {:<12} {}{}",
                entry.event, entry.matcher, label, timeout
            );
        }
    }

    info!(event = "cli.list_completed", count = entries.len());
    Ok(())
}
