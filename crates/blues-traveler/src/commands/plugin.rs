use clap::ArgMatches;
use tracing::{error, info};

use blues_traveler_core::settings::{
    PluginSource, load_scope_settings, plugin_state, save_scope_settings, set_plugin_enabled,
};

use super::helpers::{report_failure, scope_roots, selected_scope};

pub(crate) fn handle_plugin_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    match matches.subcommand() {
        Some(("status", sub_matches)) => handle_status(sub_matches),
        Some(("enable", sub_matches)) => handle_set(sub_matches, Some(true)),
        Some(("disable", sub_matches)) => handle_set(sub_matches, Some(false)),
        Some(("reset", sub_matches)) => handle_set(sub_matches, None),
        _ => {
            error!(event = "cli.plugin_subcommand_unknown");
            Err("Unknown plugin subcommand".into())
        }
    }
}

fn plugin_key(matches: &ArgMatches) -> Result<&String, Box<dyn std::error::Error>> {
    Ok(matches
        .get_one::<String>("key")
        .ok_or("Plugin key argument is required")?)
}

fn handle_status(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let key = plugin_key(matches)?;
    let roots = scope_roots()?;

    let (enabled, source) = plugin_state(&roots, key)
        .map_err(|e| report_failure("resolve plugin state", "cli.plugin_status_failed", e))?;
    let source = match source {
        PluginSource::Project => "project settings",
        PluginSource::Global => "global settings",
        PluginSource::Default => "default",
    };

    println!(
        "{}: {} (from {})",
        key,
        if enabled { "enabled" } else { "disabled" },
        source
    );
    info!(
        event = "cli.plugin_status_completed",
        plugin = key.as_str(),
        enabled = enabled,
        source = source
    );
    Ok(())
}

fn handle_set(matches: &ArgMatches, state: Option<bool>) -> Result<(), Box<dyn std::error::Error>> {
    let key = plugin_key(matches)?;
    let scope = selected_scope(matches);
    let roots = scope_roots()?;

    let mut settings = load_scope_settings(&roots, scope)
        .map_err(|e| report_failure("load settings", "cli.plugin_set_failed", e))?;

    let action = match state {
        Some(true) => "enabled",
        Some(false) => "disabled",
        None => "reset",
    };

    if !set_plugin_enabled(&mut settings, key, state) {
        println!("Plugin '{}' already {} in {} settings; nothing changed.", key, action, scope);
        return Ok(());
    }

    save_scope_settings(&roots, scope, &settings)
        .map_err(|e| report_failure("save settings", "cli.plugin_set_failed", e))?;
    println!("✅ Plugin '{}' {} in {} settings", key, action, scope);
    info!(
        event = "cli.plugin_set_completed",
        plugin = key.as_str(),
        action = action,
        scope = %scope
    );
    Ok(())
}
