use clap::ArgMatches;
use tracing::info;

use blues_traveler_core::HookEvent;
use blues_traveler_core::settings::{
    installed_hooks, load_scope_settings, remove_all_from_settings, remove_config_group_from_settings,
    remove_hook_type_from_settings, save_scope_settings,
};

use super::helpers::{report_failure, scope_roots, selected_scope};

pub(crate) fn handle_uninstall_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let scope = selected_scope(matches);
    let roots = scope_roots()?;
    let mut settings = load_scope_settings(&roots, scope)
        .map_err(|e| report_failure("load settings", "cli.uninstall_failed", e))?;

    let group = matches.get_one::<String>("group");
    if group.is_none() && matches.contains_id("event") {
        eprintln!("❌ --event only applies together with --group");
        return Err("--event requires --group".into());
    }

    let removed = if matches.get_flag("all") {
        info!(event = "cli.uninstall_started", mode = "all", scope = %scope);
        remove_all_from_settings(&mut settings)
    } else if let Some(group) = group {
        let event = matches
            .get_one::<String>("event")
            .map(|name| name.parse::<HookEvent>())
            .transpose()?;
        info!(
            event = "cli.uninstall_started",
            mode = "group",
            group = group.as_str(),
            scope = %scope
        );
        remove_config_group_from_settings(&mut settings, group, event)
    } else {
        let hook_type = matches
            .get_one::<String>("hook-type")
            .ok_or("Hook type argument is required")?;
        info!(
            event = "cli.uninstall_started",
            mode = "type",
            hook_type = hook_type.as_str(),
            scope = %scope
        );
        let installed = installed_hooks(&settings)
            .iter()
            .filter(|hook| hook.hook_type() == Some(hook_type.as_str()))
            .count();
        if remove_hook_type_from_settings(&mut settings, hook_type) {
            installed
        } else {
            0
        }
    };

    if removed == 0 {
        println!("No matching hooks installed in {} settings; nothing changed.", scope);
        info!(event = "cli.uninstall_completed", removed = 0);
        return Ok(());
    }

    save_scope_settings(&roots, scope, &settings)
        .map_err(|e| report_failure("save settings", "cli.uninstall_failed", e))?;

    println!(
        "✅ Removed {} from {} settings: {}",
        describe_removed(removed),
        scope,
        roots.settings_path(scope).display()
    );
    info!(event = "cli.uninstall_completed", removed = removed);
    Ok(())
}

fn describe_removed(count: usize) -> String {
    if count == 1 {
        "1 hook".to_string()
    } else {
        format!("{} hooks", count)
    }
}
