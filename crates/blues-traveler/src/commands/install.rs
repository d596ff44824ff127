use clap::ArgMatches;
use tracing::{info, warn};

use blues_traveler_core::hooks::load_hooks_config;
use blues_traveler_core::hooks::validate_hooks_config;
use blues_traveler_core::settings::{
    add_hook_to_settings, build_hook_command, config_hook_type, load_scope_settings,
    save_scope_settings, validate_hook_type,
};
use blues_traveler_core::{HookEvent, ScopeRoots, Settings};

use super::helpers::{current_executable, report_failure, scope_roots, selected_scope};

pub(crate) fn handle_install_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let scope = selected_scope(matches);
    let matcher = matches
        .get_one::<String>("matcher")
        .ok_or("Matcher argument is required")?;
    let event: HookEvent = matches
        .get_one::<String>("event")
        .ok_or("Event argument is required")?
        .parse()?;
    let timeout = matches.get_one::<u64>("timeout").copied();
    let extra_args: Vec<String> = matches
        .get_many::<String>("args")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    let roots = scope_roots()?;
    let mut settings = load_scope_settings(&roots, scope)
        .map_err(|e| report_failure("load settings", "cli.install_failed", e))?;

    let executable = current_executable();
    let changed = if let Some(group) = matches.get_one::<String>("group") {
        install_group(&roots, &mut settings, &executable, group, matcher)?
    } else {
        let hook_type = matches
            .get_one::<String>("hook-type")
            .ok_or("Hook type argument is required")?;
        validate_hook_type(hook_type)
            .map_err(|e| report_failure("install hook", "cli.install_failed", e))?;
        info!(
            event = "cli.install_started",
            hook_type = hook_type.as_str(),
            hook_event = %event,
            scope = %scope
        );

        let command = build_hook_command(&executable, hook_type, &extra_args);
        let outcome = add_hook_to_settings(&mut settings, event, matcher, &command, timeout);
        println!("{}", outcome.describe(event, matcher));
        outcome.changed()
    };

    if changed {
        save_scope_settings(&roots, scope, &settings)
            .map_err(|e| report_failure("save settings", "cli.install_failed", e))?;
        println!(
            "✅ Saved {} settings: {}",
            scope,
            roots.settings_path(scope).display()
        );
    }

    info!(
        event = "cli.install_completed",
        scope = %scope,
        changed = changed
    );
    Ok(())
}

/// Install one command per job of `group`, each on the event it is declared under.
///
/// Nothing is installed unless every job name forms a valid hook type.
fn install_group(
    roots: &ScopeRoots,
    settings: &mut Settings,
    executable: &str,
    group: &str,
    matcher: &str,
) -> Result<bool, Box<dyn std::error::Error>> {
    let config = load_hooks_config(roots)
        .map_err(|e| report_failure("load hooks config", "cli.install_group_failed", e))?;
    validate_hooks_config(&config)
        .map_err(|e| report_failure("validate hooks config", "cli.install_group_failed", e))?;

    let Some(events) = config.get(group) else {
        eprintln!("❌ No hooks config group named '{}'", group);
        warn!(event = "cli.install_group_missing", group = group);
        return Err(format!("Unknown config group '{}'", group).into());
    };

    let mut planned = Vec::new();
    for (event_name, event_config) in events {
        let Some(event_config) = event_config else {
            continue;
        };
        let event: HookEvent = match event_name.parse() {
            Ok(event) => event,
            Err(e) => {
                eprintln!("⚠️  Skipping '{}' in group '{}': {}", event_name, group, e);
                warn!(
                    event = "cli.install_group_event_skipped",
                    group = group,
                    hook_event = event_name.as_str()
                );
                continue;
            }
        };

        for job in &event_config.jobs {
            let hook_type = config_hook_type(group, &job.name).map_err(|e| {
                report_failure("install config group", "cli.install_group_failed", e)
            })?;
            planned.push((event, hook_type, job.timeout));
        }
    }

    let mut changed = false;
    for (event, hook_type, timeout) in &planned {
        let command = build_hook_command(executable, hook_type, &[]);
        let outcome = add_hook_to_settings(settings, *event, matcher, &command, *timeout);
        println!("{}", outcome.describe(*event, matcher));
        changed |= outcome.changed();
    }
    let installed = planned.len();

    info!(
        event = "cli.install_group_completed",
        group = group,
        jobs = installed
    );
    if installed == 0 {
        println!("Group '{}' defines no jobs.", group);
    }
    Ok(changed)
}
