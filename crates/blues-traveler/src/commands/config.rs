use clap::ArgMatches;
use tracing::{error, info};

use blues_traveler_core::codec;
use blues_traveler_core::hooks::{
    HooksConfigSource, load_hooks_config_with_source, validate_hooks_config,
};
use blues_traveler_core::{ConfigFormat, migration_ops};

use super::helpers::{config_loader, report_failure, scope_roots, xdg_store};
use super::migrate::handle_migrate_command;

pub(crate) fn handle_config_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    match matches.subcommand() {
        Some(("show", sub_matches)) => handle_show(sub_matches),
        Some(("hooks", sub_matches)) => handle_hooks(sub_matches),
        Some(("validate", _)) => handle_validate(),
        Some(("migrate", sub_matches)) => handle_migrate_command(sub_matches),
        Some(("status", _)) => handle_status(),
        Some(("cleanup", _)) => handle_cleanup(),
        _ => {
            error!(event = "cli.config_subcommand_unknown");
            Err("Unknown config subcommand".into())
        }
    }
}

fn handle_show(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let global = matches.get_flag("global");
    let format: ConfigFormat = matches
        .get_one::<String>("format")
        .ok_or("Format argument is required")?
        .parse()?;

    let roots = scope_roots()?;
    let project = roots.project_root.clone();
    let loader = config_loader(matches, roots)?;

    let loaded = if global {
        loader.load_global_config_with_source()
    } else {
        loader.load_project_config_with_source(&project)
    };
    let (document, source) =
        loaded.map_err(|e| report_failure("load config", "cli.config_show_failed", e))?;

    eprintln!("Source: {} (strategy: {})", source, loader.strategy());
    if document.is_empty() {
        println!("{{}}");
    } else {
        println!("{}", codec::serialize(&document, format)?.trim_end());
    }

    info!(
        event = "cli.config_show_completed",
        global = global,
        strategy = %loader.strategy(),
        keys = document.len()
    );
    Ok(())
}

fn handle_hooks(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");
    let roots = scope_roots()?;

    let loaded = load_hooks_config_with_source(&roots)
        .map_err(|e| report_failure("load hooks config", "cli.config_hooks_failed", e))?;

    match &loaded.source {
        HooksConfigSource::Embedded(path) => {
            eprintln!("Source: customHooks embedded in {}", path.display());
        }
        HooksConfigSource::Files(files) if files.is_empty() => {
            eprintln!("Source: no hooks config files found");
        }
        HooksConfigSource::Files(files) => {
            eprintln!("Source files (highest precedence first):");
            for file in files {
                eprintln!("  {}", file.display());
            }
        }
    }

    let format = if json_output {
        ConfigFormat::Json
    } else {
        ConfigFormat::Yaml
    };
    println!("{}", codec::serialize(&loaded.config, format)?.trim_end());

    info!(
        event = "cli.config_hooks_completed",
        groups = loaded.config.len()
    );
    Ok(())
}

fn handle_validate() -> Result<(), Box<dyn std::error::Error>> {
    let roots = scope_roots()?;
    let config = load_hooks_config_with_source(&roots)
        .map_err(|e| report_failure("load hooks config", "cli.config_validate_failed", e))?
        .config;

    validate_hooks_config(&config)
        .map_err(|e| report_failure("validate hooks config", "cli.config_validate_failed", e))?;

    let jobs: usize = config
        .values()
        .flat_map(|group| group.values())
        .flatten()
        .map(|event| event.jobs.len())
        .sum();
    println!(
        "✅ Hooks config is valid ({} group(s), {} job(s))",
        config.len(),
        jobs
    );
    info!(
        event = "cli.config_validate_completed",
        groups = config.len(),
        jobs = jobs
    );
    Ok(())
}

fn handle_status() -> Result<(), Box<dyn std::error::Error>> {
    let roots = scope_roots()?;
    let xdg = xdg_store(&roots);
    let status = migration_ops::migration_status(&xdg, &roots.project_root)
        .map_err(|e| report_failure("read migration status", "cli.config_status_failed", e))?;

    println!("Project:       {}", status.project);
    println!(
        "Legacy config: {} ({})",
        status.legacy_path.display(),
        if status.legacy_exists { "present" } else { "absent" }
    );
    match &status.xdg_config_file {
        Some(path) => println!("XDG config:    {} (registered)", path.display()),
        None => println!("XDG config:    not registered"),
    }
    if status.needs_migration() {
        println!("Run 'blues-traveler config migrate' to move it into the registry.");
    }

    info!(
        event = "cli.config_status_completed",
        registered = status.registered,
        legacy_exists = status.legacy_exists
    );
    Ok(())
}

fn handle_cleanup() -> Result<(), Box<dyn std::error::Error>> {
    let roots = scope_roots()?;
    let xdg = xdg_store(&roots);
    let removed = xdg
        .cleanup_orphaned_configs()
        .map_err(|e| report_failure("clean up registry", "cli.config_cleanup_failed", e))?;

    if removed.is_empty() {
        println!("No orphaned project configs found.");
    } else {
        println!("Removed {} orphaned project config(s):", removed.len());
        for project in &removed {
            println!("  {}", project);
        }
    }

    info!(event = "cli.config_cleanup_completed", removed = removed.len());
    Ok(())
}
