use std::path::PathBuf;

use clap::ArgMatches;
use tracing::{error, info};

use blues_traveler_core::migration::{
    MigrationOptions, MigrationResult, ProgressReporter, ProjectOutcome, default_search_roots,
};
use blues_traveler_core::{Scope, migration_ops};

use super::helpers::{scope_roots, xdg_store};

/// Prints migration progress to stdout.
struct ConsoleProgress {
    dry_run: bool,
}

impl ProgressReporter for ConsoleProgress {
    fn discovery_started(&self, roots: &[PathBuf]) {
        for root in roots {
            println!("🔍 Searching {}", root.display());
        }
    }

    fn discovery_finished(&self, found: usize) {
        println!("Found {} legacy config(s)", found);
    }

    fn project_started(&self, index: usize, total: usize, project: &str) {
        let percent = (index + 1) * 100 / total.max(1);
        print!("[{:>3}%] {} ... ", percent, project);
    }

    fn project_finished(&self, _project: &str, outcome: &ProjectOutcome) {
        match outcome {
            ProjectOutcome::Skipped => println!("skipped (already registered)"),
            ProjectOutcome::Migrated { .. } if self.dry_run => println!("would migrate"),
            ProjectOutcome::Migrated { .. } => println!("migrated"),
            ProjectOutcome::Failed { message } => println!("failed: {}", message),
        }
    }
}

pub(crate) fn handle_migrate_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let dry_run = matches.get_flag("dry-run");
    let roots = scope_roots()?;
    let home = roots.root(Scope::Global).to_path_buf();

    let search_roots: Vec<PathBuf> = match matches.get_many::<PathBuf>("paths") {
        Some(paths) => paths.cloned().collect(),
        None => default_search_roots(&home),
    };

    info!(
        event = "cli.migrate_started",
        roots = search_roots.len(),
        dry_run = dry_run
    );

    let xdg = xdg_store(&roots);
    let options = MigrationOptions {
        search_roots,
        dry_run,
        home_dir: Some(home),
    };
    let result = migration_ops::migrate_legacy_configs(&xdg, &options, &ConsoleProgress { dry_run });

    println!();
    print!("{}", result.summary());
    if !dry_run && !result.migrated.is_empty() {
        println!("Registry: {}", xdg.registry_path().display());
    }

    finish(&result)
}

fn finish(result: &MigrationResult) -> Result<(), Box<dyn std::error::Error>> {
    if result.is_success() {
        info!(
            event = "cli.migrate_completed",
            migrated = result.migrated.len(),
            skipped = result.skipped.len()
        );
        Ok(())
    } else {
        error!(
            event = "cli.migrate_partial_failure",
            failed = result.errors.len()
        );
        Err(format!(
            "Migration finished with {} error(s)",
            result.errors.len()
        )
        .into())
    }
}
