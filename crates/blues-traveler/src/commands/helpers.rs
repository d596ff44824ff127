use clap::ArgMatches;
use tracing::error;

use blues_traveler_core::events;
use blues_traveler_core::{ConfigLoader, LoadStrategy, Scope, ScopeRoots, XdgConfig};

/// Name used in hook commands when the running executable cannot be located.
const FALLBACK_EXECUTABLE: &str = "blues-traveler";

/// Resolve the project and global roots, reporting failure to the user.
pub fn scope_roots() -> Result<ScopeRoots, Box<dyn std::error::Error>> {
    ScopeRoots::from_env().map_err(|e| {
        eprintln!("❌ {}", e);
        error!(event = "cli.scope_roots_failed", error = %e);
        events::log_app_error(&e);
        e.into()
    })
}

/// `--global` selects the global scope.
pub fn selected_scope(matches: &ArgMatches) -> Scope {
    if matches.get_flag("global") {
        Scope::Global
    } else {
        Scope::Project
    }
}

pub fn xdg_store(roots: &ScopeRoots) -> XdgConfig {
    XdgConfig::for_home(roots.root(Scope::Global))
}

/// Loader honoring `--strategy`.
pub fn config_loader(
    matches: &ArgMatches,
    roots: ScopeRoots,
) -> Result<ConfigLoader, Box<dyn std::error::Error>> {
    let strategy = match matches.get_one::<String>("strategy") {
        Some(name) => name.parse::<LoadStrategy>()?,
        None => LoadStrategy::default(),
    };
    let xdg = xdg_store(&roots);
    Ok(ConfigLoader::new(roots, xdg, strategy))
}

/// Path of the running executable, for embedding in hook commands.
pub fn current_executable() -> String {
    std::env::current_exe()
        .ok()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| FALLBACK_EXECUTABLE.to_string())
}

/// Report a failed operation to the user and the log, and convert it for `?`.
pub fn report_failure<E>(
    action: &str,
    event: &'static str,
    err: E,
) -> Box<dyn std::error::Error>
where
    E: std::error::Error + Send + Sync + 'static,
{
    eprintln!("❌ Failed to {}: {}", action, err);
    error!(event = event, error = %err);
    events::log_app_error(&err);
    Box::new(err)
}
