use clap::ArgMatches;
use tracing::error;

use blues_traveler_core::events;

pub mod helpers;

mod completions;
mod config;
mod install;
mod list;
mod migrate;
mod plugin;
mod uninstall;

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup();

    let Some((name, sub_matches)) = matches.subcommand() else {
        error!(event = "cli.command_missing");
        return Err("No command given".into());
    };

    let result = match name {
        "install" => install::handle_install_command(sub_matches),
        "uninstall" => uninstall::handle_uninstall_command(sub_matches),
        "list" => list::handle_list_command(sub_matches),
        "plugin" => plugin::handle_plugin_command(sub_matches),
        "config" => config::handle_config_command(sub_matches),
        "completions" => completions::handle_completions_command(sub_matches),
        _ => {
            error!(event = "cli.command_unknown", command = name);
            Err("Unknown command".into())
        }
    };

    events::log_command_finished(name, result.is_ok());
    result
}
