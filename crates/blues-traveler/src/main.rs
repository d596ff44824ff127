use blues_traveler_core::init_logging;

mod app;
mod commands;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = app::build_cli().get_matches();

    // Logs stay at error level unless -v is given.
    init_logging(!matches.get_flag("verbose"));

    commands::run_command(&matches)
}
