use tracing::{error, info};

pub fn log_app_startup() {
    info!(
        event = "core.app.startup_completed",
        version = env!("CARGO_PKG_VERSION")
    );
}

/// A CLI command finished; `ok` is false when it returned an error.
pub fn log_command_finished(command: &str, ok: bool) {
    if ok {
        info!(event = "core.app.command_completed", command = command);
    } else {
        error!(event = "core.app.command_failed", command = command);
    }
}

pub fn log_app_error(error: &dyn std::error::Error) {
    error!(
        event = "core.app.error_occurred",
        error = %error,
        error_type = std::any::type_name_of_val(error)
    );
}
