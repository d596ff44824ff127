use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding extra filter directives, e.g.
/// `BLUES_TRAVELER_LOG=blues_traveler_core::registry=debug`.
pub const LOG_ENV_VAR: &str = "BLUES_TRAVELER_LOG";

/// Directive applied to every `blues_traveler*` target.
///
/// The prefix covers both the CLI and the core crate.
pub fn base_directive(quiet: bool) -> &'static str {
    if quiet {
        "blues_traveler=error"
    } else {
        "blues_traveler=info"
    }
}

fn log_filter(quiet: bool) -> EnvFilter {
    let filter = EnvFilter::builder()
        .with_env_var(LOG_ENV_VAR)
        .from_env_lossy();

    match base_directive(quiet).parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// Initialize JSON logging on stderr.
///
/// `quiet` limits output to error-level events; otherwise info and above.
/// Directives from [`LOG_ENV_VAR`] narrow or widen individual modules.
pub fn init_logging(quiet: bool) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(log_filter(quiet))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::Directive;

    #[test]
    fn test_base_directives_parse() {
        for quiet in [true, false] {
            let directive: Directive = base_directive(quiet).parse().unwrap();
            assert!(directive.to_string().starts_with("blues_traveler="));
        }
        assert!(base_directive(true).ends_with("error"));
        assert!(base_directive(false).ends_with("info"));
    }
}
