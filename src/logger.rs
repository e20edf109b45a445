use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Environment variables consulted for the log filter, in priority order.
const LOG_ENV_VARS: [&str; 2] = ["BENCHPAIR_LOG", "RUST_LOG"];

pub fn init_logging(verbose: bool, no_color: bool) {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(build_filter(verbose))
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}

fn build_filter(verbose: bool) -> EnvFilter {
    LOG_ENV_VARS
        .iter()
        .find_map(|name| std::env::var(name).ok())
        .map_or_else(
            || EnvFilter::new(default_directive(verbose)),
            |value| EnvFilter::try_new(value).unwrap_or_else(|_| EnvFilter::new("info")),
        )
}

const fn default_directive(verbose: bool) -> &'static str {
    if verbose { "benchpair=debug,info" } else { "info" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_logging_is_idempotent() {
        init_logging(false, true);
        init_logging(true, true);
    }

    #[test]
    fn verbose_enables_debug_for_this_crate_only() {
        assert_eq!(default_directive(true), "benchpair=debug,info");
        assert!(EnvFilter::try_new(default_directive(true)).is_ok());
        assert_eq!(default_directive(false), "info");
    }
}
