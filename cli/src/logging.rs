//! Diagnostic logging setup.
//!
//! Logs go to stderr so they never mix with rendered command output.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding an explicit filter directive.
pub const LOG_ENV: &str = "BROADCAST_ADMIN_LOG";

/// Maps a `-v` count to a filter level.
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Builds the filter: [`LOG_ENV`] wins over the verbosity count.
pub fn build_env_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbosity)))
}

/// Installs the global subscriber. Subsequent calls are no-ops.
pub fn init_logging(verbosity: u8) {
    let _ = tracing_subscriber::registry()
        .with(build_env_filter(verbosity))
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}
