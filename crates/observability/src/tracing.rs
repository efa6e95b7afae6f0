//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Environment variable carrying the filter directives.
pub const LOG_ENV: &str = "RUST_LOG";

/// Build the filter: `RUST_LOG` when set and valid, else `default_directive`.
pub fn filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Install the JSON subscriber.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(default_directive: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(default_directive))
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
