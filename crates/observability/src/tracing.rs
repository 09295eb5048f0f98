//! Tracing/logging initialization.
//!
//! Every entry point uses `try_init`, so whichever runs first wins and later
//! calls are no-ops. The filter comes from `RUST_LOG`, defaulting to `info`
//! (`warn` for tests).

use tracing_subscriber::EnvFilter;

use crate::format::LogFormat;

fn filter_or(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// JSON logs + timestamps, configurable via RUST_LOG.
pub fn init() {
    init_with(LogFormat::Json);
}

pub fn init_with(format: LogFormat) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter_or("info"))
        .with_target(false);

    let _ = match format {
        LogFormat::Json => builder
            .json()
            .with_timer(tracing_subscriber::fmt::time::SystemTime)
            .try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };
}

pub fn init_for_tests() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_or("warn"))
        .with_test_writer()
        .compact()
        .try_init();
}
