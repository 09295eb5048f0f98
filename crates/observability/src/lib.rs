//! Tracing/logging setup shared by sessions and tests.

/// Log output formats.
pub mod format;

/// Tracing subscriber initialization (filters, formatting layers).
pub mod tracing;

pub use format::{LogFormat, UnknownLogFormat};

/// Initialize process-wide JSON logging.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Initialize process-wide logging in the chosen format.
pub fn init_with(format: LogFormat) {
    tracing::init_with(format);
}

/// Compact logs routed through the test harness' captured output.
pub fn init_for_tests() {
    tracing::init_for_tests();
}
