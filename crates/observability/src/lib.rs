//! Process-wide tracing/logging setup.

/// Initialize process-wide observability (tracing/logging).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    self::tracing::init(LogFormat::from_env());
}

pub use self::tracing::LogFormat;

/// Tracing configuration (filters, output format).
pub mod tracing;
