//! Process-wide tracing setup shared by the portal binaries.

/// Initialize tracing/logging with the default `info` filter.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init("info");
}

/// Tracing configuration (filters, formatting).
pub mod tracing;
