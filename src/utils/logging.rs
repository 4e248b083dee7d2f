//! Diagnostic logging
//!
//! Everything goes to stderr; stdout is reserved for command output.

use tracing_subscriber::EnvFilter;

/// Install the global stderr subscriber
///
/// `RUST_LOG` wins when set. Otherwise the crate logs at debug level when `debug`
/// is on and only warnings when it is off.
pub fn init(debug: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if debug { "warn,session_enricher=debug" } else { "warn" })
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .try_init();
}

/// Initialize logging for tests (captured by the test harness)
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
