//! Logging setup for the tracing ecosystem.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// Respects `RUST_LOG`, falling back to the provided default directive.
/// Output goes to stderr with targets. Call once at startup from whatever
/// shell drives the library.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter.to_string()));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[cfg(test)]
mod tests {
    /// Initialize tracing for tests (warnings and above, test writer).
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("warn")
            .with_test_writer()
            .try_init();
    }

    #[test]
    fn test_subscriber_initializes_once() {
        init_test_tracing();
        init_test_tracing();
    }
}
