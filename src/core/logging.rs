//! Logging initialization.
//!
//! Installs a `tracing-subscriber` fmt layer writing to stderr so stdout
//! stays clean for piped TSV output. Modules log through the `log` facade.

use tracing_subscriber::EnvFilter;

/// Initialize logging for the CLI driver.
///
/// Respects `RUST_LOG`; defaults to `info` for this crate and `warn` for
/// dependencies. Safe to call once at startup; later calls are ignored.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,twlgen=info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
