//! Logging initialization.
//!
//! Hosts embedding the SDK call [`init_logging`] once at startup; all SDK
//! internals emit through `tracing` and inherit whatever subscriber the
//! host installs.

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize the logging subsystem.
///
/// Configures tracing with the specified log level, writing to stderr so
/// protocol output on stdout stays clean. Calling this twice is an error in
/// `tracing-subscriber`; hosts that install their own subscriber should skip
/// it.
pub fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
