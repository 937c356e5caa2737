//! Subscriber setup for the `tracing` events the engine emits.

use tracing_subscriber::{fmt, EnvFilter};

/// Install a formatting subscriber at `level`.
///
/// `RUST_LOG` takes precedence when it is set, e.g. `RUST_LOG=drawx=debug`.
/// Calling this more than once is harmless; later calls are ignored.
///
/// # Examples
/// ```no_run
/// drawx::logging::init("info");
/// ```
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Install a debug-level subscriber that writes through the test harness.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
