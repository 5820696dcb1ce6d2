//! Logging bootstrap for the emulator
//!
//! Call [`init`] once at startup. Filtering is controlled through the
//! standard `RUST_LOG` environment variable, defaulting to `info`.

use tracing_subscriber::{fmt, EnvFilter};

/// Initialise the global tracing subscriber.
///
/// Safe to call more than once; later calls are ignored.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
