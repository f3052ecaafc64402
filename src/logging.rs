//! Tracing setup
//!
//! Logs go to stderr so they never interleave with the transcript on
//! stdout. `RUST_LOG` overrides the verbosity flags.

use tracing_subscriber::EnvFilter;

use crate::cli::Verbosity;

/// Install the global subscriber; later calls are ignored
pub fn init(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_directive()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
