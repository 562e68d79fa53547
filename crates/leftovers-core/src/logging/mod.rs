//! Process-wide tracing subscriber setup.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Install the JSON tracing subscriber on stderr.
///
/// `quiet` keeps only warnings and errors; otherwise `info` and above are
/// emitted. `RUST_LOG` takes precedence over both. Calling this more than once
/// is harmless: later calls leave the first subscriber in place.
pub fn init_logging(quiet: bool) {
    let default_directive = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().with_writer(std::io::stderr))
        .try_init();
}
