//! Tracing setup for the CLI

pub use tracing::{debug, error, info, warn};

/// Initialize the tracing subscriber with environment filter support.
///
/// Logs at INFO level and above by default, to stderr. Control the level
/// with `RUST_LOG`:
///
/// ```bash
/// RUST_LOG=debug sftpsync push /srv/data ./data
/// RUST_LOG=sftpsync::sync=debug sftpsync pull /srv/data ./data
/// ```
pub fn init_tracing() {
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
		)
		.with_writer(std::io::stderr)
		.init();
}

// vim: ts=4
