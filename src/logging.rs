//! Tracing subscriber initialization for the CLI and demos.

use tracing_subscriber::{EnvFilter, fmt};

/// Install a global subscriber filtered by `filter`, else `RUST_LOG`, else `info`.
///
/// Output goes to stderr so command output on stdout stays parseable.
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_tracing(filter: Option<&str>) {
    let filter = match filter {
        Some(f) => EnvFilter::new(f),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
