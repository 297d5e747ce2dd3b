// src/utils/logging.rs
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise scraper logs at `debug` with
/// `verbose` and `info` without. Output goes to stderr because stdout
/// carries the JSON echo.
pub fn setup_logging(verbose: bool) {
    let default_directive = if verbose { "nla_papers=debug,info" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .init();

    tracing::debug!("Logging setup complete.");
}
