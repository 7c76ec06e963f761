//! Logging setup shared by the server and the admin CLI.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber.
///
/// `log_level` is an `EnvFilter` directive string (e.g. `info` or
/// `shortlink=debug,tower_http=info`). `log_format` is `text` or `json`.
///
/// # Errors
///
/// Returns an error if the filter directive is malformed or a subscriber is
/// already installed.
pub fn init(log_level: &str, log_format: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level)?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = if log_format == "json" {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {e}"))
}
