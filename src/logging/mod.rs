//! Logging initialization for `benchdiff`.
//!
//! Log lines go to stderr so stdout stays reserved for the report tables.
//! Verbosity is driven by `-v`/`-q`; `RUST_LOG` overrides both.

use crate::error::Result;
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// Levels: `-q` shows errors only, the default shows progress (`info`),
/// `-v` adds `debug`, `-vv` adds `trace`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(verbose: u8, quiet: bool) -> Result<()> {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("benchdiff={default_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    Ok(())
}
