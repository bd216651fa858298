//! Diagnostics setup.

use std::{fs::OpenOptions, io, path::Path, sync::Mutex};

use color_eyre::eyre::{Result, WrapErr as _};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "labyrintime=info";

/// Filter used for standard error in plain mode when `RUST_LOG` is not set.
const STDERR_FILTER: &str = "labyrintime=warn";

/// Installs the global tracing subscriber.
///
/// With a log file, events are appended to it without colour codes. Without one, plain mode
/// reports warnings on standard error, while the full-screen interface installs nothing so that
/// the terminal is left alone.
///
/// # Errors
///
/// Fails if the log file cannot be opened or a global subscriber is already installed.
pub fn init(log_file: Option<&Path>, plain: bool) -> Result<()> {
    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;

            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(true)
                    .compact()
                    .with_writer(Mutex::new(file))
                    .with_filter(filter(DEFAULT_FILTER)),
            )
        }
        None => None,
    };

    let stderr_layer = (plain && file_layer.is_none()).then(|| {
        fmt::layer()
            .with_target(false)
            .compact()
            .with_writer(io::stderr)
            .with_filter(filter(STDERR_FILTER))
    });

    if file_layer.is_none() && stderr_layer.is_none() {
        return Ok(());
    }

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()?;

    Ok(())
}

/// Builds the event filter from `RUST_LOG`, falling back to `default`.
fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}
