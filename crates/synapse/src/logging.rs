//! Log file setup.
//!
//! The terminal belongs to the UI, so log output goes to a file in the
//! platform data directory instead of stdout.

use std::{fs::OpenOptions, path::PathBuf, sync::Arc};

use color_eyre::eyre::{Result, WrapErr, eyre};
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "synapse.log";

/// Install the global subscriber. Filtering follows `RUST_LOG` and falls back
/// to `info`. Returns the log file path, or `None` when the platform has no
/// data directory and logging is left off.
pub fn init_tracing() -> Result<Option<PathBuf>> {
    let Some(dir) = synapse_config::data_dir() else {
        return Ok(None);
    };
    std::fs::create_dir_all(&dir)
        .wrap_err_with(|| format!("failed to create data directory {}", dir.display()))?;

    let path = dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|err| eyre!("failed to install tracing subscriber: {err}"))?;

    Ok(Some(path))
}
