//! File logging.
//!
//! Stdout belongs to the TUI, so log records go to a file or nowhere.

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::{ClientConfig, DEFAULT_LOG_FILTER};

/// Where logging ended up after [`init`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Writing to this file
    File(String),
    /// No log file configured, or it could not be opened
    Disabled,
    /// A global subscriber was already installed
    AlreadyInstalled,
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Build the filter, falling back to the default directive when `filter`
/// does not parse.
pub fn env_filter(filter: &str) -> EnvFilter {
    EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(config: &ClientConfig) -> LogTarget {
    let Some(path) = config.log_file.as_deref() else {
        return LogTarget::Disabled;
    };
    let file = match open_log_file(path) {
        Ok(file) => file,
        Err(_) => return LogTarget::Disabled,
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter(&config.log_filter))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init();

    match installed {
        Ok(()) => {
            tracing::info!(version = env!("CARGO_PKG_VERSION"), "Logging started");
            LogTarget::File(path.display().to_string())
        }
        Err(_) => LogTarget::AlreadyInstalled,
    }
}
