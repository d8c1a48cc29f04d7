// src/log.rs
use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt};

use crate::config::consts::{LOG_FILE, STORE_DIR};

const DEFAULT_DIRECTIVE: &str = "coin_scrape=info";

/// Where log lines go.
pub enum LogTarget {
    /// Append to a file (the GUI has no terminal to speak of).
    File(PathBuf),
    Stderr,
}

impl LogTarget {
    /// `.store/debug.log`
    pub fn default_file() -> Self {
        LogTarget::File(PathBuf::from(STORE_DIR).join(LOG_FILE))
    }
}

/// `RUST_LOG` wins when set; otherwise `coin_scrape=info`.
pub fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Install the global subscriber. Timestamps are elapsed time since start.
/// A second call is a no-op.
pub fn init(target: LogTarget) -> io::Result<()> {
    let builder = fmt()
        .with_env_filter(filter())
        .with_timer(fmt::time::uptime())
        .with_target(false);

    let installed = match target {
        LogTarget::File(path) => {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(dir)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
        LogTarget::Stderr => builder.with_writer(io::stderr).try_init(),
    };

    if installed.is_err() {
        tracing::debug!("log subscriber already installed");
    }
    Ok(())
}
