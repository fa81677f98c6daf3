//! Logger setup
//!
//! CLI commands log to stderr. The TUI owns the terminal, so while it runs
//! log records go to `~/.pricedash/pricedash.log` instead.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use env_logger::{Builder, Env, Target, WriteStyle};

use crate::types::{PricedashError, Result};

/// Filter used when `RUST_LOG` is unset
const DEFAULT_FILTER: &str = "warn";

const LOG_FILE_NAME: &str = "pricedash.log";

fn builder() -> Builder {
    Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER))
}

/// Log to stderr
pub fn init_stderr() {
    // A logger may already be installed (tests, repeated init)
    let _ = builder().try_init();
}

/// Log to the given file, appending
pub fn init_file(path: &Path) -> Result<()> {
    let file = open_log_file(path)?;
    let _ = builder()
        .target(Target::Pipe(Box::new(file)))
        .write_style(WriteStyle::Never)
        .try_init();
    Ok(())
}

/// `~/.pricedash/pricedash.log`
pub fn default_log_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new()
        .ok_or_else(|| PricedashError::Config("Cannot determine home directory".into()))?;
    Ok(base_dirs
        .home_dir()
        .join(".pricedash")
        .join(LOG_FILE_NAME))
}

/// Open for appending, creating parent directories as needed
pub fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(file)
}
