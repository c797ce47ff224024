//! File logging. The terminal belongs to the UI, so logs go to disk.

use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Mutex;

use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "cinefx.log";
const LOG_ENV: &str = "CINEFX_LOG";

/// Install the global subscriber. Returns the log path, or `None` when no data
/// directory is available and logging stays off.
pub fn init() -> Option<PathBuf> {
    let dir = ProjectDirs::from("", "", "cinefx")?.data_local_dir().to_path_buf();
    fs::create_dir_all(&dir).ok()?;
    let path = dir.join(LOG_FILE);
    let file = File::create(&path).ok()?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .ok()?;
    Some(path)
}
