use std::{
    env, fs,
    path::{Path, PathBuf},
};

use dirs::home_dir;

use crate::errors::Result;

const DEFAULT_DIR_NAME: &str = ".figaro";
const SLOT_FILE: &str = "budget.json";
const BACKUP_DIR: &str = "backups";

/// Application data directory: `FIGARO_HOME` when set, else `~/.figaro`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("FIGARO_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// The single persisted slot holding the whole multi-year store.
pub fn slot_file_in(base: &Path) -> PathBuf {
    base.join(SLOT_FILE)
}

/// Directory for exported backup documents.
pub fn backups_dir_in(base: &Path) -> PathBuf {
    base.join(BACKUP_DIR)
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)?;
    Ok(())
}
