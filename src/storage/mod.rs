pub mod json_backend;

use std::path::{Path, PathBuf};

use crate::errors::Result;
use crate::ledger::BudgetBook;

pub use json_backend::{BackupDocument, JsonStorage, BACKUP_SCHEMA_VERSION};

/// What came out of the persisted slot at startup.
///
/// Loading never fails: a missing slot yields an empty book, and an
/// unreadable or malformed one degrades to empty with the reason recorded.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub book: BudgetBook,
    pub degraded: Option<String>,
}

/// Abstraction over persistence backends for the budget slot and its
/// transportable backup documents.
pub trait StorageBackend: Send + Sync {
    /// Overwrites the slot with the whole book. Called after every mutation.
    fn save(&self, book: &BudgetBook) -> Result<()>;

    fn load(&self) -> LoadOutcome;

    fn export_backup(&self, document: &BackupDocument, path: &Path) -> Result<()>;

    /// Parses and validates a backup document without touching the slot.
    fn import_backup(&self, path: &Path) -> Result<BackupDocument>;

    /// Timestamped default location for a new export.
    fn default_backup_path(&self) -> PathBuf;
}
