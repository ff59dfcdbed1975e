use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::core::utils::{app_data_dir, backups_dir_in, ensure_dir, slot_file_in};
use crate::errors::{BudgetError, Result};
use crate::ledger::{BudgetBook, Month};

use super::{LoadOutcome, StorageBackend};

const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M";
const TMP_SUFFIX: &str = "tmp";

pub const BACKUP_SCHEMA_VERSION: u32 = 1;

/// Self-describing snapshot for manual backup and restore.
///
/// Field names match previously exported documents:
/// `allYearsData` carries the full store, `currentMonth` and `selectedYear`
/// the selection to restore. `schemaVersion` is ours; documents without it
/// read as version 1, newer versions are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub all_years_data: BudgetBook,
    #[serde(default)]
    pub current_month: Option<Month>,
    #[serde(default)]
    pub selected_year: Option<i32>,
}

fn default_schema_version() -> u32 {
    BACKUP_SCHEMA_VERSION
}

impl BackupDocument {
    pub fn new(book: BudgetBook, current_month: Month, selected_year: i32) -> Self {
        Self {
            schema_version: BACKUP_SCHEMA_VERSION,
            all_years_data: book,
            current_month: Some(current_month),
            selected_year: Some(selected_year),
        }
    }
}

/// JSON persistence: one slot file for the live store plus a backups
/// directory for exported documents.
#[derive(Clone)]
pub struct JsonStorage {
    slot_file: PathBuf,
    backups_dir: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let base = root.unwrap_or_else(app_data_dir);
        ensure_dir(&base)?;
        let backups_dir = backups_dir_in(&base);
        ensure_dir(&backups_dir)?;
        Ok(Self {
            slot_file: slot_file_in(&base),
            backups_dir,
        })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn slot_path(&self) -> &Path {
        &self.slot_file
    }
}

impl StorageBackend for JsonStorage {
    fn save(&self, book: &BudgetBook) -> Result<()> {
        let json = serde_json::to_string_pretty(book)?;
        let tmp = tmp_path(&self.slot_file);
        write_text(&tmp, &json)?;
        fs::rename(&tmp, &self.slot_file)?;
        tracing::debug!(path = %self.slot_file.display(), "budget slot overwritten");
        Ok(())
    }

    fn load(&self) -> LoadOutcome {
        if !self.slot_file.exists() {
            return LoadOutcome::default();
        }
        let data = match fs::read_to_string(&self.slot_file) {
            Ok(data) => data,
            Err(err) => {
                let reason = format!("slot unreadable: {err}");
                tracing::warn!(path = %self.slot_file.display(), %reason, "starting from an empty book");
                return LoadOutcome {
                    book: BudgetBook::new(),
                    degraded: Some(reason),
                };
            }
        };
        match serde_json::from_str(&data) {
            Ok(book) => LoadOutcome {
                book,
                degraded: None,
            },
            Err(err) => {
                let reason = format!("slot malformed: {err}");
                tracing::warn!(path = %self.slot_file.display(), %reason, "starting from an empty book");
                LoadOutcome {
                    book: BudgetBook::new(),
                    degraded: Some(reason),
                }
            }
        }
    }

    fn export_backup(&self, document: &BackupDocument, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(document)?;
        write_text(path, &json)?;
        Ok(())
    }

    fn import_backup(&self, path: &Path) -> Result<BackupDocument> {
        let data = fs::read_to_string(path).map_err(|err| {
            BudgetError::InvalidBackup(format!("`{}` unreadable: {err}", path.display()))
        })?;
        let document: BackupDocument = serde_json::from_str(&data).map_err(|err| {
            BudgetError::InvalidBackup(format!("`{}` malformed: {err}", path.display()))
        })?;
        if document.schema_version > BACKUP_SCHEMA_VERSION {
            return Err(BudgetError::InvalidBackup(format!(
                "schema v{} is newer than supported v{}",
                document.schema_version, BACKUP_SCHEMA_VERSION
            )));
        }
        Ok(document)
    }

    fn default_backup_path(&self) -> PathBuf {
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT);
        self.backups_dir.join(format!("figaro_{timestamp}.json"))
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_text(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn storage_with_temp_dir() -> (JsonStorage, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let storage = JsonStorage::new(Some(temp.path().to_path_buf())).expect("json storage");
        (storage, temp)
    }

    fn sample_book() -> BudgetBook {
        let mut book = BudgetBook::new();
        let ledger = book.ensure_month(2025, Month::January);
        let id = ledger.add_income();
        ledger.income_mut(id).unwrap().description = "Sueldo".into();
        ledger.income_mut(id).unwrap().amount = 850_000.0;
        book
    }

    #[test]
    fn save_and_load_roundtrip() {
        let (storage, _guard) = storage_with_temp_dir();
        storage.save(&sample_book()).expect("save book");
        let outcome = storage.load();
        assert!(outcome.degraded.is_none());
        let ledger = outcome.book.month(2025, Month::January).expect("month");
        assert_eq!(ledger.income[0].description, "Sueldo");
    }

    #[test]
    fn missing_slot_loads_empty() {
        let (storage, _guard) = storage_with_temp_dir();
        let outcome = storage.load();
        assert!(outcome.book.is_empty());
        assert!(outcome.degraded.is_none());
    }

    #[test]
    fn malformed_slot_degrades_to_empty() {
        let (storage, _guard) = storage_with_temp_dir();
        fs::write(storage.slot_path(), "{not json").unwrap();
        let outcome = storage.load();
        assert!(outcome.book.is_empty());
        assert!(outcome.degraded.unwrap().contains("malformed"));
    }

    #[test]
    fn backup_document_roundtrips_with_legacy_field_names() {
        let (storage, guard) = storage_with_temp_dir();
        let document = BackupDocument::new(sample_book(), Month::March, 2025);
        let path = guard.path().join("export.json");
        storage.export_backup(&document, &path).expect("export");

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"allYearsData\""));
        assert!(raw.contains("\"currentMonth\": \"Marzo\""));
        assert!(raw.contains("\"selectedYear\": 2025"));

        let imported = storage.import_backup(&path).expect("import");
        assert_eq!(imported.current_month, Some(Month::March));
        assert_eq!(imported.selected_year, Some(2025));
        assert!(imported.all_years_data.month(2025, Month::January).is_some());
    }

    #[test]
    fn import_rejects_newer_schema_versions() {
        let (storage, guard) = storage_with_temp_dir();
        let path = guard.path().join("future.json");
        fs::write(
            &path,
            format!(
                "{{\"schemaVersion\": {}, \"allYearsData\": {{}}}}",
                BACKUP_SCHEMA_VERSION + 1
            ),
        )
        .unwrap();
        let err = storage.import_backup(&path).expect_err("newer schema");
        assert!(matches!(err, BudgetError::InvalidBackup(_)));
    }

    #[test]
    fn import_rejects_unknown_month_labels() {
        let (storage, guard) = storage_with_temp_dir();
        let path = guard.path().join("bad-month.json");
        fs::write(
            &path,
            "{\"allYearsData\": {}, \"currentMonth\": \"Smarch\"}",
        )
        .unwrap();
        let err = storage.import_backup(&path).expect_err("unknown month");
        assert!(matches!(err, BudgetError::InvalidBackup(_)));
    }
}
