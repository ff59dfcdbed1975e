use std::path::{Path, PathBuf};

use chrono::Datelike;
use uuid::Uuid;

use crate::errors::{BudgetError, Result};
use crate::ledger::{BudgetBook, ExpenseItem, IncomeItem, Month, MonthLedger};
use crate::storage::{BackupDocument, StorageBackend};

const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 2100;

static EMPTY_LEDGER: MonthLedger = MonthLedger {
    income: Vec::new(),
    expenses: Vec::new(),
};

/// Owns the live book, the current selection, and the storage backend.
///
/// This is the explicit context the rest of the application works through;
/// there is no process-wide state. Every mutating operation overwrites the
/// persisted slot with the whole book before returning.
pub struct BookManager {
    book: BudgetBook,
    current_month: Month,
    selected_year: i32,
    storage: Box<dyn StorageBackend>,
}

impl BookManager {
    /// Loads the slot (degrading to an empty book), selects the current
    /// calendar year, and makes sure all twelve of its months exist.
    pub fn open(storage: Box<dyn StorageBackend>) -> Self {
        let outcome = storage.load();
        if let Some(reason) = &outcome.degraded {
            tracing::warn!(%reason, "persisted data discarded");
        }
        let mut manager = Self {
            book: outcome.book,
            current_month: Month::January,
            selected_year: chrono::Local::now().year(),
            storage,
        };
        manager.populate_selected_year();
        manager
    }

    fn populate_selected_year(&mut self) {
        let year = self.book.ensure_year(self.selected_year);
        for month in Month::ALL {
            year.ensure_month(month);
        }
    }

    pub fn book(&self) -> &BudgetBook {
        &self.book
    }

    pub fn current_month(&self) -> Month {
        self.current_month
    }

    pub fn selected_year(&self) -> i32 {
        self.selected_year
    }

    /// The selected month's ledger. Selection always ensures the month
    /// exists, so the empty fallback is never observable through this path.
    pub fn current_ledger(&self) -> &MonthLedger {
        self.book
            .month(self.selected_year, self.current_month)
            .unwrap_or(&EMPTY_LEDGER)
    }

    fn current_ledger_mut(&mut self) -> &mut MonthLedger {
        self.book.ensure_month(self.selected_year, self.current_month)
    }

    /// Switches the selection to `month`, creating it if needed. Selection
    /// alone is not persisted; the next mutation writes everything anyway.
    pub fn select_month(&mut self, month: Month) {
        self.book.ensure_month(self.selected_year, month);
        self.current_month = month;
    }

    /// Switches to `year`, creating it and its twelve months if needed.
    pub fn select_year(&mut self, year: i32) -> Result<()> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(BudgetError::InvalidInput(format!(
                "year {year} outside {MIN_YEAR}-{MAX_YEAR}"
            )));
        }
        self.selected_year = year;
        self.populate_selected_year();
        Ok(())
    }

    pub fn add_income(&mut self) -> Result<Uuid> {
        let id = self.current_ledger_mut().add_income();
        self.save()?;
        Ok(id)
    }

    pub fn add_expense(&mut self) -> Result<Uuid> {
        let id = self.current_ledger_mut().add_expense();
        self.save()?;
        Ok(id)
    }

    pub fn rename_income(&mut self, id: Uuid, description: &str) -> Result<()> {
        self.current_ledger_mut().income_mut(id)?.description = description.to_string();
        self.save()
    }

    pub fn set_income_amount(&mut self, id: Uuid, amount: f64) -> Result<()> {
        self.current_ledger_mut().income_mut(id)?.amount = amount;
        self.save()
    }

    pub fn rename_expense(&mut self, id: Uuid, description: &str) -> Result<()> {
        self.current_ledger_mut().expense_mut(id)?.description = description.to_string();
        self.save()
    }

    pub fn set_expense_amount(&mut self, id: Uuid, amount: f64) -> Result<()> {
        self.current_ledger_mut().expense_mut(id)?.amount = amount;
        self.save()
    }

    pub fn set_expense_percentage(&mut self, id: Uuid, percentage: f64) -> Result<()> {
        self.current_ledger_mut().expense_mut(id)?.percentage = percentage;
        self.save()
    }

    pub fn delete_income(&mut self, id: Uuid) -> Result<IncomeItem> {
        let removed = self.current_ledger_mut().remove_income(id)?;
        self.save()?;
        Ok(removed)
    }

    pub fn delete_expense(&mut self, id: Uuid) -> Result<ExpenseItem> {
        let removed = self.current_ledger_mut().remove_expense(id)?;
        self.save()?;
        Ok(removed)
    }

    /// Seeds next month from the current one and moves the selection there.
    pub fn carry_forward(&mut self) -> Result<Month> {
        let next = crate::core::services::TransferService::carry_forward(
            &mut self.book,
            self.selected_year,
            self.current_month,
        )?;
        self.current_month = next;
        self.save()?;
        Ok(next)
    }

    /// Writes a backup document to `path`, or to a timestamped file under
    /// the backups directory when no path is given.
    pub fn export_backup(&self, path: Option<&Path>) -> Result<PathBuf> {
        let document =
            BackupDocument::new(self.book.clone(), self.current_month, self.selected_year);
        let target = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.storage.default_backup_path());
        self.storage.export_backup(&document, &target)?;
        Ok(target)
    }

    /// Replaces the whole store from a backup document. The live store stays
    /// untouched unless validation succeeds.
    pub fn import_backup(&mut self, path: &Path) -> Result<()> {
        let document = self.storage.import_backup(path)?;
        self.book = document.all_years_data;
        if let Some(year) = document.selected_year {
            self.selected_year = year;
        }
        if let Some(month) = document.current_month {
            self.current_month = month;
        }
        self.populate_selected_year();
        self.book.ensure_month(self.selected_year, self.current_month);
        self.save()
    }

    fn save(&self) -> Result<()> {
        self.storage.save(&self.book)
    }
}
