use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{BudgetError, Result};

use super::item::{ExpenseItem, IncomeItem};

/// One month's income and expense rows. Insertion order is display order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonthLedger {
    #[serde(default)]
    pub income: Vec<IncomeItem>,
    #[serde(default)]
    pub expenses: Vec<ExpenseItem>,
}

impl MonthLedger {
    /// Appends a zero-valued income row and returns its id.
    pub fn add_income(&mut self) -> Uuid {
        let item = IncomeItem::empty();
        let id = item.id;
        self.income.push(item);
        id
    }

    /// Appends a zero-valued expense row and returns its id.
    pub fn add_expense(&mut self) -> Uuid {
        let item = ExpenseItem::empty();
        let id = item.id;
        self.expenses.push(item);
        id
    }

    pub fn income_mut(&mut self, id: Uuid) -> Result<&mut IncomeItem> {
        self.income
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(BudgetError::UnknownItem(id, "income"))
    }

    pub fn expense_mut(&mut self, id: Uuid) -> Result<&mut ExpenseItem> {
        self.expenses
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(BudgetError::UnknownItem(id, "expense"))
    }

    /// Removes the income row with the given id, shifting later rows down.
    pub fn remove_income(&mut self, id: Uuid) -> Result<IncomeItem> {
        match self.income.iter().position(|item| item.id == id) {
            Some(index) => Ok(self.income.remove(index)),
            None => Err(BudgetError::UnknownItem(id, "income")),
        }
    }

    /// Removes the expense row with the given id, shifting later rows down.
    pub fn remove_expense(&mut self, id: Uuid) -> Result<ExpenseItem> {
        match self.expenses.iter().position(|item| item.id == id) {
            Some(index) => Ok(self.expenses.remove(index)),
            None => Err(BudgetError::UnknownItem(id, "expense")),
        }
    }

    /// Id of the income row at a 1-based render position.
    ///
    /// Positions are only valid against the current render; callers translate
    /// them to ids immediately and key every mutation by id.
    pub fn income_id_at(&self, position: usize) -> Option<Uuid> {
        position
            .checked_sub(1)
            .and_then(|index| self.income.get(index))
            .map(|item| item.id)
    }

    /// Id of the expense row at a 1-based render position.
    pub fn expense_id_at(&self, position: usize) -> Option<Uuid> {
        position
            .checked_sub(1)
            .and_then(|index| self.expenses.get(index))
            .map(|item| item.id)
    }

    /// Positional removal for the render boundary. An out-of-bounds index is
    /// a stale-render programming error, not a user error.
    pub fn remove_income_at(&mut self, index: usize) -> IncomeItem {
        assert!(
            index < self.income.len(),
            "income index {index} out of bounds (len {})",
            self.income.len()
        );
        self.income.remove(index)
    }

    /// Positional removal for the render boundary; panics when out of bounds.
    pub fn remove_expense_at(&mut self, index: usize) -> ExpenseItem {
        assert!(
            index < self.expenses.len(),
            "expense index {index} out of bounds (len {})",
            self.expenses.len()
        );
        self.expenses.remove(index)
    }

    pub fn is_empty(&self) -> bool {
        self.income.is_empty() && self.expenses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_shifts_later_rows_down() {
        let mut ledger = MonthLedger::default();
        for label in ["a", "b", "c"] {
            let id = ledger.add_income();
            ledger.income_mut(id).unwrap().description = label.into();
        }
        let middle = ledger.income_id_at(2).unwrap();
        ledger.remove_income(middle).unwrap();
        let remaining: Vec<&str> = ledger
            .income
            .iter()
            .map(|item| item.description.as_str())
            .collect();
        assert_eq!(remaining, ["a", "c"]);
    }

    #[test]
    fn stale_id_after_delete_does_not_touch_other_rows() {
        let mut ledger = MonthLedger::default();
        let first = ledger.add_income();
        let second = ledger.add_income();
        ledger.income_mut(second).unwrap().amount = 500.0;

        ledger.remove_income(first).unwrap();
        // The handle captured before the delete is now stale; using it must
        // fail rather than land on the row that shifted into its slot.
        let err = ledger.income_mut(first).unwrap_err();
        assert!(matches!(err, BudgetError::UnknownItem(_, "income")));
        assert_eq!(ledger.income[0].amount, 500.0);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn positional_remove_panics_when_stale() {
        let mut ledger = MonthLedger::default();
        ledger.add_expense();
        ledger.remove_expense_at(3);
    }
}
