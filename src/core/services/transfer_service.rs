use crate::errors::{BudgetError, Result};
use crate::ledger::{BudgetBook, ExpenseItem, IncomeItem, Month};

/// Seeds the next month's rows from the current month's descriptions,
/// carrying forward categories rather than balances.
pub struct TransferService;

impl TransferService {
    /// Replaces next month's income and expense lists with one fresh
    /// zero-amount row per source row (descriptions and expense percentages
    /// preserved) and returns the month that should become the selection.
    ///
    /// December refuses with `NoNextMonth` before touching the book; there is
    /// no wraparound into the following year.
    pub fn carry_forward(book: &mut BudgetBook, year: i32, month: Month) -> Result<Month> {
        let next = month.next().ok_or(BudgetError::NoNextMonth(month))?;

        let source = book.month(year, month).cloned().unwrap_or_default();
        let target = book.ensure_month(year, next);
        target.income = source
            .income
            .iter()
            .map(|item| IncomeItem::new(item.description.clone(), 0.0))
            .collect();
        target.expenses = source
            .expenses
            .iter()
            .map(|item| ExpenseItem::new(item.description.clone(), 0.0, item.percentage))
            .collect();

        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_book() -> BudgetBook {
        let mut book = BudgetBook::new();
        let ledger = book.ensure_month(2025, Month::November);
        ledger.income.push(IncomeItem::new("Sueldo", 900_000.0));
        ledger
            .expenses
            .push(ExpenseItem::new("Arriendo", 350_000.0, 12.5));
        ledger.expenses.push(ExpenseItem::new("Luz", 40_000.0, 0.0));
        book
    }

    #[test]
    fn carries_descriptions_and_percentages_with_zero_amounts() {
        let mut book = seeded_book();
        let next =
            TransferService::carry_forward(&mut book, 2025, Month::November).unwrap();
        assert_eq!(next, Month::December);

        let december = book.month(2025, Month::December).unwrap();
        assert_eq!(december.income.len(), 1);
        assert_eq!(december.income[0].description, "Sueldo");
        assert_eq!(december.income[0].amount, 0.0);
        assert_eq!(december.expenses.len(), 2);
        assert_eq!(december.expenses[0].description, "Arriendo");
        assert_eq!(december.expenses[0].amount, 0.0);
        assert_eq!(december.expenses[0].percentage, 12.5);
    }

    #[test]
    fn replaces_any_existing_rows_in_the_target_month() {
        let mut book = seeded_book();
        book.ensure_month(2025, Month::December).add_income();
        TransferService::carry_forward(&mut book, 2025, Month::November).unwrap();
        let december = book.month(2025, Month::December).unwrap();
        assert_eq!(december.income.len(), 1);
        assert_eq!(december.income[0].description, "Sueldo");
    }

    #[test]
    fn december_refuses_and_leaves_the_book_alone() {
        let mut book = BudgetBook::new();
        book.ensure_month(2025, Month::December).add_income();
        let snapshot = serde_json::to_string(&book).unwrap();

        let err = TransferService::carry_forward(&mut book, 2025, Month::December)
            .unwrap_err();
        assert!(matches!(err, BudgetError::NoNextMonth(Month::December)));
        assert_eq!(serde_json::to_string(&book).unwrap(), snapshot);
    }
}
