use crate::ledger::item::finite_or_zero;
use crate::ledger::{BudgetBook, MonthLedger};

/// Rollup of a single month's rows.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MonthTotals {
    pub total_income: f64,
    pub total_expenses: f64,
    pub total_second_floor: f64,
    pub balance: f64,
}

/// Rollup across one year's months that actually hold data.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct YearTotals {
    pub total_profit: f64,
    pub avg_profit: f64,
    pub avg_income: f64,
    pub months_with_data: usize,
}

/// Year-over-year panel data: the selected year next to its predecessor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearComparison {
    pub year: i32,
    pub current: YearTotals,
    pub previous: YearTotals,
    pub profit_variation: f64,
    pub income_variation: f64,
}

/// Pure read-side aggregation over the book. No mutation, no I/O.
pub struct SummaryService;

impl SummaryService {
    pub fn month_totals(ledger: &MonthLedger) -> MonthTotals {
        let total_income = ledger
            .income
            .iter()
            .map(|item| finite_or_zero(item.amount))
            .sum();
        let total_expenses: f64 = ledger
            .expenses
            .iter()
            .map(|item| finite_or_zero(item.amount))
            .sum();
        let total_second_floor = ledger
            .expenses
            .iter()
            .map(|item| item.second_floor())
            .sum();
        MonthTotals {
            total_income,
            total_expenses,
            total_second_floor,
            balance: total_income - total_expenses,
        }
    }

    /// Totals over the months present under `year`. A month counts when its
    /// income or expense total is strictly positive; averages divide by that
    /// count and are 0 when nothing qualifies.
    pub fn year_totals(book: &BudgetBook, year: i32) -> YearTotals {
        let mut months_with_data = 0usize;
        let mut total_profit = 0.0;
        let mut total_income = 0.0;

        if let Some(year_ledger) = book.year(year) {
            for ledger in year_ledger.months.values() {
                let totals = Self::month_totals(ledger);
                if totals.total_income > 0.0 || totals.total_expenses > 0.0 {
                    months_with_data += 1;
                    total_profit += totals.balance;
                    total_income += totals.total_income;
                }
            }
        }

        let (avg_profit, avg_income) = if months_with_data == 0 {
            (0.0, 0.0)
        } else {
            let count = months_with_data as f64;
            (total_profit / count, total_income / count)
        };

        YearTotals {
            total_profit,
            avg_profit,
            avg_income,
            months_with_data,
        }
    }

    /// Growth percentage of `current` against `previous`. A zero base yields
    /// 100 for any positive current value and 0 otherwise, so growth from
    /// nothing still registers without dividing by zero.
    pub fn variation(current: f64, previous: f64) -> f64 {
        if previous == 0.0 {
            if current > 0.0 {
                100.0
            } else {
                0.0
            }
        } else {
            (current - previous) / previous.abs() * 100.0
        }
    }

    pub fn year_comparison(book: &BudgetBook, year: i32) -> YearComparison {
        let current = Self::year_totals(book, year);
        let previous = Self::year_totals(book, year - 1);
        YearComparison {
            year,
            current,
            previous,
            profit_variation: Self::variation(current.total_profit, previous.total_profit),
            income_variation: Self::variation(current.avg_income, previous.avg_income),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{ExpenseItem, IncomeItem, Month};

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn month_totals_roll_up_income_expenses_and_second_floor() {
        let mut ledger = MonthLedger::default();
        ledger.income.push(IncomeItem::new("Sueldo", 100_000.0));
        ledger
            .expenses
            .push(ExpenseItem::new("Arriendo", 40_000.0, 10.0));

        let totals = SummaryService::month_totals(&ledger);
        assert!((totals.total_income - 100_000.0).abs() < TOLERANCE);
        assert!((totals.total_expenses - 40_000.0).abs() < TOLERANCE);
        assert!((totals.total_second_floor - 4_000.0).abs() < TOLERANCE);
        assert!((totals.balance - 60_000.0).abs() < TOLERANCE);
    }

    #[test]
    fn year_totals_skip_months_without_data() {
        let mut book = BudgetBook::new();
        for month in Month::ALL {
            book.ensure_month(2025, month);
        }
        let january = book.ensure_month(2025, Month::January);
        january.income.push(IncomeItem::new("a", 100.0));
        january.expenses.push(ExpenseItem::new("b", 60.0, 0.0));
        let february = book.ensure_month(2025, Month::February);
        february.income.push(IncomeItem::new("c", 50.0));
        february.expenses.push(ExpenseItem::new("d", 20.0, 0.0));

        let totals = SummaryService::year_totals(&book, 2025);
        assert_eq!(totals.months_with_data, 2);
        assert!((totals.total_profit - 70.0).abs() < TOLERANCE);
        assert!((totals.avg_profit - 35.0).abs() < TOLERANCE);
        assert!((totals.avg_income - 75.0).abs() < TOLERANCE);
    }

    #[test]
    fn year_totals_of_absent_year_are_zero() {
        let book = BudgetBook::new();
        let totals = SummaryService::year_totals(&book, 1999);
        assert_eq!(totals, YearTotals::default());
    }

    #[test]
    fn variation_handles_zero_base() {
        assert_eq!(SummaryService::variation(0.0, 0.0), 0.0);
        assert_eq!(SummaryService::variation(50.0, 0.0), 100.0);
        assert!((SummaryService::variation(80.0, 100.0) + 20.0).abs() < TOLERANCE);
        assert!((SummaryService::variation(50.0, -100.0) - 150.0).abs() < TOLERANCE);
    }
}
