use figaro::core::services::{SummaryService, TransferService};
use figaro::errors::BudgetError;
use figaro::ledger::{BudgetBook, ExpenseItem, IncomeItem, Month, MonthLedger};

const TOLERANCE: f64 = 1e-9;

#[test]
fn month_totals_match_the_documented_example() {
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
fn year_totals_count_only_months_with_data() {
    let mut book = BudgetBook::new();
    for month in Month::ALL {
        book.ensure_month(2025, month);
    }
    {
        let january = book.ensure_month(2025, Month::January);
        january.income.push(IncomeItem::new("a", 100.0));
        january.expenses.push(ExpenseItem::new("b", 60.0, 0.0));
    }
    {
        let february = book.ensure_month(2025, Month::February);
        february.income.push(IncomeItem::new("c", 50.0));
        february.expenses.push(ExpenseItem::new("d", 20.0, 0.0));
    }

    let totals = SummaryService::year_totals(&book, 2025);
    assert_eq!(totals.months_with_data, 2);
    assert!((totals.total_profit - 70.0).abs() < TOLERANCE);
    assert!((totals.avg_profit - 35.0).abs() < TOLERANCE);
    assert!((totals.avg_income - 75.0).abs() < TOLERANCE);
}

#[test]
fn variation_signals_growth_from_a_zero_base() {
    assert_eq!(SummaryService::variation(0.0, 0.0), 0.0);
    assert_eq!(SummaryService::variation(50.0, 0.0), 100.0);
    assert!((SummaryService::variation(80.0, 100.0) + 20.0).abs() < TOLERANCE);
}

#[test]
fn year_comparison_pairs_the_selected_year_with_its_predecessor() {
    let mut book = BudgetBook::new();
    book.ensure_month(2024, Month::January)
        .income
        .push(IncomeItem::new("a", 100.0));
    book.ensure_month(2025, Month::January)
        .income
        .push(IncomeItem::new("b", 150.0));

    let comparison = SummaryService::year_comparison(&book, 2025);
    assert_eq!(comparison.year, 2025);
    assert_eq!(comparison.current.months_with_data, 1);
    assert_eq!(comparison.previous.months_with_data, 1);
    assert!((comparison.income_variation - 50.0).abs() < TOLERANCE);
}

#[test]
fn transfer_preserves_counts_descriptions_and_percentages() {
    let mut book = BudgetBook::new();
    {
        let march = book.ensure_month(2025, Month::March);
        march.income.push(IncomeItem::new("Sueldo", 900_000.0));
        march.income.push(IncomeItem::new("Bono", 50_000.0));
        march
            .expenses
            .push(ExpenseItem::new("Arriendo", 350_000.0, 12.5));
    }

    let next = TransferService::carry_forward(&mut book, 2025, Month::March).unwrap();
    assert_eq!(next, Month::April);

    let april = book.month(2025, Month::April).unwrap();
    assert_eq!(april.income.len(), 2);
    assert_eq!(april.expenses.len(), 1);
    for item in &april.income {
        assert_eq!(item.amount, 0.0);
    }
    assert_eq!(april.income[1].description, "Bono");
    assert_eq!(april.expenses[0].percentage, 12.5);
    assert_eq!(april.expenses[0].amount, 0.0);

    // Source rows are untouched.
    let march = book.month(2025, Month::March).unwrap();
    assert_eq!(march.income[0].amount, 900_000.0);
}

#[test]
fn transfer_from_december_fails_without_mutation() {
    let mut book = BudgetBook::new();
    book.ensure_month(2025, Month::December)
        .income
        .push(IncomeItem::new("Aguinaldo", 200_000.0));
    let snapshot = serde_json::to_string(&book).unwrap();

    let err = TransferService::carry_forward(&mut book, 2025, Month::December).unwrap_err();
    assert!(matches!(err, BudgetError::NoNextMonth(Month::December)));
    assert_eq!(serde_json::to_string(&book).unwrap(), snapshot);
}

#[test]
fn delete_shifts_rows_and_stale_handles_fail_loudly() {
    let mut ledger = MonthLedger::default();
    let ids: Vec<_> = (0..3).map(|_| ledger.add_income()).collect();
    for (id, label) in ids.iter().zip(["a", "b", "c"]) {
        ledger.income_mut(*id).unwrap().description = label.into();
    }

    ledger.remove_income(ids[1]).unwrap();
    let remaining: Vec<&str> = ledger
        .income
        .iter()
        .map(|item| item.description.as_str())
        .collect();
    assert_eq!(remaining, ["a", "c"]);

    // The deleted row's handle must not land on the row that shifted down.
    let err = ledger.income_mut(ids[1]).unwrap_err();
    assert!(matches!(err, BudgetError::UnknownItem(_, "income")));
    assert_eq!(ledger.income[1].description, "c");
}
