use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Month, MonthLedger};

/// A single year's months, created lazily and defaulting to empty.
///
/// The `Month` key type is what keeps stray labels out of the document: only
/// the twelve known names deserialize.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct YearLedger {
    pub months: BTreeMap<Month, MonthLedger>,
}

impl YearLedger {
    pub fn month(&self, month: Month) -> Option<&MonthLedger> {
        self.months.get(&month)
    }

    /// Creates the month if absent. Idempotent.
    pub fn ensure_month(&mut self, month: Month) -> &mut MonthLedger {
        self.months.entry(month).or_default()
    }
}

/// The whole multi-year store.
///
/// Serializes transparently as `{ "<year>": { "<MonthLabel>": ... } }`, the
/// exact shape of the persisted slot and of backup documents' `allYearsData`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BudgetBook {
    pub years: BTreeMap<i32, YearLedger>,
}

impl BudgetBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn year(&self, year: i32) -> Option<&YearLedger> {
        self.years.get(&year)
    }

    /// Creates the year if absent. Idempotent.
    pub fn ensure_year(&mut self, year: i32) -> &mut YearLedger {
        self.years.entry(year).or_default()
    }

    /// Creates the month (and its year) if absent. Idempotent.
    pub fn ensure_month(&mut self, year: i32, month: Month) -> &mut MonthLedger {
        self.ensure_year(year).ensure_month(month)
    }

    pub fn month(&self, year: i32, month: Month) -> Option<&MonthLedger> {
        self.year(year).and_then(|ledger| ledger.month(month))
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_is_idempotent() {
        let mut book = BudgetBook::new();
        book.ensure_month(2026, Month::March).add_income();
        book.ensure_month(2026, Month::March);
        assert_eq!(book.month(2026, Month::March).unwrap().income.len(), 1);
    }

    #[test]
    fn document_shape_matches_legacy_wire_format() {
        let mut book = BudgetBook::new();
        let ledger = book.ensure_month(2025, Month::January);
        let id = ledger.add_income();
        ledger.income_mut(id).unwrap().description = "Sueldo".into();
        ledger.income_mut(id).unwrap().amount = 100_000.0;

        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(
            json["2025"]["Enero"]["income"][0]["description"],
            "Sueldo"
        );
        assert_eq!(json["2025"]["Enero"]["income"][0]["amount"], 100_000.0);
    }

    #[test]
    fn year_keys_roundtrip_as_strings() {
        let mut book = BudgetBook::new();
        book.ensure_year(2024);
        let json = serde_json::to_string(&book).unwrap();
        assert!(json.contains("\"2024\""));
        let back: BudgetBook = serde_json::from_str(&json).unwrap();
        assert!(back.year(2024).is_some());
    }
}
