//! Budget domain model: months, line items, and the multi-year book.

pub mod book;
pub mod item;
pub mod month;
pub mod month_ledger;

pub use book::{BudgetBook, YearLedger};
pub use item::{ExpenseItem, IncomeItem};
pub use month::Month;
pub use month_ledger::MonthLedger;
