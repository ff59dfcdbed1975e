pub mod summary_service;
pub mod transfer_service;

pub use summary_service::{MonthTotals, SummaryService, YearComparison, YearTotals};
pub use transfer_service::TransferService;
