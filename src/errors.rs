use std::result::Result as StdResult;

use thiserror::Error;

use crate::ledger::Month;

/// Unified error type for the model, storage, and service layers.
#[derive(Error, Debug)]
pub enum BudgetError {
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("No item with id {0} in the {1} list")]
    UnknownItem(uuid::Uuid, &'static str),
    #[error("{0} is the last month of the year; nothing to carry forward into")]
    NoNextMonth(Month),
    #[error("Backup document rejected: {0}")]
    InvalidBackup(String),
}

pub type Result<T> = StdResult<T, BudgetError>;

impl From<std::io::Error> for BudgetError {
    fn from(err: std::io::Error) -> Self {
        BudgetError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for BudgetError {
    fn from(err: serde_json::Error) -> Self {
        BudgetError::StorageError(err.to_string())
    }
}
