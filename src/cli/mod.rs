pub mod commands;
pub mod help;
pub mod output;
pub mod registry;
mod shell;
pub mod shell_context;

pub use shell::run_cli;

use thiserror::Error;

use crate::errors::BudgetError;

/// Fatal shell-level failures; per-command failures are reported inline and
/// never tear the loop down.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] BudgetError),
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of a single command handler.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("exit requested")]
    ExitRequested,
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("{0}")]
    Failed(String),
    #[error(transparent)]
    Core(#[from] BudgetError),
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}
