use bill_ledger_core::errors::CoreError;
use thiserror::Error;

/// Errors surfaced to the user by the command-line front end.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Usage(String),

    #[error("Ledger is locked: pass --pin or run `pin verify <PIN>`")]
    Locked,

    #[error("Incorrect PIN")]
    WrongPin,
}
