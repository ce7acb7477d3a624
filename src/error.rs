//! Error type for the `sheet` CLI.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Edit(#[from] sheet_engine::EditError),

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("usage: {0}")]
    Usage(String),
}

pub type Result<T> = std::result::Result<T, CliError>;
