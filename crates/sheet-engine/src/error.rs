//! Error types returned at the mutation boundary (`SetCell`/`ClearCell`).
//! In-band evaluation failures (`#REF!`, `#VALUE!`, `#DIV/0!`) are not
//! here — those are `sheet_formula::ErrorKind`, carried as `Value::Error`.
//!
//! Shape matches `gridline`'s and `gridline-core`'s `error.rs`: a
//! `thiserror`-derived enum with a `Result` alias alongside it.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("position is out of the addressable range")]
    InvalidPosition,

    #[error("formula parse error: {0}")]
    FormulaParse(String),

    #[error("circular dependency detected")]
    CircularDependency,
}

pub type Result<T> = std::result::Result<T, EditError>;
