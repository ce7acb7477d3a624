//! Parse errors. Kept dependency-free, matching `DanielSallander-Calcula`'s
//! `core/parser` crate, which hand-rolls `Display`/`Error` rather than
//! reaching for `thiserror` for a single error shape.

use std::error::Error;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        ParseError {
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for ParseError {}

/// The kind of evaluation failure a formula can produce. These are
/// in-band `Value`s, not exceptions — see `sheet_engine::Value::Error`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced position is outside the engine's valid range.
    Ref,
    /// A referenced cell's text could not be read as a number.
    Value,
    /// Division by zero, or a result of +/-infinity or NaN.
    Div0,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Ref => "#REF!",
            ErrorKind::Value => "#VALUE!",
            ErrorKind::Div0 => "#DIV/0!",
        };
        f.write_str(s)
    }
}
