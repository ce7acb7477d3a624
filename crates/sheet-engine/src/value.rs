//! The display value of a cell: a number, text, or an in-band error.

use sheet_formula::ErrorKind;
use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    Error(ErrorKind),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => f.write_str(&crate::format::shortest(*n)),
            Value::Text(s) => f.write_str(s),
            Value::Error(k) => write!(f, "{k}"),
        }
    }
}
