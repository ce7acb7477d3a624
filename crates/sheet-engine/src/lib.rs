//! In-memory spreadsheet grid.
//!
//! Cells never hold references to each other — only [`Position`] values —
//! and every neighbor lookup goes through [`Sheet`]. The cell graph is a
//! `HashMap<Position, Cell>` owned exclusively by the sheet; there is no
//! `Arc`/`DashMap`/lock anywhere here, since this engine is single-writer,
//! single-threaded by design (see `SPEC_FULL.md` §5).

mod cell;
mod cycle;
mod error;
mod format;
mod sheet;
mod value;

pub use cell::Content;
pub use error::{EditError, Result};
pub use sheet::{CellHandle, Sheet};
pub use sheet_formula::{ErrorKind, Position, Size, MAX_COLS, MAX_ROWS};
pub use value::Value;
