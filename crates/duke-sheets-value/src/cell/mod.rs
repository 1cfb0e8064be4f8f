//! Cell-related types
//!
//! This module contains:
//! - [`CellValue`] - The value stored in a cell
//! - [`CellError`] - The closed set of spreadsheet error codes
//! - [`CellText`] and [`FiniteNumber`] - Validated payloads

mod error_code;
#[cfg(feature = "serde")]
mod persist;
mod value;

pub use error_code::{CellError, UnknownErrorToken};
pub use value::{CellText, CellValue, FiniteNumber, ValueType, MAX_TEXT_LENGTH};
