//! # duke-sheets-value
//!
//! The cell value model for the duke-sheets spreadsheet library.
//!
//! This crate provides:
//! - [`CellValue`] - Everything a cell can hold (blank, boolean, number, text, error,
//!   date-time, duration), with validating constructors
//! - [`serial`] - Serial date arithmetic, including the 1900 leap-year bug
//! - [`culture`] - Culture-aware parsing and formatting of numbers, dates, durations and
//!   booleans
//! - [`CellValue::try_convert`] - The coercion rules between variants
//!
//! ## Example
//!
//! ```rust
//! use duke_sheets_value::{CellValue, culture::CS_CZ};
//! use chrono::Duration;
//!
//! let value = CellValue::text("26:15:30,5").unwrap();
//! let span: Duration = value.try_convert(&CS_CZ).unwrap();
//! assert_eq!(span, Duration::days(1) + Duration::hours(2) + Duration::minutes(15)
//!     + Duration::milliseconds(30_500));
//!
//! let value = CellValue::number(25.4).unwrap();
//! assert_eq!(value.to_display_string(&CS_CZ), "25,4");
//! ```

pub mod cell;
pub mod convert;
pub mod culture;
pub mod error;
pub mod serial;

// Re-exports for convenience
pub use cell::{CellError, CellText, CellValue, FiniteNumber, ValueType, MAX_TEXT_LENGTH};
pub use convert::{Blank, FromCellValue};
pub use culture::{default_culture, set_default_culture, Culture, DateOrder, HourClock};
pub use error::{ConversionError, ConvertResult, Error, Result, SerialError};
