//! Error types for duke-sheets-value

use crate::cell::{CellError, ValueType};
use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Result type alias for the conversion engine
pub type ConvertResult<T> = std::result::Result<T, ConversionError>;

/// Errors raised when building or reading a [`CellValue`](crate::CellValue)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Numbers must be finite (no NaN, no infinities)
    #[error("Cell number must be finite, got {0}")]
    NonFiniteNumber(f64),

    /// Text payload was absent
    #[error("Cell text must not be null")]
    NullText,

    /// Text payload exceeds the cell limit
    #[error("Cell text is {length} UTF-16 code units long (max: {max})")]
    TextTooLong { length: usize, max: usize },

    /// Accessor called on the wrong variant
    #[error("Invalid value type: expected {expected}, got {actual}")]
    InvalidValueType {
        expected: ValueType,
        actual: ValueType,
    },

    /// Culture tag not known to the registry
    #[error("Unknown culture: {0}")]
    UnknownCulture(String),

    /// The process-wide default culture was already established
    #[error("Default culture is already set to {0}")]
    DefaultCultureAlreadySet(&'static str),
}

impl Error {
    /// Whether this error was raised by a validating constructor
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::NonFiniteNumber(_) | Error::NullText | Error::TextTooLong { .. }
        )
    }
}

/// Errors from serial date/time arithmetic
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SerialError {
    /// Serial number outside `[1, 2958465]` (or a date outside 1900-01-01..=9999-12-31)
    #[error("Serial date {0} is outside the supported range [1, 2958465]")]
    OutOfRange(f64),

    /// Serial 60 is the fictitious 1900-02-29
    #[error("Serial date {0} falls on the non-existent day 1900-02-29")]
    NonexistentDate(f64),

    /// Day count too large (or not finite) for a duration
    #[error("{0} days cannot be represented as a duration")]
    DurationOverflow(f64),
}

/// Routine failure of [`CellValue::try_convert`](crate::CellValue::try_convert)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// The coercion table has no rule for this pair
    #[error("Cannot convert {from} to {to}")]
    Incompatible { from: ValueType, to: ValueType },

    /// Error values never convert
    #[error("Error value {0} cannot be converted")]
    ErrorValue(CellError),

    /// Source text does not parse as the target
    #[error("Text {text:?} cannot be parsed as {to}")]
    Unparsable { text: String, to: ValueType },

    /// Serial arithmetic failed (range, fictitious day, overflow)
    #[error(transparent)]
    Serial(#[from] SerialError),
}

impl ConversionError {
    /// Whether the failure was a date serial outside the representable range
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            ConversionError::Serial(SerialError::OutOfRange(_) | SerialError::NonexistentDate(_))
        )
    }
}
