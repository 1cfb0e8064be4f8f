//! Conversion engine
//!
//! [`CellValue::try_convert`] is the single coercion surface between cell value variants.
//! Failed coercions are ordinary outcomes (a formula usually turns them into `#VALUE!`), so
//! they come back as [`ConversionError`] rather than panicking.
//!
//! | Target   | Blank | Boolean | Number         | Text               | DateTime    | Duration    |
//! |----------|-------|---------|----------------|--------------------|-------------|-------------|
//! | Blank    | yes   | -       | -              | if empty           | -           | -           |
//! | Boolean  | -     | yes     | non-zero       | `TRUE`/`FALSE`     | -           | -           |
//! | Number   | -     | 1 / 0   | yes            | parse              | serial      | days        |
//! | DateTime | -     | -       | serial         | parse              | yes         | serial      |
//! | Duration | -     | -       | days           | parse              | time of day | yes         |
//! | Text     | `""`  | token   | formatted      | yes                | formatted   | formatted   |
//!
//! Error values never convert.

use crate::cell::{CellValue, ValueType};
use crate::culture::{self, Culture};
use crate::error::{ConversionError, ConvertResult};
use crate::serial;
use chrono::{Duration, NaiveDateTime};

/// Marker for a successful conversion to a blank value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Blank;

/// A type a [`CellValue`] can be coerced into
pub trait FromCellValue: Sized {
    /// Value type produced by the conversion
    const TARGET: ValueType;

    /// Coerce `value`, using `culture` for any text parsing or formatting
    fn from_cell_value(value: &CellValue, culture: &Culture) -> ConvertResult<Self>;
}

impl CellValue {
    /// Coerce this value into `T`
    ///
    /// # Examples
    /// ```
    /// use duke_sheets_value::{CellValue, culture::CS_CZ};
    ///
    /// let v = CellValue::text("1 1/4").unwrap();
    /// assert_eq!(v.try_convert::<f64>(&CS_CZ).unwrap(), 1.25);
    ///
    /// let v = CellValue::number(0.0).unwrap();
    /// assert_eq!(v.try_convert::<bool>(&CS_CZ).unwrap(), false);
    /// ```
    pub fn try_convert<T: FromCellValue>(&self, culture: &Culture) -> ConvertResult<T> {
        let result = T::from_cell_value(self, culture);
        if let Err(e) = &result {
            log::trace!("conversion of {} to {} failed: {}", self.value_type(), T::TARGET, e);
        }
        result
    }

    /// Coerce this value into `T` using the process-wide default culture
    pub fn try_convert_default<T: FromCellValue>(&self) -> ConvertResult<T> {
        self.try_convert(culture::default_culture())
    }

    fn incompatible(&self, to: ValueType) -> ConversionError {
        match self {
            CellValue::Error(e) => ConversionError::ErrorValue(*e),
            _ => ConversionError::Incompatible {
                from: self.value_type(),
                to,
            },
        }
    }
}

fn unparsable(text: &str, to: ValueType) -> ConversionError {
    ConversionError::Unparsable {
        text: text.to_string(),
        to,
    }
}

impl FromCellValue for Blank {
    const TARGET: ValueType = ValueType::Blank;

    fn from_cell_value(value: &CellValue, _culture: &Culture) -> ConvertResult<Self> {
        match value {
            CellValue::Blank => Ok(Blank),
            CellValue::Text(t) if t.is_empty() => Ok(Blank),
            CellValue::Text(_)
            | CellValue::Boolean(_)
            | CellValue::Number(_)
            | CellValue::Error(_)
            | CellValue::DateTime(_)
            | CellValue::Duration(_) => Err(value.incompatible(Self::TARGET)),
        }
    }
}

impl FromCellValue for bool {
    const TARGET: ValueType = ValueType::Boolean;

    fn from_cell_value(value: &CellValue, _culture: &Culture) -> ConvertResult<Self> {
        match value {
            CellValue::Boolean(b) => Ok(*b),
            CellValue::Number(n) => Ok(n.get() != 0.0),
            CellValue::Text(t) => culture::parse_boolean(t.as_str())
                .ok_or_else(|| unparsable(t.as_str(), Self::TARGET)),
            CellValue::Blank
            | CellValue::Error(_)
            | CellValue::DateTime(_)
            | CellValue::Duration(_) => Err(value.incompatible(Self::TARGET)),
        }
    }
}

impl FromCellValue for f64 {
    const TARGET: ValueType = ValueType::Number;

    fn from_cell_value(value: &CellValue, culture: &Culture) -> ConvertResult<Self> {
        match value {
            CellValue::Boolean(b) => Ok(if *b { 1.0 } else { 0.0 }),
            CellValue::Number(n) => Ok(n.get()),
            CellValue::DateTime(dt) => Ok(serial::date_time_to_serial(*dt)),
            CellValue::Duration(d) => Ok(serial::duration_to_days(*d)),
            CellValue::Text(t) => text_to_number(t.as_str(), culture),
            CellValue::Blank | CellValue::Error(_) => Err(value.incompatible(Self::TARGET)),
        }
    }
}

/// Number from text: plain number, mixed fraction, percent, date-time (as a serial), then
/// time (as days)
fn text_to_number(text: &str, culture: &Culture) -> ConvertResult<f64> {
    if let Some(n) = plain_number(text, culture) {
        return Ok(n);
    }
    if let Some(dt) = culture::parse_date_time(text, culture) {
        return Ok(serial::checked_date_time_to_serial(dt)?);
    }
    if let Some(d) = culture::parse_duration(text, culture) {
        return Ok(serial::duration_to_days(d));
    }
    if let Some(t) = culture::parse_time(text, culture) {
        return Ok(serial::duration_to_days(serial::time_to_duration(t)));
    }
    Err(unparsable(text, f64::TARGET))
}

fn plain_number(text: &str, culture: &Culture) -> Option<f64> {
    culture::parse_number(text, culture)
        .or_else(|| culture::parse_fraction(text))
        .or_else(|| culture::parse_percent(text, culture))
}

impl FromCellValue for NaiveDateTime {
    const TARGET: ValueType = ValueType::DateTime;

    fn from_cell_value(value: &CellValue, culture: &Culture) -> ConvertResult<Self> {
        match value {
            CellValue::DateTime(dt) => Ok(*dt),
            CellValue::Number(n) => Ok(serial::serial_to_date_time(n.get())?),
            CellValue::Duration(d) => {
                Ok(serial::serial_to_date_time(serial::duration_to_days(*d))?)
            }
            CellValue::Text(t) => culture::parse_date_time(t.as_str(), culture)
                .ok_or_else(|| unparsable(t.as_str(), Self::TARGET)),
            CellValue::Blank | CellValue::Boolean(_) | CellValue::Error(_) => {
                Err(value.incompatible(Self::TARGET))
            }
        }
    }
}

impl FromCellValue for Duration {
    const TARGET: ValueType = ValueType::Duration;

    fn from_cell_value(value: &CellValue, culture: &Culture) -> ConvertResult<Self> {
        match value {
            CellValue::Duration(d) => Ok(*d),
            CellValue::Number(n) => Ok(serial::days_to_duration(n.get())?),
            CellValue::DateTime(dt) => Ok(serial::time_of_day(*dt)),
            CellValue::Text(t) => {
                let text = t.as_str();
                if let Some(d) = culture::parse_duration(text, culture) {
                    return Ok(d);
                }
                match text_to_number(text, culture) {
                    Ok(days) => Ok(serial::days_to_duration(days)?),
                    Err(ConversionError::Unparsable { .. }) => {
                        Err(unparsable(text, Self::TARGET))
                    }
                    Err(e) => Err(e),
                }
            }
            CellValue::Blank | CellValue::Boolean(_) | CellValue::Error(_) => {
                Err(value.incompatible(Self::TARGET))
            }
        }
    }
}

impl FromCellValue for String {
    const TARGET: ValueType = ValueType::Text;

    fn from_cell_value(value: &CellValue, culture: &Culture) -> ConvertResult<Self> {
        match value {
            CellValue::Error(_) => Err(value.incompatible(Self::TARGET)),
            CellValue::Blank
            | CellValue::Boolean(_)
            | CellValue::Number(_)
            | CellValue::Text(_)
            | CellValue::DateTime(_)
            | CellValue::Duration(_) => Ok(value.to_display_string(culture)),
        }
    }
}

impl ValueType {
    /// Whether values of this type can ever convert to `T`
    ///
    /// Text sources depend on their content, so they report `true` for every target.
    pub fn can_convert_to<T: FromCellValue>(self) -> bool {
        use ValueType::*;
        match (self, T::TARGET) {
            (Error, _) => false,
            (Text, _) => true,
            (source, target) if source == target => true,
            (_, Text) => true,
            (Boolean, Number) | (Number, Boolean) => true,
            (Number | DateTime | Duration, Number | DateTime | Duration) => true,
            _ => false,
        }
    }
}
