//! Cell value types

use crate::cell::CellError;
use crate::culture::{self, Culture};
use crate::error::{Error, Result};
use crate::serial;
use chrono::{Duration, NaiveDateTime};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Maximum length of cell text, in UTF-16 code units
pub const MAX_TEXT_LENGTH: usize = 32_767;

/// The kind of value held by a [`CellValue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Blank,
    Boolean,
    Number,
    Text,
    Error,
    DateTime,
    Duration,
}

impl ValueType {
    /// Get the type name for error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Blank => "blank",
            ValueType::Boolean => "boolean",
            ValueType::Number => "number",
            ValueType::Text => "text",
            ValueType::Error => "error",
            ValueType::DateTime => "date-time",
            ValueType::Duration => "duration",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A finite `f64`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct FiniteNumber(f64);

impl FiniteNumber {
    /// Wrap a number, rejecting NaN and infinities
    pub fn new(value: f64) -> Result<Self> {
        if value.is_finite() {
            Ok(FiniteNumber(value))
        } else {
            Err(Error::NonFiniteNumber(value))
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl From<FiniteNumber> for f64 {
    fn from(n: FiniteNumber) -> Self {
        n.0
    }
}

/// Cell text, at most [`MAX_TEXT_LENGTH`] UTF-16 code units
///
/// Backed by an `Arc<str>` so copies of a value share the same string data.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellText(Arc<str>);

impl CellText {
    /// Create cell text, rejecting text longer than the cell limit
    pub fn new<S: AsRef<str>>(s: S) -> Result<Self> {
        let s = s.as_ref();
        // UTF-16 length is at least the char count and at most the byte count
        if s.len() > MAX_TEXT_LENGTH {
            let length = s.encode_utf16().count();
            if length > MAX_TEXT_LENGTH {
                return Err(Error::TextTooLong {
                    length,
                    max: MAX_TEXT_LENGTH,
                });
            }
        }
        Ok(CellText(Arc::from(s)))
    }

    /// Get the string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in UTF-16 code units
    pub fn len_utf16(&self) -> usize {
        self.0.encode_utf16().count()
    }

    /// Check if the text is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for CellText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl fmt::Display for CellText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CellText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for CellText {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        CellText::new(s)
    }
}

impl TryFrom<String> for CellText {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        CellText::new(s)
    }
}

/// Represents the value stored in a cell
///
/// The payloads of `Number` and `Text` are validated newtypes, so a `CellValue` always holds a
/// finite number and text within the cell limit. Values are immutable; build a new one to
/// change it.
///
/// # Examples
/// ```
/// use duke_sheets_value::{CellValue, ValueType};
///
/// let v = CellValue::number(14.0).unwrap();
/// assert_eq!(v.value_type(), ValueType::Number);
/// assert_eq!(v.get_number().unwrap(), 14.0);
///
/// assert!(CellValue::number(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "super::persist::CellValueRepr", try_from = "super::persist::CellValueRepr")
)]
pub enum CellValue {
    /// Empty cell (no value)
    #[default]
    Blank,

    /// Boolean value (TRUE/FALSE)
    Boolean(bool),

    /// Finite numeric value
    Number(FiniteNumber),

    /// Text value
    Text(CellText),

    /// Error value (#VALUE!, #REF!, etc.)
    Error(CellError),

    /// Point in time, without time zone
    DateTime(NaiveDateTime),

    /// Signed time span, may exceed one day
    Duration(Duration),
}

impl CellValue {
    /// Create a blank value
    pub fn blank() -> Self {
        CellValue::Blank
    }

    /// Create a boolean value
    pub fn boolean(b: bool) -> Self {
        CellValue::Boolean(b)
    }

    /// Create a number value; fails for NaN and infinities
    pub fn number(n: f64) -> Result<Self> {
        FiniteNumber::new(n).map(CellValue::Number)
    }

    /// Create a text value; fails for text longer than [`MAX_TEXT_LENGTH`]
    pub fn text<S: AsRef<str>>(s: S) -> Result<Self> {
        CellText::new(s).map(CellValue::Text)
    }

    /// Create a text value from possibly absent text; `None` fails with [`Error::NullText`]
    pub fn from_optional_text<S: AsRef<str>>(s: Option<S>) -> Result<Self> {
        s.ok_or(Error::NullText).and_then(Self::text)
    }

    /// Create an error value
    pub fn error(e: CellError) -> Self {
        CellValue::Error(e)
    }

    /// Create a date-time value
    pub fn date_time(dt: NaiveDateTime) -> Self {
        CellValue::DateTime(dt)
    }

    /// Create a duration value
    pub fn duration(d: Duration) -> Self {
        CellValue::Duration(d)
    }

    /// Get the kind of value
    pub fn value_type(&self) -> ValueType {
        match self {
            CellValue::Blank => ValueType::Blank,
            CellValue::Boolean(_) => ValueType::Boolean,
            CellValue::Number(_) => ValueType::Number,
            CellValue::Text(_) => ValueType::Text,
            CellValue::Error(_) => ValueType::Error,
            CellValue::DateTime(_) => ValueType::DateTime,
            CellValue::Duration(_) => ValueType::Duration,
        }
    }

    fn mismatch(&self, expected: ValueType) -> Error {
        Error::InvalidValueType {
            expected,
            actual: self.value_type(),
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, CellValue::Blank)
    }

    /// Blank, or text that is empty
    pub fn is_blank_or_empty(&self) -> bool {
        match self {
            CellValue::Blank => true,
            CellValue::Text(t) => t.is_empty(),
            _ => false,
        }
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, CellValue::Boolean(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, CellValue::Number(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self, CellValue::Text(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, CellValue::Error(_))
    }

    pub fn is_date_time(&self) -> bool {
        matches!(self, CellValue::DateTime(_))
    }

    pub fn is_duration(&self) -> bool {
        matches!(self, CellValue::Duration(_))
    }

    pub fn get_boolean(&self) -> Result<bool> {
        match self {
            CellValue::Boolean(b) => Ok(*b),
            _ => Err(self.mismatch(ValueType::Boolean)),
        }
    }

    pub fn get_number(&self) -> Result<f64> {
        match self {
            CellValue::Number(n) => Ok(n.get()),
            _ => Err(self.mismatch(ValueType::Number)),
        }
    }

    pub fn get_text(&self) -> Result<&str> {
        match self {
            CellValue::Text(t) => Ok(t.as_str()),
            _ => Err(self.mismatch(ValueType::Text)),
        }
    }

    pub fn get_error(&self) -> Result<CellError> {
        match self {
            CellValue::Error(e) => Ok(*e),
            _ => Err(self.mismatch(ValueType::Error)),
        }
    }

    pub fn get_date_time(&self) -> Result<NaiveDateTime> {
        match self {
            CellValue::DateTime(dt) => Ok(*dt),
            _ => Err(self.mismatch(ValueType::DateTime)),
        }
    }

    pub fn get_duration(&self) -> Result<Duration> {
        match self {
            CellValue::Duration(d) => Ok(*d),
            _ => Err(self.mismatch(ValueType::Duration)),
        }
    }

    /// Whether the value has a numeric form (number, date-time or duration)
    pub fn is_unified_number(&self) -> bool {
        self.unified_number().is_some()
    }

    /// Numeric form of a number, date-time (serial date) or duration (days)
    ///
    /// # Examples
    /// ```
    /// use duke_sheets_value::CellValue;
    /// use chrono::{Duration, NaiveDate};
    ///
    /// let date = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
    /// assert_eq!(CellValue::date_time(date).get_unified_number().unwrap(), 1.0);
    ///
    /// let span = Duration::days(2) + Duration::hours(12);
    /// assert_eq!(CellValue::duration(span).get_unified_number().unwrap(), 2.5);
    /// ```
    pub fn get_unified_number(&self) -> Result<f64> {
        self.unified_number()
            .ok_or_else(|| self.mismatch(ValueType::Number))
    }

    fn unified_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(n.get()),
            CellValue::DateTime(dt) => Some(serial::date_time_to_serial(*dt)),
            CellValue::Duration(d) => Some(serial::duration_to_days(*d)),
            CellValue::Blank | CellValue::Boolean(_) | CellValue::Text(_) | CellValue::Error(_) => {
                None
            }
        }
    }

    /// Render the value as text using the given culture
    pub fn to_display_string(&self, culture: &Culture) -> String {
        match self {
            CellValue::Blank => String::new(),
            CellValue::Boolean(b) => culture::format_boolean(*b).to_string(),
            CellValue::Number(n) => culture::format_number(n.get(), culture),
            CellValue::Text(t) => t.as_str().to_string(),
            CellValue::Error(e) => e.as_str().to_string(),
            CellValue::DateTime(dt) => culture::format_date_time(*dt, culture),
            CellValue::Duration(d) => culture::format_duration(*d, culture),
        }
    }
}

impl fmt::Display for CellValue {
    /// Renders with the process-wide default culture
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string(culture::default_culture()))
    }
}

/// Equality within a variant; across number, date-time and duration by unified number
impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

/// Ordering within a variant; across number, date-time and duration by unified number.
/// Other cross-variant pairs are unordered.
impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (CellValue::Blank, CellValue::Blank) => Some(Ordering::Equal),
            (CellValue::Boolean(a), CellValue::Boolean(b)) => a.partial_cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => a.partial_cmp(b),
            (CellValue::Error(a), CellValue::Error(b)) => (a == b).then_some(Ordering::Equal),
            // serials are rounded to the millisecond, like payloads compare exactly
            (CellValue::DateTime(a), CellValue::DateTime(b)) => a.partial_cmp(b),
            (CellValue::Duration(a), CellValue::Duration(b)) => a.partial_cmp(b),
            _ => {
                let a = self.unified_number()?;
                let b = other.unified_number()?;
                a.partial_cmp(&b)
            }
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(FiniteNumber(f64::from(n)))
    }
}

impl From<FiniteNumber> for CellValue {
    fn from(n: FiniteNumber) -> Self {
        CellValue::Number(n)
    }
}

impl From<CellText> for CellValue {
    fn from(t: CellText) -> Self {
        CellValue::Text(t)
    }
}

impl From<CellError> for CellValue {
    fn from(e: CellError) -> Self {
        CellValue::Error(e)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(dt: NaiveDateTime) -> Self {
        CellValue::DateTime(dt)
    }
}

impl From<Duration> for CellValue {
    fn from(d: Duration) -> Self {
        CellValue::Duration(d)
    }
}

impl TryFrom<f64> for CellValue {
    type Error = Error;

    fn try_from(n: f64) -> Result<Self> {
        CellValue::number(n)
    }
}

impl TryFrom<&str> for CellValue {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        CellValue::text(s)
    }
}

impl TryFrom<String> for CellValue {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        CellValue::text(s)
    }
}

impl TryFrom<Option<&str>> for CellValue {
    type Error = Error;

    fn try_from(s: Option<&str>) -> Result<Self> {
        CellValue::from_optional_text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::culture::CS_CZ;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_creation_blank() {
        let v = CellValue::blank();
        assert_eq!(v.value_type(), ValueType::Blank);
        assert!(v.is_blank());
        assert_eq!(CellValue::default(), CellValue::Blank);
    }

    #[test]
    fn test_creation_boolean() {
        let v = CellValue::from(true);
        assert_eq!(v.value_type(), ValueType::Boolean);
        assert!(v.is_boolean());
        assert_eq!(v.get_boolean(), Ok(true));
    }

    #[test]
    fn test_creation_number() {
        let v = CellValue::number(14.0).unwrap();
        assert_eq!(v.value_type(), ValueType::Number);
        assert!(v.is_number());
        assert_eq!(v.get_number(), Ok(14.0));
        assert_eq!(CellValue::from(7), CellValue::number(7.0).unwrap());
    }

    #[test]
    fn test_number_must_be_finite() {
        for n in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = CellValue::number(n).unwrap_err();
            assert!(err.is_validation());
            assert!(CellValue::try_from(n).is_err());
        }
    }

    #[test]
    fn test_creation_text() {
        let v = CellValue::text("Hello World").unwrap();
        assert_eq!(v.value_type(), ValueType::Text);
        assert_eq!(v.get_text(), Ok("Hello World"));
    }

    #[test]
    fn test_text_cant_be_null() {
        assert_eq!(
            CellValue::from_optional_text(None::<&str>).unwrap_err(),
            Error::NullText
        );
        assert_eq!(
            CellValue::try_from(Some("x")).unwrap(),
            CellValue::text("x").unwrap()
        );
    }

    #[test]
    fn test_text_has_limited_length() {
        let max = "A".repeat(MAX_TEXT_LENGTH);
        assert!(CellValue::text(&max).is_ok());

        let long = "A".repeat(MAX_TEXT_LENGTH + 1);
        assert_eq!(
            CellValue::text(&long).unwrap_err(),
            Error::TextTooLong {
                length: 32768,
                max: 32767
            }
        );
    }

    #[test]
    fn test_text_length_counts_utf16_units() {
        // 3 bytes in UTF-8, 1 unit in UTF-16
        let cjk = "\u{4e2d}".repeat(MAX_TEXT_LENGTH);
        assert!(CellText::new(&cjk).is_ok());

        // 4 bytes in UTF-8, 2 units in UTF-16
        let emoji = "\u{1f600}".repeat(MAX_TEXT_LENGTH / 2 + 1);
        assert!(CellText::new(&emoji).is_err());
    }

    #[test]
    fn test_creation_error() {
        let v = CellValue::error(CellError::Num);
        assert_eq!(v.value_type(), ValueType::Error);
        assert!(v.is_error());
        assert_eq!(v.get_error(), Ok(CellError::Num));
    }

    #[test]
    fn test_creation_date_time() {
        let v = CellValue::date_time(date(2021, 1, 1));
        assert_eq!(v.value_type(), ValueType::DateTime);
        assert!(v.is_date_time());
        assert_eq!(v.get_date_time(), Ok(date(2021, 1, 1)));
    }

    #[test]
    fn test_creation_duration() {
        let span = Duration::days(10)
            + Duration::hours(1)
            + Duration::minutes(2)
            + Duration::milliseconds(3_456);
        let v = CellValue::duration(span);
        assert_eq!(v.value_type(), ValueType::Duration);
        assert!(v.is_duration());
        assert_eq!(v.get_duration(), Ok(span));
    }

    #[test]
    fn test_accessor_type_mismatch() {
        let v = CellValue::text("5").unwrap();
        assert_eq!(
            v.get_number(),
            Err(Error::InvalidValueType {
                expected: ValueType::Number,
                actual: ValueType::Text,
            })
        );
        assert!(v.get_boolean().is_err());
        assert!(CellValue::Blank.get_text().is_err());
        assert!(CellValue::from(true).get_number().is_err());
    }

    #[test]
    fn test_unified_number() {
        assert!(!CellValue::Blank.is_unified_number());
        assert!(!CellValue::from(true).is_unified_number());
        assert!(!CellValue::text("Text").unwrap().is_unified_number());
        assert!(!CellValue::error(CellError::Ref).is_unified_number());
        assert!(CellValue::Blank.get_unified_number().is_err());

        let v = CellValue::from(14);
        assert!(v.is_unified_number());
        assert_eq!(v.get_unified_number(), Ok(14.0));

        let v = CellValue::date_time(date(1900, 1, 1));
        assert_eq!(v.get_unified_number(), Ok(1.0));

        let v = CellValue::duration(Duration::days(2) + Duration::hours(12));
        assert_eq!(v.get_unified_number(), Ok(2.5));

        let v = CellValue::duration(Duration::days(14));
        assert_eq!(v.get_unified_number(), Ok(14.0));
    }

    #[test]
    fn test_blank_or_empty() {
        assert!(CellValue::Blank.is_blank_or_empty());
        assert!(CellValue::text("").unwrap().is_blank_or_empty());
        assert!(!CellValue::text(" ").unwrap().is_blank_or_empty());
        assert!(!CellValue::text("").unwrap().is_blank());
    }

    #[test]
    fn test_display_string_respects_culture() {
        assert_eq!(CellValue::Blank.to_display_string(&CS_CZ), "");
        assert_eq!(CellValue::from(true).to_display_string(&CS_CZ), "TRUE");
        assert_eq!(
            CellValue::number(25.4).unwrap().to_display_string(&CS_CZ),
            "25,4"
        );
        assert_eq!(
            CellValue::text("Hello").unwrap().to_display_string(&CS_CZ),
            "Hello"
        );
        assert_eq!(
            CellValue::error(CellError::Value).to_display_string(&CS_CZ),
            "#VALUE!"
        );
        assert_eq!(
            CellValue::date_time(date(1900, 1, 2)).to_display_string(&CS_CZ),
            "02.01.1900 0:00:00"
        );
        let span = Duration::days(4)
            + Duration::hours(5)
            + Duration::minutes(6)
            + Duration::milliseconds(7_082);
        assert_eq!(
            CellValue::duration(span).to_display_string(&CS_CZ),
            "101:06:07,082"
        );
    }

    #[test]
    fn test_equality_within_variant() {
        assert_eq!(CellValue::Blank, CellValue::Blank);
        assert_eq!(CellValue::text("a").unwrap(), CellValue::text("a").unwrap());
        assert_ne!(CellValue::text("a").unwrap(), CellValue::text("A").unwrap());
        assert_eq!(
            CellValue::error(CellError::Na),
            CellValue::error(CellError::Na)
        );
        assert_ne!(
            CellValue::error(CellError::Na),
            CellValue::error(CellError::Ref)
        );
    }

    #[test]
    fn test_like_variants_compare_below_millisecond() {
        let day = NaiveDate::from_ymd_opt(2021, 6, 1).unwrap();
        let earlier = CellValue::date_time(day.and_hms_nano_opt(1, 0, 0, 100).unwrap());
        let later = CellValue::date_time(day.and_hms_nano_opt(1, 0, 0, 200).unwrap());
        assert_ne!(earlier, later);
        assert!(earlier < later);

        let short = CellValue::duration(Duration::hours(1) + Duration::nanoseconds(100));
        let long = CellValue::duration(Duration::hours(1) + Duration::nanoseconds(200));
        assert_ne!(short, long);
        assert!(short < long);
    }

    #[test]
    fn test_equality_across_unified_numbers() {
        assert_eq!(CellValue::from(1), CellValue::date_time(date(1900, 1, 1)));
        assert_eq!(
            CellValue::number(0.75).unwrap(),
            CellValue::duration(Duration::hours(18))
        );
        assert!(CellValue::from(2) > CellValue::date_time(date(1900, 1, 1)));
    }

    #[test]
    fn test_cross_variant_is_unordered() {
        let text = CellValue::text("1").unwrap();
        let number = CellValue::from(1);
        assert_ne!(text, number);
        assert_eq!(text.partial_cmp(&number), None);
        assert_ne!(CellValue::Blank, CellValue::text("").unwrap());
        assert_ne!(CellValue::from(true), CellValue::from(1));
        assert_eq!(
            CellValue::error(CellError::Na).partial_cmp(&CellValue::error(CellError::Ref)),
            None
        );
    }
}
