//! serde support
//!
//! A [`CellValue`] persists as a tagged scalar (`{"type": "number", "value": 1.5}`).
//! Deserialization goes back through the validating constructors.

use super::{CellError, CellValue};
use crate::error::Error;
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
#[serde(rename = "CellValue", tag = "type", content = "value", rename_all = "snake_case")]
pub(super) enum CellValueRepr {
    Blank,
    Boolean(bool),
    Number(f64),
    Text(String),
    Error(CellError),
    DateTime(NaiveDateTime),
    /// Whole milliseconds, the file format's resolution
    Duration(i64),
}

impl From<CellValue> for CellValueRepr {
    fn from(value: CellValue) -> Self {
        match value {
            CellValue::Blank => CellValueRepr::Blank,
            CellValue::Boolean(b) => CellValueRepr::Boolean(b),
            CellValue::Number(n) => CellValueRepr::Number(n.get()),
            CellValue::Text(t) => CellValueRepr::Text(t.as_str().to_string()),
            CellValue::Error(e) => CellValueRepr::Error(e),
            CellValue::DateTime(dt) => CellValueRepr::DateTime(dt),
            CellValue::Duration(d) => CellValueRepr::Duration(d.num_milliseconds()),
        }
    }
}

impl TryFrom<CellValueRepr> for CellValue {
    type Error = Error;

    fn try_from(repr: CellValueRepr) -> Result<Self, Error> {
        Ok(match repr {
            CellValueRepr::Blank => CellValue::Blank,
            CellValueRepr::Boolean(b) => CellValue::Boolean(b),
            CellValueRepr::Number(n) => CellValue::number(n)?,
            CellValueRepr::Text(t) => CellValue::text(t)?,
            CellValueRepr::Error(e) => CellValue::Error(e),
            CellValueRepr::DateTime(dt) => CellValue::DateTime(dt),
            // the duration range is symmetric, i64::MIN milliseconds is just outside it
            CellValueRepr::Duration(ms) => {
                CellValue::Duration(Duration::milliseconds(ms.max(-i64::MAX)))
            }
        })
    }
}
