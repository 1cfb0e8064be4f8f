//! Spreadsheet error codes

use std::fmt;
use std::str::FromStr;

/// Excel error values
///
/// The set is closed: every error a cell can hold is one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellError {
    /// #NULL! - Intersection of two ranges is empty
    Null,
    /// #DIV/0! - Division by zero
    Div0,
    /// #VALUE! - Value incompatible with the operation
    Value,
    /// #REF! - Invalid cell reference
    Ref,
    /// #NAME? - Name not recognized
    Name,
    /// #NUM! - Invalid number
    Num,
    /// #N/A - Value not available
    Na,
}

impl CellError {
    /// All error codes, in BIFF code order
    pub const ALL: [CellError; 7] = [
        CellError::Null,
        CellError::Div0,
        CellError::Value,
        CellError::Ref,
        CellError::Name,
        CellError::Num,
        CellError::Na,
    ];

    /// Get the display token for this error
    pub fn as_str(&self) -> &'static str {
        match self {
            CellError::Null => "#NULL!",
            CellError::Div0 => "#DIV/0!",
            CellError::Value => "#VALUE!",
            CellError::Ref => "#REF!",
            CellError::Name => "#NAME?",
            CellError::Num => "#NUM!",
            CellError::Na => "#N/A",
        }
    }

    /// Get the numeric error code used by the BIFF format
    pub fn code(&self) -> u8 {
        match self {
            CellError::Null => 0x00,
            CellError::Div0 => 0x07,
            CellError::Value => 0x0F,
            CellError::Ref => 0x17,
            CellError::Name => 0x1D,
            CellError::Num => 0x24,
            CellError::Na => 0x2A,
        }
    }

    /// Look up an error by its BIFF code
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.code() == code)
    }
}

impl fmt::Display for CellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token did not name a known error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown error token: {0}")]
pub struct UnknownErrorToken(pub String);

impl FromStr for CellError {
    type Err = UnknownErrorToken;

    /// Tokens match case-insensitively (`#n/a` is `#N/A`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        Self::ALL
            .into_iter()
            .find(|e| e.as_str().eq_ignore_ascii_case(token))
            .ok_or_else(|| UnknownErrorToken(s.to_string()))
    }
}
