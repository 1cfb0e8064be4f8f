//! Culture-aware text parsing and formatting
//!
//! A [`Culture`] carries the conventions that change how scalars look as text: decimal and
//! grouping separators, date component order and padding, and the hour clock. Every parse and
//! format function takes the culture explicitly. A process-wide default exists only for
//! convenience wrappers; it is set at most once via [`set_default_culture`] and is read-only
//! afterwards.

mod datetime;
mod duration;
mod number;

pub use datetime::{format_date_time, parse_date_time, parse_time};
pub use duration::{format_duration, parse_duration};
pub use number::{format_number, parse_fraction, parse_number, parse_percent};

use crate::error::{Error, Result};
use std::sync::OnceLock;

/// Order of the day, month and year components in a short date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateOrder {
    /// `dd.MM.yyyy`
    DayMonthYear,
    /// `M/d/yyyy`
    MonthDayYear,
    /// `yyyy-MM-dd`
    YearMonthDay,
}

/// Hour clock used when rendering a time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HourClock {
    /// 0-23
    TwentyFour,
    /// 1-12 followed by a designator
    Twelve {
        am: &'static str,
        pm: &'static str,
    },
}

/// Formatting conventions of a culture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Culture {
    /// BCP-47 tag (`"cs-CZ"`); empty for the invariant culture
    pub name: &'static str,
    pub decimal_separator: char,
    pub group_separator: char,
    pub date_order: DateOrder,
    pub date_separator: char,
    /// Zero-pad day and month when rendering dates
    pub pad_date: bool,
    pub hour_clock: HourClock,
    /// Zero-pad the hour when rendering times
    pub pad_hour: bool,
}

/// Culture-independent conventions (`MM/dd/yyyy HH:mm:ss`, `.` decimals)
pub static INVARIANT: Culture = Culture {
    name: "",
    decimal_separator: '.',
    group_separator: ',',
    date_order: DateOrder::MonthDayYear,
    date_separator: '/',
    pad_date: true,
    hour_clock: HourClock::TwentyFour,
    pad_hour: true,
};

/// English (United States): `M/d/yyyy h:mm:ss AM`
pub static EN_US: Culture = Culture {
    name: "en-US",
    decimal_separator: '.',
    group_separator: ',',
    date_order: DateOrder::MonthDayYear,
    date_separator: '/',
    pad_date: false,
    hour_clock: HourClock::Twelve {
        am: "AM",
        pm: "PM",
    },
    pad_hour: false,
};

/// English (United Kingdom): `dd/MM/yyyy HH:mm:ss`
pub static EN_GB: Culture = Culture {
    name: "en-GB",
    decimal_separator: '.',
    group_separator: ',',
    date_order: DateOrder::DayMonthYear,
    date_separator: '/',
    pad_date: true,
    hour_clock: HourClock::TwentyFour,
    pad_hour: true,
};

/// Czech: `dd.MM.yyyy H:mm:ss`, `,` decimals, no-break space grouping
pub static CS_CZ: Culture = Culture {
    name: "cs-CZ",
    decimal_separator: ',',
    group_separator: '\u{a0}',
    date_order: DateOrder::DayMonthYear,
    date_separator: '.',
    pad_date: true,
    hour_clock: HourClock::TwentyFour,
    pad_hour: false,
};

/// German (Germany): `dd.MM.yyyy HH:mm:ss`, `,` decimals, `.` grouping
pub static DE_DE: Culture = Culture {
    name: "de-DE",
    decimal_separator: ',',
    group_separator: '.',
    date_order: DateOrder::DayMonthYear,
    date_separator: '.',
    pad_date: true,
    hour_clock: HourClock::TwentyFour,
    pad_hour: true,
};

/// French (France): `dd/MM/yyyy HH:mm:ss`, `,` decimals, narrow no-break space grouping
pub static FR_FR: Culture = Culture {
    name: "fr-FR",
    decimal_separator: ',',
    group_separator: '\u{202f}',
    date_order: DateOrder::DayMonthYear,
    date_separator: '/',
    pad_date: true,
    hour_clock: HourClock::TwentyFour,
    pad_hour: true,
};

static BUILT_IN: [&Culture; 6] = [&INVARIANT, &EN_US, &EN_GB, &CS_CZ, &DE_DE, &FR_FR];

static DEFAULT_CULTURE: OnceLock<Culture> = OnceLock::new();

impl Culture {
    /// The invariant culture
    pub fn invariant() -> &'static Culture {
        &INVARIANT
    }

    /// Look up a built-in culture by tag
    ///
    /// Tags match case-insensitively, `_` and `-` are equivalent, and POSIX suffixes
    /// (`.UTF-8`, `@euro`) are ignored. A bare language falls back to its main region.
    ///
    /// # Examples
    /// ```
    /// use duke_sheets_value::Culture;
    ///
    /// assert_eq!(Culture::lookup("cs_CZ.UTF-8").unwrap().name, "cs-CZ");
    /// assert_eq!(Culture::lookup("de").unwrap().name, "de-DE");
    /// assert!(Culture::lookup("xx-YY").is_none());
    /// ```
    pub fn lookup(tag: &str) -> Option<&'static Culture> {
        let key = normalize_tag(tag);
        if key.is_empty() || key == "invariant" {
            return Some(&INVARIANT);
        }
        if let Some(culture) = BUILT_IN
            .iter()
            .copied()
            .find(|c| !c.name.is_empty() && c.name.eq_ignore_ascii_case(&key))
        {
            return Some(culture);
        }
        match key.split('-').next().unwrap_or("") {
            "en" => Some(&EN_US),
            "cs" => Some(&CS_CZ),
            "de" => Some(&DE_DE),
            "fr" => Some(&FR_FR),
            _ => None,
        }
    }

    /// Like [`Culture::lookup`], but fails with [`Error::UnknownCulture`]
    pub fn from_tag(tag: &str) -> Result<&'static Culture> {
        Self::lookup(tag).ok_or_else(|| Error::UnknownCulture(tag.to_string()))
    }

    /// Display name for diagnostics
    pub fn display_name(&self) -> &'static str {
        if self.name.is_empty() {
            "invariant"
        } else {
            self.name
        }
    }
}

impl Default for Culture {
    fn default() -> Self {
        INVARIANT
    }
}

fn normalize_tag(tag: &str) -> String {
    let mut key: String = tag
        .trim()
        .chars()
        .map(|ch| if ch == '_' { '-' } else { ch.to_ascii_lowercase() })
        .collect();
    if let Some(idx) = key.find(['.', '@']) {
        key.truncate(idx);
    }
    key
}

/// Establish the process-wide default culture
///
/// Succeeds only once, and only before the default has been read.
pub fn set_default_culture(culture: Culture) -> Result<()> {
    let mut installed = false;
    let current = DEFAULT_CULTURE.get_or_init(|| {
        installed = true;
        culture
    });
    if installed {
        log::debug!("default culture set to {}", current.display_name());
        Ok(())
    } else {
        Err(Error::DefaultCultureAlreadySet(current.display_name()))
    }
}

/// The process-wide default culture (invariant unless set before first use)
pub fn default_culture() -> &'static Culture {
    DEFAULT_CULTURE.get_or_init(|| {
        log::debug!("default culture not set, using invariant");
        INVARIANT
    })
}

/// Render a boolean as its locale-invariant token
pub fn format_boolean(value: bool) -> &'static str {
    if value {
        "TRUE"
    } else {
        "FALSE"
    }
}

/// Parse `TRUE` / `FALSE`, case-insensitively and ignoring surrounding whitespace
pub fn parse_boolean(text: &str) -> Option<bool> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("TRUE") {
        Some(true)
    } else if text.eq_ignore_ascii_case("FALSE") {
        Some(false)
    } else {
        None
    }
}

/// Whether `ch` may stand in for a space-like group separator
pub(crate) fn is_space_like(ch: char) -> bool {
    matches!(ch, ' ' | '\u{a0}' | '\u{202f}')
}
