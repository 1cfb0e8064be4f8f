//! Date-time ⇄ text

use super::{Culture, DateOrder, HourClock};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use lazy_regex::regex_captures;
use std::borrow::Cow;

/// Two-digit years below this are in the 2000s, the rest in the 1900s
const TWO_DIGIT_YEAR_PIVOT: i32 = 30;

/// Format a date-time with the culture's short date and long time pattern
///
/// # Examples
/// ```
/// use duke_sheets_value::culture::{format_date_time, CS_CZ};
/// use chrono::NaiveDate;
///
/// let dt = NaiveDate::from_ymd_opt(1900, 3, 1).unwrap().and_hms_opt(4, 10, 5).unwrap();
/// assert_eq!(format_date_time(dt, &CS_CZ), "01.03.1900 4:10:05");
/// ```
pub fn format_date_time(dt: NaiveDateTime, culture: &Culture) -> String {
    let pad = |n: u32| {
        if culture.pad_date {
            format!("{n:02}")
        } else {
            n.to_string()
        }
    };
    let day = pad(dt.day());
    let month = pad(dt.month());
    let year = format!("{:04}", dt.year());
    let sep = culture.date_separator;

    let date = match culture.date_order {
        DateOrder::DayMonthYear => format!("{day}{sep}{month}{sep}{year}"),
        DateOrder::MonthDayYear => format!("{month}{sep}{day}{sep}{year}"),
        DateOrder::YearMonthDay => format!("{year}{sep}{month}{sep}{day}"),
    };

    format!("{date} {}", format_time(dt.time(), culture))
}

/// Format a time of day as `H:mm:ss`, with fractional seconds only when present
pub(crate) fn format_time(time: NaiveTime, culture: &Culture) -> String {
    let (hour, designator) = match culture.hour_clock {
        HourClock::TwentyFour => (time.hour(), None),
        HourClock::Twelve { am, pm } => {
            let (is_pm, hour12) = time.hour12();
            (hour12, Some(if is_pm { pm } else { am }))
        }
    };

    let mut out = if culture.pad_hour {
        format!("{hour:02}")
    } else {
        hour.to_string()
    };
    out.push_str(&format!(":{:02}:{:02}", time.minute(), time.second()));
    out.push_str(&format_fraction(time.nanosecond() % 1_000_000_000, culture));
    if let Some(designator) = designator {
        out.push(' ');
        out.push_str(designator);
    }
    out
}

/// `,082` for 82 ms under a comma-decimal culture; empty for whole seconds
pub(crate) fn format_fraction(nanos: u32, culture: &Culture) -> String {
    if nanos == 0 {
        return String::new();
    }
    let digits = format!("{nanos:09}");
    format!(
        "{}{}",
        culture.decimal_separator,
        digits.trim_end_matches('0')
    )
}

/// Nanoseconds from the digits after a decimal separator (`"5"` is half a second)
pub(crate) fn parse_fraction_digits(digits: &str) -> Option<u32> {
    if digits.is_empty() {
        return Some(0);
    }
    if digits.len() > 9 {
        return None;
    }
    let value: u32 = digits.parse().ok()?;
    Some(value * 10u32.pow(9 - digits.len() as u32))
}

/// Parse a date with an optional time of day
///
/// The date is three numeric components separated by `.`, `/`, `-` or the culture's date
/// separator, read in the culture's order; a four-digit first component is always read as
/// year-month-day. Two-digit years are windowed (`29` is 2029, `30` is 1930). Text without a
/// year or without a date is rejected.
pub fn parse_date_time(text: &str, culture: &Culture) -> Option<NaiveDateTime> {
    let text = text.trim();
    let text: Cow<'_, str> = if "./-".contains(culture.date_separator) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.replace(culture.date_separator, "/"))
    };

    let (_, first, second, third, time) = regex_captures!(
        r"^(\d{1,4})[./-]\s?(\d{1,2})[./-]\s?(\d{1,4})(?:(?:\s+|T)(\S.*))?$",
        &text
    )?;

    let (year, month, day) = if first.len() == 4 {
        (first, second, third)
    } else {
        match culture.date_order {
            DateOrder::DayMonthYear => (third, second, first),
            DateOrder::MonthDayYear => (third, first, second),
            DateOrder::YearMonthDay => (first, second, third),
        }
    };

    let date = NaiveDate::from_ymd_opt(
        parse_year(year)?,
        month.parse().ok()?,
        day.parse().ok()?,
    )?;

    let time = if time.is_empty() {
        NaiveTime::from_hms_opt(0, 0, 0)?
    } else {
        parse_time(time, culture)?
    };

    Some(date.and_time(time))
}

fn parse_year(digits: &str) -> Option<i32> {
    let year: i32 = digits.parse().ok()?;
    match digits.len() {
        1 | 2 if year < TWO_DIGIT_YEAR_PIVOT => Some(2000 + year),
        1 | 2 => Some(1900 + year),
        4 => Some(year),
        _ => None,
    }
}

/// Parse a time of day: `H:mm[:ss[.fff]]` with an optional AM/PM designator
pub fn parse_time(text: &str, culture: &Culture) -> Option<NaiveTime> {
    let (_, hour, minute, second, fraction, designator) = regex_captures!(
        r"^(\d{1,2}):(\d{1,2})(?::(\d{1,2})(?:[.,](\d{1,9}))?)?(?:\s*([^\d\s:.,]+))?$",
        text.trim()
    )?;

    let mut hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;
    let second: u32 = if second.is_empty() {
        0
    } else {
        second.parse().ok()?
    };
    let nanos = parse_fraction_digits(fraction)?;

    if !designator.is_empty() {
        let is_pm = match designator_kind(designator, culture)? {
            Designator::Am => false,
            Designator::Pm => true,
        };
        if hour == 0 || hour > 12 {
            return None;
        }
        hour = match (is_pm, hour) {
            (false, 12) => 0,
            (true, 12) => 12,
            (true, h) => h + 12,
            (false, h) => h,
        };
    }

    NaiveTime::from_hms_nano_opt(hour, minute, second, nanos)
}

enum Designator {
    Am,
    Pm,
}

fn designator_kind(text: &str, culture: &Culture) -> Option<Designator> {
    let (am, pm) = match culture.hour_clock {
        HourClock::Twelve { am, pm } => (am, pm),
        HourClock::TwentyFour => ("AM", "PM"),
    };
    if text.eq_ignore_ascii_case(am) || text.eq_ignore_ascii_case("AM") {
        Some(Designator::Am)
    } else if text.eq_ignore_ascii_case(pm) || text.eq_ignore_ascii_case("PM") {
        Some(Designator::Pm)
    } else {
        None
    }
}
