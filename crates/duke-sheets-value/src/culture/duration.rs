//! Duration ⇄ text
//!
//! Durations render as `[-]h:mm:ss[<decimal separator>fraction]`. The hour field counts total
//! hours and does not wrap at 24, so four days and five hours is `101:...`.

use super::datetime::{format_fraction, parse_fraction_digits};
use super::Culture;
use chrono::Duration;
use lazy_regex::regex_captures;

/// Format a duration as total hours, minutes and seconds
///
/// # Examples
/// ```
/// use duke_sheets_value::culture::{format_duration, CS_CZ};
/// use chrono::Duration;
///
/// let d = Duration::days(4) + Duration::hours(5) + Duration::minutes(6)
///     + Duration::milliseconds(7_082);
/// assert_eq!(format_duration(d, &CS_CZ), "101:06:07,082");
/// ```
pub fn format_duration(duration: Duration, culture: &Culture) -> String {
    let negative = duration < Duration::zero();
    let abs = duration.abs();

    let total_seconds = abs.num_seconds();
    let nanos = (abs - Duration::seconds(total_seconds))
        .num_nanoseconds()
        .unwrap_or(0);

    let hours = total_seconds / 3600;
    let minutes = (total_seconds / 60) % 60;
    let seconds = total_seconds % 60;

    format!(
        "{}{hours}:{minutes:02}:{seconds:02}{}",
        if negative { "-" } else { "" },
        format_fraction(nanos as u32, culture)
    )
}

/// Parse `[-]h:mm[:ss[<decimal separator>fraction]]`
///
/// Hours may exceed 23; minutes and seconds must be below 60. The fractional seconds must use
/// the culture's decimal separator.
pub fn parse_duration(text: &str, culture: &Culture) -> Option<Duration> {
    let (_, sign, hours, minutes, seconds, separator, fraction) = regex_captures!(
        r"^([+-])?(\d+):(\d{1,2})(?::(\d{1,2})(?:([^\d\s])(\d{1,9}))?)?$",
        text.trim()
    )?;

    if !separator.is_empty() && !separator.starts_with(culture.decimal_separator) {
        return None;
    }

    let hours: i64 = hours.parse().ok()?;
    let minutes: i64 = minutes.parse().ok()?;
    let seconds: i64 = if seconds.is_empty() {
        0
    } else {
        seconds.parse().ok()?
    };
    if minutes >= 60 || seconds >= 60 {
        return None;
    }
    let nanos = parse_fraction_digits(fraction)?;

    let magnitude = Duration::try_hours(hours)?
        .checked_add(&Duration::minutes(minutes))?
        .checked_add(&Duration::seconds(seconds))?
        .checked_add(&Duration::nanoseconds(i64::from(nanos)))?;

    Some(if sign == "-" { -magnitude } else { magnitude })
}
