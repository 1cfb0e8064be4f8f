//! Serial date/time arithmetic
//!
//! Spreadsheets store dates and durations as a count of days (the "serial number").
//!
//! Notes:
//! - Serial day 1 is 1900-01-01. The fractional part is the time of day.
//! - The 1900 date system carries the historical "1900 leap year" bug: serial 60 is the
//!   non-existent 1900-02-29, so every date from 1900-03-01 on is one day later than a plain
//!   day count from 1899-12-31 would give.
//! - Durations have no epoch; a duration of one day is `1.0`.
//! - Resolution is one millisecond, the same as the file format.

use crate::error::SerialError;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Smallest serial that maps to a calendar date (1900-01-01)
pub const MIN_SERIAL: f64 = 1.0;

/// Largest whole serial that maps to a calendar date (9999-12-31)
pub const MAX_SERIAL: f64 = 2_958_465.0;

/// Milliseconds in one day
pub const MS_PER_DAY: i64 = 86_400_000;

/// `num_days_from_ce` of 1899-12-30, serial zero for dates after the fictitious leap day
const EPOCH_DAYS_FROM_CE: i64 = 693_594;

/// Serial of the fictitious 1900-02-29
const LEAP_BUG_SERIAL: i64 = 60;

fn millis_of_day(time: NaiveTime) -> i64 {
    // chrono encodes a leap second as nanosecond >= 1e9
    let millis = (time.nanosecond() / 1_000_000).min(999);
    i64::from(time.num_seconds_from_midnight()) * 1000 + i64::from(millis)
}

fn is_before_leap_bug(dt: &NaiveDateTime) -> bool {
    (dt.year(), dt.month()) < (1900, 3)
}

/// Convert a date-time to its serial number
///
/// Total for every `NaiveDateTime`; dates before 1900 produce serials below 1. Use
/// [`checked_date_time_to_serial`] when the result must be a valid spreadsheet date.
pub fn date_time_to_serial(dt: NaiveDateTime) -> f64 {
    let days = i64::from(dt.date().num_days_from_ce()) - EPOCH_DAYS_FROM_CE;
    let mut millis = days * MS_PER_DAY + millis_of_day(dt.time());
    if is_before_leap_bug(&dt) {
        millis -= MS_PER_DAY;
    }
    millis as f64 / MS_PER_DAY as f64
}

/// Convert a date-time to its serial number, failing outside 1900-01-01..=9999-12-31
pub fn checked_date_time_to_serial(dt: NaiveDateTime) -> Result<f64, SerialError> {
    let serial = date_time_to_serial(dt);
    if (1900..=9999).contains(&dt.year()) {
        Ok(serial)
    } else {
        Err(SerialError::OutOfRange(serial))
    }
}

/// Convert a serial number to a date-time
///
/// Accepts serials in `[1, 2958466)`, rounded to the millisecond. Every whole serial in that
/// range round-trips through [`date_time_to_serial`] except 60: it names the fictitious
/// 1900-02-29 and fails with [`SerialError::NonexistentDate`].
///
/// # Examples
/// ```
/// use duke_sheets_value::serial::serial_to_date_time;
/// use chrono::NaiveDate;
///
/// let dt = serial_to_date_time(61.75).unwrap();
/// assert_eq!(dt, NaiveDate::from_ymd_opt(1900, 3, 1).unwrap().and_hms_opt(18, 0, 0).unwrap());
///
/// assert!(serial_to_date_time(60.0).is_err()); // 1900-02-29 never existed
/// assert!(serial_to_date_time(2958466.0).is_err());
/// ```
pub fn serial_to_date_time(serial: f64) -> Result<NaiveDateTime, SerialError> {
    if !serial.is_finite() || serial < MIN_SERIAL || serial >= MAX_SERIAL + 1.0 {
        return Err(SerialError::OutOfRange(serial));
    }

    let millis = (serial * MS_PER_DAY as f64).round() as i64;
    let day = millis.div_euclid(MS_PER_DAY);
    let ms_of_day = millis.rem_euclid(MS_PER_DAY);

    if day == LEAP_BUG_SERIAL {
        return Err(SerialError::NonexistentDate(serial));
    }
    let day_offset = if day < LEAP_BUG_SERIAL { day + 1 } else { day };

    let date = i32::try_from(EPOCH_DAYS_FROM_CE + day_offset)
        .ok()
        .and_then(NaiveDate::from_num_days_from_ce_opt)
        .filter(|d| d.year() <= 9999)
        .ok_or(SerialError::OutOfRange(serial))?;

    let time = NaiveTime::from_num_seconds_from_midnight_opt(
        (ms_of_day / 1000) as u32,
        ((ms_of_day % 1000) * 1_000_000) as u32,
    )
    .ok_or(SerialError::OutOfRange(serial))?;

    Ok(date.and_time(time))
}

/// Convert a duration to a (fractional) number of days
pub fn duration_to_days(duration: Duration) -> f64 {
    duration.num_milliseconds() as f64 / MS_PER_DAY as f64
}

/// Convert a (fractional) number of days to a duration, rounded to the millisecond
pub fn days_to_duration(days: f64) -> Result<Duration, SerialError> {
    let millis = (days * MS_PER_DAY as f64).round();
    if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
        return Err(SerialError::DurationOverflow(days));
    }
    Duration::try_milliseconds(millis as i64).ok_or(SerialError::DurationOverflow(days))
}

/// Time elapsed since midnight of the date-time's day
pub fn time_of_day(dt: NaiveDateTime) -> Duration {
    time_to_duration(dt.time())
}

/// Time elapsed since midnight
pub fn time_to_duration(time: NaiveTime) -> Duration {
    Duration::seconds(i64::from(time.num_seconds_from_midnight()))
        + Duration::nanoseconds(i64::from(time.nanosecond()))
}
