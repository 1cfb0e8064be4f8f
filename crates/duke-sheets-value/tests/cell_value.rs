//! Cell value behaviour through the public API

use chrono::{Duration, NaiveDate, NaiveDateTime};
use duke_sheets_value::culture::{CS_CZ, INVARIANT};
use duke_sheets_value::serial::{date_time_to_serial, serial_to_date_time};
use duke_sheets_value::{Blank, CellError, CellValue, ConversionError, ValueType};
use pretty_assertions::assert_eq;

fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn dhms(days: i64, hours: i64, minutes: i64, seconds: i64, millis: i64) -> Duration {
    Duration::days(days)
        + Duration::hours(hours)
        + Duration::minutes(minutes)
        + Duration::seconds(seconds)
        + Duration::milliseconds(millis)
}

/// Every variant, one value each
fn one_of_each() -> Vec<CellValue> {
    vec![
        CellValue::Blank,
        CellValue::from(true),
        CellValue::number(14.0).unwrap(),
        CellValue::text("Text").unwrap(),
        CellValue::error(CellError::Ref),
        CellValue::date_time(date(1900, 1, 1)),
        CellValue::duration(dhms(2, 12, 0, 0, 0)),
    ]
}

#[test]
fn test_unified_number_is_defined_exactly_on_numeric_variants() {
    for value in one_of_each() {
        let numeric = matches!(
            value.value_type(),
            ValueType::Number | ValueType::DateTime | ValueType::Duration
        );
        assert_eq!(value.is_unified_number(), numeric, "{:?}", value);
        assert_eq!(value.get_unified_number().is_ok(), numeric, "{:?}", value);
    }
}

#[test]
fn test_serial_date_time() {
    let cases = [
        (date(1900, 1, 1), 1.0),
        (date(1900, 1, 2), 2.0),
        (date(1900, 2, 1), 32.0),
        (date(1900, 2, 28), 59.0), // 1900-02-29 is serial 60
        (date(1900, 3, 1), 61.0),
        (date(2017, 1, 1), 42736.0),
    ];
    for (dt, expected) in cases {
        assert_eq!(
            CellValue::date_time(dt).get_unified_number().unwrap(),
            expected
        );
        assert_eq!(date_time_to_serial(dt), expected);
        assert_eq!(serial_to_date_time(expected).unwrap(), dt);
    }
}

#[test]
fn test_to_string_respects_culture() {
    let c = &CS_CZ;
    assert_eq!(CellValue::Blank.to_display_string(c), "");
    assert_eq!(CellValue::from(true).to_display_string(c), "TRUE");
    assert_eq!(CellValue::number(25.4).unwrap().to_display_string(c), "25,4");
    assert_eq!(CellValue::text("Hello").unwrap().to_display_string(c), "Hello");
    assert_eq!(
        CellValue::error(CellError::Value).to_display_string(c),
        "#VALUE!"
    );
    assert_eq!(
        CellValue::date_time(date(1900, 1, 2)).to_display_string(c),
        "02.01.1900 0:00:00"
    );
    assert_eq!(
        CellValue::date_time(date(1900, 3, 1) + dhms(0, 4, 10, 5, 0)).to_display_string(c),
        "01.03.1900 4:10:05"
    );
    assert_eq!(
        CellValue::duration(dhms(4, 5, 6, 7, 82)).to_display_string(c),
        "101:06:07,082"
    );
}

#[test]
fn test_try_convert_blank() {
    assert_eq!(CellValue::Blank.try_convert::<Blank>(&INVARIANT), Ok(Blank));
    assert_eq!(
        CellValue::text("").unwrap().try_convert::<Blank>(&INVARIANT),
        Ok(Blank)
    );
}

#[test]
fn test_try_convert_boolean() {
    let c = &INVARIANT;
    assert_eq!(CellValue::from(true).try_convert::<bool>(c), Ok(true));
    assert_eq!(CellValue::text("True").unwrap().try_convert::<bool>(c), Ok(true));
    assert_eq!(CellValue::text("False").unwrap().try_convert::<bool>(c), Ok(false));
    assert_eq!(CellValue::from(0).try_convert::<bool>(c), Ok(false));
    assert_eq!(CellValue::number(0.001).unwrap().try_convert::<bool>(c), Ok(true));
}

#[test]
fn test_try_convert_number() {
    let c = &CS_CZ;
    assert_eq!(CellValue::from(5).try_convert::<f64>(c), Ok(5.0));
    assert_eq!(CellValue::text("1,5").unwrap().try_convert::<f64>(c), Ok(1.5));
    assert_eq!(CellValue::text("1 1/4").unwrap().try_convert::<f64>(c), Ok(1.25));
    assert_eq!(CellValue::text("3.1.1900").unwrap().try_convert::<f64>(c), Ok(3.0));
    assert_eq!(CellValue::from(true).try_convert::<f64>(c), Ok(1.0));
    assert_eq!(CellValue::from(false).try_convert::<f64>(c), Ok(0.0));

    let dt = date(2020, 4, 5) + dhms(0, 10, 14, 5, 0);
    assert_eq!(
        CellValue::date_time(dt).try_convert::<f64>(c),
        Ok(43926.42644675926)
    );
    assert_eq!(
        CellValue::duration(dhms(0, 18, 0, 0, 0)).try_convert::<f64>(c),
        Ok(0.75)
    );
}

#[test]
fn test_try_convert_date_time() {
    let c = &INVARIANT;
    let v = CellValue::date_time(date(2020, 1, 1));
    assert_eq!(v.try_convert::<NaiveDateTime>(c), Ok(date(2020, 1, 1)));

    let last_serial_date = 2958465;
    let v = CellValue::from(last_serial_date);
    assert_eq!(v.try_convert::<NaiveDateTime>(c), Ok(date(9999, 12, 31)));

    let v = CellValue::from(last_serial_date + 1);
    let err = v.try_convert::<NaiveDateTime>(c).unwrap_err();
    assert!(err.is_out_of_range());

    let v = CellValue::duration(Duration::days(14));
    assert_eq!(v.try_convert::<NaiveDateTime>(c), Ok(date(1900, 1, 14)));
}

#[test]
fn test_try_convert_duration() {
    let c = &CS_CZ;
    let v = CellValue::duration(dhms(0, 10, 15, 30, 0));
    assert_eq!(v.try_convert::<Duration>(c), Ok(dhms(0, 10, 15, 30, 0)));

    let v = CellValue::text("26:15:30,5").unwrap();
    assert_eq!(v.try_convert::<Duration>(c), Ok(dhms(1, 2, 15, 30, 500)));

    let v = CellValue::number(0.75).unwrap();
    assert_eq!(v.try_convert::<Duration>(c), Ok(dhms(0, 18, 0, 0, 0)));
}

#[test]
fn test_errors_never_convert() {
    for e in CellError::ALL {
        let v = CellValue::error(e);
        assert_eq!(
            v.try_convert::<f64>(&INVARIANT),
            Err(ConversionError::ErrorValue(e))
        );
        assert_eq!(
            v.try_convert::<String>(&INVARIANT),
            Err(ConversionError::ErrorValue(e))
        );
    }
}

#[test]
fn test_every_non_error_value_converts_to_text() {
    for value in one_of_each() {
        let result = value.try_convert::<String>(&CS_CZ);
        assert_eq!(result.is_ok(), !value.is_error(), "{:?}", value);
    }
}

#[test]
fn test_values_are_shared_across_threads() {
    let values = one_of_each();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let values = values.clone();
            std::thread::spawn(move || {
                values
                    .iter()
                    .map(|v| v.to_display_string(&CS_CZ))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let expected: Vec<String> = values.iter().map(|v| v.to_display_string(&CS_CZ)).collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
