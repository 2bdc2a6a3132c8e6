use std::sync::Arc;

use chrono::{DateTime, TimeZone, Timelike, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use rowcodec::codec::{CharsetService, ColumnCodec, Value};
use rowcodec::common::{CodecError, ColumnDescriptor, ColumnType};
use rowcodec::temporal::{TemporalValue, TimeParseMode};

#[test]
fn test_time_string_roundtrip() {
    let t = TemporalValue::from_time_string("13:05:07.123456").with_fsp(6);
    assert_eq!(t.to_time_string(), "13:05:07.123456");
}

#[test]
fn test_negative_time_fields() {
    let t = TemporalValue::from_time_string("-02:30:00");
    assert!(t.is_valid());
    assert_eq!(t.sign, -1);
    assert_eq!((t.hour, t.minute, t.second), (2, 30, 0));
}

#[test]
fn test_datetime_string_roundtrip() {
    let t = TemporalValue::from_datetime_string("2024-01-05 08:09:10.5").with_fsp(1);
    assert_eq!(t.to_datetime_string(), "2024-01-05 08:09:10.5");
}

#[test]
fn test_fsp_only_affects_rendering() {
    let t = TemporalValue::from_time_string("01:02:03.987654");
    assert_eq!(t.with_fsp(2).to_time_string(), "01:02:03.98");
    assert_eq!(t.with_fsp(2).microsecond, 987_654);
    assert_eq!(t.with_fsp(0).to_time_string(), "01:02:03");
}

#[test]
fn test_legacy_mode_is_opt_in() {
    let default = TemporalValue::from_time_string("12:34");
    assert_eq!((default.hour, default.minute, default.second), (0, 12, 34));

    let legacy = TemporalValue::from_time_string_with("12:34", TimeParseMode::Legacy);
    assert_eq!((legacy.hour, legacy.minute, legacy.second), (12, 34, 0));
}

#[test]
fn test_malformed_strings_flag_invalid() {
    assert!(!TemporalValue::from_time_string("noon").is_valid());
    assert!(!TemporalValue::from_date_string("yesterday").is_valid());
    assert!(!TemporalValue::from_datetime_string("2024-01-05 25:00:00").is_valid());
}

fn random_utc(rng: &mut StdRng) -> DateTime<Utc> {
    let secs = rng.gen_range(0..253_402_300_799i64); // through 9999-12-31
    let nanos = rng.gen_range(0..1_000_000_000u32);
    Utc.timestamp_opt(secs, nanos).unwrap()
}

#[test]
fn test_native_utc_roundtrip_is_millisecond_exact() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let d = random_utc(&mut rng);
        let t = TemporalValue::from_native_utc(&d);
        let back = t.to_native_utc().unwrap();

        let truncated = d
            .with_nanosecond(d.nanosecond() / 1_000_000 * 1_000_000)
            .unwrap();
        assert_eq!(back, truncated);
    }
}

#[test]
fn test_native_string_native_roundtrip() {
    let d = Utc.with_ymd_and_hms(1999, 12, 31, 23, 59, 58).unwrap();
    let d = d.with_nanosecond(250_000_000).unwrap();

    let text = TemporalValue::from_native_utc(&d).to_datetime_string();
    assert_eq!(text, "1999-12-31 23:59:58.250");

    let parsed = TemporalValue::from_datetime_string(&text);
    assert_eq!(parsed.to_native_utc(), Some(d));
}

#[test]
fn test_packed_columns_through_codec() {
    let codec = ColumnCodec::new(Arc::new(CharsetService::new()));
    let mut buf = vec![0u8; 8];

    let date = ColumnDescriptor::of(ColumnType::Date);
    codec.write(&date, &Value::from("2024-02-29"), &mut buf, 0).unwrap();
    assert_eq!(
        codec.read(&date, &buf, 0).unwrap(),
        Value::Temporal(TemporalValue::date(2024, 2, 29))
    );

    let datetime = ColumnDescriptor::of(ColumnType::DateTime);
    let native = Utc.with_ymd_and_hms(2024, 1, 5, 8, 9, 10).unwrap();
    let value = Value::Temporal(TemporalValue::from_native_utc(&native));
    codec.write(&datetime, &value, &mut buf, 0).unwrap();
    let Value::Temporal(read) = codec.read(&datetime, &buf, 0).unwrap() else {
        panic!("expected a temporal value");
    };
    assert_eq!(read.to_native_utc(), Some(native));
}

#[test]
fn test_invalid_temporal_rejected_by_codec() {
    let codec = ColumnCodec::new(Arc::new(CharsetService::new()));
    let mut buf = vec![0u8; 8];
    let column = ColumnDescriptor::of(ColumnType::DateTime);

    let err = codec
        .write(&column, &Value::Temporal(TemporalValue::invalid()), &mut buf, 0)
        .unwrap_err();
    assert!(matches!(err, CodecError::InvalidTemporal(_)));
    assert_eq!(buf, vec![0u8; 8]);
}
