//! Conversion of stored field values into JSON-safe values.
//!
//! [`normalize`] is total: every [`FieldValue`] maps to a [`serde_json::Value`] that only
//! contains strings, numbers, booleans, nulls, arrays and objects. Date-times are rendered
//! in the service's local zone ([`LOCAL_TZ`]) as RFC 3339 strings with a numeric offset.
//!
//! The arms are ordered from the most specific kind to the most generic one: timestamps
//! and geo-points are handled before the structural list and map arms, and values of
//! kinds this crate does not model pass through untouched.

use chrono::{
    DateTime, FixedOffset, LocalResult, NaiveDateTime, Offset, SecondsFormat, TimeDelta,
    TimeZone, Utc,
};
use chrono_tz::Tz;
use serde_json::{Map, Number, Value};

use crate::value::{FieldMap, FieldValue, GeoPoint, NativeNumber};

/// Zone every rendered date-time is expressed in.
pub const LOCAL_TZ: Tz = chrono_tz::America::Santiago;

/// Converts a field value into its JSON-safe form.
pub fn normalize(value: FieldValue) -> Value {
    match value {
        FieldValue::Timestamp(instant) => Value::String(render(instant.with_timezone(&LOCAL_TZ).fixed_offset())),
        FieldValue::DateTime(zoned) => Value::String(render(zoned.with_timezone(&LOCAL_TZ).fixed_offset())),
        FieldValue::LocalDateTime(naive) => Value::String(render(assume_local(naive))),
        FieldValue::GeoPoint(point) => geo_point(point),
        FieldValue::Array(items) => Value::Array(
            items
                .into_iter()
                .map(normalize)
                .collect(),
        ),
        FieldValue::Map(fields) => Value::Object(normalize_fields(fields)),
        FieldValue::Native(number) => native_number(number),
        FieldValue::Null => Value::Null,
        FieldValue::Bool(b) => Value::Bool(b),
        FieldValue::Integer(i) => Value::from(i),
        FieldValue::Float(f) => float(f),
        FieldValue::String(s) => Value::String(s),
        FieldValue::Other(value) => {
            #[cfg(debug_assertions)]
            tracing::debug!(value = %value, "passing through value of unmodelled kind");

            value
        }
    }
}

/// Normalizes every value of a field map, keeping the keys.
pub fn normalize_fields(fields: FieldMap) -> Map<String, Value> {
    fields
        .into_iter()
        .map(|(k, v)| (k, normalize(v)))
        .collect()
}

fn render(datetime: DateTime<FixedOffset>) -> String {
    datetime.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

/// Reads a zone-less date-time as local wall-clock time.
///
/// Ambiguous wall-clock times (end of daylight saving) resolve to the earlier instant.
/// Times inside a daylight-saving gap keep the offset in force before the transition.
fn assume_local(naive: NaiveDateTime) -> DateTime<FixedOffset> {
    match LOCAL_TZ.from_local_datetime(&naive) {
        LocalResult::Single(datetime) => datetime.fixed_offset(),
        LocalResult::Ambiguous(earliest, _) => earliest.fixed_offset(),
        LocalResult::None => {
            let before = LOCAL_TZ
                .offset_from_utc_datetime(&(naive - TimeDelta::hours(12)))
                .fix();

            before
                .from_local_datetime(&naive)
                .earliest()
                .unwrap_or_else(|| Utc.from_utc_datetime(&naive).fixed_offset())
        }
    }
}

fn geo_point(point: GeoPoint) -> Value {
    let mut map = Map::with_capacity(2);
    map.insert("latitude".to_string(), float(point.latitude));
    map.insert("longitude".to_string(), float(point.longitude));
    Value::Object(map)
}

fn native_number(number: NativeNumber) -> Value {
    match number {
        NativeNumber::Int32(i) => Value::from(i),
        NativeNumber::UInt32(u) => Value::from(u),
        NativeNumber::UInt64(u) => Value::from(u),
        NativeNumber::Float32(f) => float(f64::from(f)),
        NativeNumber::Decimal(text) => match text.parse::<f64>() {
            Ok(f) => float(f),
            Err(_) => Value::String(text),
        },
    }
}

/// JSON has no NaN or infinities; those become `null`.
fn float(f: f64) -> Value {
    Number::from_f64(f)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn naive(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn zone_less_datetime_is_read_as_local_time() {
        // Summer (daylight saving) and winter offsets.
        assert_eq!(
            normalize(FieldValue::LocalDateTime(naive(2024, 1, 15, 12, 0))),
            json!("2024-01-15T12:00:00-03:00")
        );
        assert_eq!(
            normalize(FieldValue::LocalDateTime(naive(2024, 7, 15, 12, 0))),
            json!("2024-07-15T12:00:00-04:00")
        );
    }

    #[test]
    fn native_timestamp_is_converted_with_nanoseconds() {
        let instant = Utc.with_ymd_and_hms(2024, 7, 15, 16, 0, 0).unwrap()
            + TimeDelta::nanoseconds(123_456_789);

        assert_eq!(
            normalize(FieldValue::Timestamp(instant)),
            json!("2024-07-15T12:00:00.123456789-04:00")
        );
    }

    #[test]
    fn zoned_datetime_is_converted_to_local_zone() {
        let tokyo = FixedOffset::east_opt(9 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 16, 0, 0, 0)
            .unwrap();

        assert_eq!(
            normalize(FieldValue::DateTime(tokyo)),
            json!("2024-01-15T12:00:00-03:00")
        );
    }

    #[test]
    fn ambiguous_and_missing_local_times_resolve() {
        // 2024-04-06 23:30 happens twice; the first one is still on daylight time.
        assert_eq!(
            normalize(FieldValue::LocalDateTime(naive(2024, 4, 6, 23, 30))),
            json!("2024-04-06T23:30:00-03:00")
        );
        // 2024-09-08 00:30 is skipped by the clocks.
        assert_eq!(
            normalize(FieldValue::LocalDateTime(naive(2024, 9, 8, 0, 30))),
            json!("2024-09-08T00:30:00-04:00")
        );
    }

    #[test]
    fn geo_point_has_exactly_two_keys() {
        let value = normalize(FieldValue::GeoPoint(GeoPoint::new(-33.45, -70.66)));

        assert_eq!(value, json!({"latitude": -33.45, "longitude": -70.66}));
        assert_eq!(value.as_object().unwrap().len(), 2);
    }

    #[test]
    fn native_numbers_become_plain_numbers() {
        assert_eq!(normalize(NativeNumber::Int32(-5).into()), json!(-5));
        assert_eq!(normalize(NativeNumber::UInt32(5).into()), json!(5));
        assert_eq!(normalize(NativeNumber::UInt64(u64::MAX).into()), json!(u64::MAX));
        assert_eq!(normalize(NativeNumber::Float32(0.5).into()), json!(0.5));
        assert_eq!(normalize(NativeNumber::Decimal("1.25E+2".to_string()).into()), json!(125.0));
        assert!(normalize(NativeNumber::Int32(1).into()).is_i64());
    }

    #[test]
    fn non_finite_floats_become_null() {
        assert_eq!(normalize(FieldValue::Float(f64::NAN)), Value::Null);
        assert_eq!(normalize(NativeNumber::Decimal("Infinity".to_string()).into()), Value::Null);
    }

    #[test]
    fn unmodelled_values_pass_through() {
        let raw = json!({"$binary": {"base64": "AAE=", "subType": "00"}});

        assert_eq!(normalize(FieldValue::Other(raw.clone())), raw);
    }

    #[test]
    fn nested_structures_are_normalized_all_the_way_down() {
        let mut inner = FieldMap::new();
        inner.insert("at".to_string(), FieldValue::LocalDateTime(naive(2024, 1, 15, 12, 0)));
        inner.insert("where".to_string(), GeoPoint::new(1.0, 2.0).into());

        let value = FieldValue::Array(vec![
            FieldValue::Map(inner),
            FieldValue::Array(vec![NativeNumber::Int32(3).into(), FieldValue::Null]),
        ]);

        assert_eq!(
            normalize(value),
            json!([
                {"at": "2024-01-15T12:00:00-03:00", "where": {"latitude": 1.0, "longitude": 2.0}},
                [3, null]
            ])
        );
    }

    #[test]
    fn normalization_is_idempotent() {
        let mut fields = FieldMap::new();
        fields.insert("creado".to_string(), Utc.with_ymd_and_hms(2024, 3, 1, 15, 30, 0).unwrap().into());
        fields.insert("pos".to_string(), GeoPoint::new(-33.0, -70.0).into());
        fields.insert("ratio".to_string(), NativeNumber::Float32(0.1).into());
        fields.insert("count".to_string(), NativeNumber::UInt64(u64::MAX).into());
        fields.insert(
            "tags".to_string(),
            FieldValue::Array(vec!["a".into(), FieldValue::Bool(true), FieldValue::Integer(-1)]),
        );

        let once = normalize(FieldValue::Map(fields));
        let twice = normalize(FieldValue::from(once.clone()));

        assert_eq!(once, twice);
    }
}
