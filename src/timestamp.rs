//! Lenient timestamp parsing for usage log records.
//!
//! Anything that does not look like a date-time is rejected outright; a record
//! with an unparseable timestamp is dropped by the caller, never defaulted.

use chrono::{DateTime, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static DATETIME_SHAPE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}[Tt ]\d{2}:\d{2}(:\d{2}(\.\d+)?)?([Zz]|[+-]\d{2}:?\d{2})?$")
        .expect("valid timestamp regex")
});

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M%z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Read the `timestamp` field of a record.
pub fn record_timestamp(record: &Value) -> Option<DateTime<Utc>> {
    parse_timestamp(record.get("timestamp"))
}

pub fn parse_timestamp(value: Option<&Value>) -> Option<DateTime<Utc>> {
    parse_timestamp_str(value?.as_str()?)
}

pub fn parse_timestamp_str(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if !DATETIME_SHAPE_RE.is_match(s) {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    // Offset formats below take a numeric offset only
    let s = s.replace('t', "T");
    let normalized = match s.strip_suffix(['Z', 'z']) {
        Some(head) => format!("{head}+00:00"),
        None => s.clone(),
    };
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&normalized, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, fmt) {
            return Some(naive.and_utc());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn parses_rfc3339_with_z_and_fraction() {
        assert_eq!(
            parse_timestamp_str("2025-08-20T10:15:30.123Z").map(|d| d.timestamp()),
            Some(utc(2025, 8, 20, 10, 15, 30).timestamp())
        );
    }

    #[test]
    fn converts_offsets_to_utc() {
        assert_eq!(
            parse_timestamp_str("2025-08-20T12:15:30+02:00"),
            Some(utc(2025, 8, 20, 10, 15, 30))
        );
        assert_eq!(
            parse_timestamp_str("2025-08-20T12:15:30+0200"),
            Some(utc(2025, 8, 20, 10, 15, 30))
        );
    }

    #[test]
    fn naive_and_space_separated_are_utc() {
        assert_eq!(
            parse_timestamp_str("2025-08-20 10:15:30"),
            Some(utc(2025, 8, 20, 10, 15, 30))
        );
        assert_eq!(
            parse_timestamp_str("2025-08-20T10:15"),
            Some(utc(2025, 8, 20, 10, 15, 0))
        );
    }

    #[test]
    fn rejects_garbage_and_non_strings() {
        assert_eq!(parse_timestamp_str("yesterday"), None);
        assert_eq!(parse_timestamp_str("2025-13-40T99:99:99Z"), None);
        assert_eq!(parse_timestamp_str(""), None);
        assert_eq!(parse_timestamp(Some(&serde_json::json!(1724145330))), None);
        assert_eq!(parse_timestamp(None), None);
    }
}
