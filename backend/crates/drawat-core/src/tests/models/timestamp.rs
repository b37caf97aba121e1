use crate::parse_timestamp;

use chrono::{TimeZone, Utc};

#[test]
fn test_rfc3339_with_offset_is_normalized_to_utc() {
    let parsed = parse_timestamp("2025-01-02T09:00:00+09:00").unwrap();

    assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap());
}

#[test]
fn test_postgres_timestamp_without_offset_is_utc() {
    let parsed = parse_timestamp("2025-01-02T03:04:05.123456").unwrap();

    assert_eq!(parsed.timestamp(), 1735787045);
}

#[test]
fn test_garbage_timestamp_is_rejected() {
    assert!(parse_timestamp("yesterday").is_err());
}
