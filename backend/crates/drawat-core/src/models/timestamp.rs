use crate::{CoreError, CoreResult};

use std::panic::Location;

use chrono::{DateTime, NaiveDateTime, Utc};
use error_location::ErrorLocation;
use serde::{Deserialize, Deserializer};

/// Parse a store timestamp.
///
/// Accepts RFC 3339 with any offset, and the offset-less form Postgres emits
/// for `timestamp` columns, which is taken as UTC.
#[track_caller]
pub fn parse_timestamp(value: &str) -> CoreResult<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
        .map_err(|_| CoreError::InvalidTimestamp {
            value: value.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
}

/// Serde adapter for [`parse_timestamp`].
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

/// Serde adapter for optional timestamps; `null` and missing both map to `None`.
pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_timestamp(&raw)
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}
