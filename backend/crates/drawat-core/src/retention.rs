//! Fixed seven-day retention window applied to every fetched record.

use chrono::{DateTime, TimeDelta, Utc};

pub const RETENTION_WINDOW_MILLIS: i64 = 7 * 24 * 60 * 60 * 1000;

pub fn retention_window() -> TimeDelta {
    TimeDelta::milliseconds(RETENTION_WINDOW_MILLIS)
}

/// True iff the record was updated strictly less than seven days before `now`.
///
/// A record stamped in the future (clock skew between writers) has a negative
/// age and is retained.
pub fn is_retained(updated_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now.signed_duration_since(updated_at) < retention_window()
}
