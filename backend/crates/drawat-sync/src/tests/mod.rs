
use drawat_core::{Did, StrokePoint, VectorRecord};

use chrono::{DateTime, TimeZone, Utc};

pub(crate) fn at(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, minute, 0).unwrap()
}

pub(crate) fn did(value: &str) -> Did {
    Did::new(value).unwrap()
}

pub(crate) fn points(author: &str, xs: &[f64]) -> Vec<StrokePoint> {
    xs.iter()
        .enumerate()
        .map(|(i, x)| StrokePoint::new(*x, *x, "#000000", 1.0, i == 0, author))
        .collect()
}

pub(crate) fn record(author: &str, xs: &[f64], minute: u32) -> VectorRecord {
    VectorRecord::new(did(author), points(author, xs), at(minute))
}
