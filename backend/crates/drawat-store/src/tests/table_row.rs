use crate::TableRow;

use chrono::{TimeZone, Utc};
use googletest::assert_that;
use googletest::prelude::{eq, none, some};
use serde_json::json;

fn row(vector: serde_json::Value) -> TableRow {
    serde_json::from_value(json!({
        "did": "did:plc:alice",
        "vector": vector,
        "created_at": "2025-01-01T00:00:00Z",
        "updated_at": "2025-01-02 03:04:05.678",
    }))
    .unwrap()
}

fn points() -> serde_json::Value {
    json!([
        {"x": 1.0, "y": 2.0, "color": "#ff0000", "size": 3.0, "isNewStroke": true, "author": "did:plc:alice"},
        {"x": 4.0, "y": 5.0, "color": "#ff0000", "size": 3.0, "isNewStroke": false, "author": "did:plc:alice"}
    ])
}

#[test]
fn test_offsetless_timestamp_is_read_as_utc() {
    let row = row(json!(null));

    let expected = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap()
        + chrono::TimeDelta::milliseconds(678);
    assert_that!(row.updated_at, eq(expected));
}

#[test]
fn test_null_vector_is_registered_without_paths() {
    let record = row(json!(null)).into_record();

    assert_that!(record.paths, none());
    assert!(!record.has_drawable_paths());
}

#[test]
fn test_array_vector_decodes_points() {
    let record = row(points()).into_record();

    assert_that!(record.drawable_paths().len(), eq(2));
    assert!(record.drawable_paths()[0].is_new_stroke);
}

#[test]
fn test_string_vector_decodes_same_as_array() {
    let encoded = serde_json::to_string(&points()).unwrap();

    let from_string = row(json!(encoded)).into_record();
    let from_array = row(points()).into_record();

    assert_that!(from_string.paths, eq(&from_array.paths));
}

#[test]
fn test_garbage_vector_degrades_to_no_paths() {
    let record = row(json!("{not json")).into_record();

    assert_that!(record.paths, none());
    assert_that!(record.did.as_str(), eq("did:plc:alice"));
}

#[test]
fn test_missing_created_at_is_tolerated() {
    let row: TableRow = serde_json::from_value(json!({
        "did": "did:plc:bob",
        "updated_at": "2025-01-02T00:00:00Z",
    }))
    .unwrap();

    assert_that!(row.created_at, none());
    assert_that!(row.vector, none());
}

#[test]
fn test_blank_did_row_is_rejected() {
    let result = serde_json::from_value::<TableRow>(json!({
        "did": "",
        "updated_at": "2025-01-02T00:00:00Z",
    }));

    assert!(result.is_err());
}

#[test]
fn test_created_at_parsed_when_present() {
    let row = row(json!(null));

    assert_that!(
        row.created_at,
        some(eq(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()))
    );
}
