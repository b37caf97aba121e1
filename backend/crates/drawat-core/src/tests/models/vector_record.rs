use crate::tests::point;
use crate::{Did, VectorRecord};

use chrono::{TimeDelta, Utc};

#[test]
fn test_placeholder_has_no_drawable_paths() {
    let record = VectorRecord::placeholder(Did::new("did:plc:carol").unwrap(), Utc::now());

    assert!(record.paths.is_none());
    assert!(!record.has_drawable_paths());
    assert!(record.drawable_paths().is_empty());
}

#[test]
fn test_empty_paths_are_not_drawable() {
    let record = VectorRecord::new(Did::new("did:plc:carol").unwrap(), vec![], Utc::now());

    assert!(!record.has_drawable_paths());
}

#[test]
fn test_record_retention_uses_update_time() {
    let now = Utc::now();
    let did = Did::new("did:plc:alice").unwrap();
    let fresh = VectorRecord::new(did.clone(), vec![point(0.0, 0.0, true)], now - TimeDelta::days(2));
    let stale = VectorRecord::new(did, vec![point(0.0, 0.0, true)], now - TimeDelta::days(10));

    assert!(fresh.is_retained(now));
    assert!(!stale.is_retained(now));
}

#[test]
fn test_record_serializes_camel_case() {
    let record = VectorRecord::placeholder(Did::new("did:plc:carol").unwrap(), Utc::now());

    let json = serde_json::to_value(&record).unwrap();

    assert!(json.get("updatedAt").is_some());
    assert!(json["paths"].is_null());
}
