use crate::tests::point;
use crate::{decode_paths, encode_paths};

use serde_json::{Value, json};

#[test]
fn test_null_payload_means_never_drawn() {
    assert_eq!(decode_paths(None).unwrap(), None);
    assert_eq!(decode_paths(Some(Value::Null)).unwrap(), None);
}

#[test]
fn test_array_payload_decodes_points() {
    let payload = json!([
        {"x": 1.5, "y": 2.0, "color": "#123456", "size": 4, "isNewStroke": true, "author": "did:plc:bob"}
    ]);

    let decoded = decode_paths(Some(payload)).unwrap().unwrap();

    assert_eq!(decoded.len(), 1);
    assert_eq!(decoded[0].x, 1.5);
    assert_eq!(decoded[0].size, 4.0);
    assert!(decoded[0].is_new_stroke);
    assert_eq!(decoded[0].author, "did:plc:bob");
}

#[test]
fn test_string_payload_decodes_like_array() {
    let points = vec![point(1.0, 2.0, true), point(3.0, 4.0, false)];
    let blob = serde_json::to_string(&points).unwrap();

    let decoded = decode_paths(Some(Value::String(blob))).unwrap();

    assert_eq!(decoded, Some(points));
}

#[test]
fn test_unknown_point_fields_are_ignored() {
    let payload = json!([
        {"x": 0, "y": 0, "color": "#000", "size": 1, "isNewStroke": true, "author": "a", "pressure": 0.7}
    ]);

    let decoded = decode_paths(Some(payload)).unwrap().unwrap();

    assert_eq!(decoded.len(), 1);
}

#[test]
fn test_object_payload_is_rejected() {
    let result = decode_paths(Some(json!({"paths": []})));

    assert!(result.is_err());
}

#[test]
fn test_garbage_string_payload_is_rejected() {
    let result = decode_paths(Some(Value::String("not json".to_string())));

    assert!(result.is_err());
}

#[test]
fn test_encode_uses_camel_case_marker() {
    let encoded = encode_paths(&[point(0.0, 0.0, true)]).unwrap();

    assert_eq!(encoded[0]["isNewStroke"], json!(true));
}
