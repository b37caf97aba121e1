//! Decoding of stored path payloads.
//!
//! Writers have stored paths either as a JSON array of points or as a JSON
//! string containing that array. Both decode to the same point sequence;
//! `null` means the identity is registered but has never drawn.

use crate::{CoreError, CoreResult, StrokePoint};

use std::panic::Location;

use error_location::ErrorLocation;
use serde_json::Value;

#[track_caller]
pub fn decode_paths(payload: Option<Value>) -> CoreResult<Option<Vec<StrokePoint>>> {
    match payload {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(encoded)) => {
            if encoded.trim().is_empty() {
                return Ok(None);
            }
            let decoded: Value = serde_json::from_str(&encoded).map_err(|e| CoreError::Json {
                source: e,
                location: ErrorLocation::from(Location::caller()),
            })?;
            if let Value::String(_) = decoded {
                return Err(CoreError::InvalidPaths {
                    message: "doubly encoded path payload".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
            decode_paths(Some(decoded))
        }
        Some(array @ Value::Array(_)) => serde_json::from_value(array)
            .map(Some)
            .map_err(|e| CoreError::Json {
                source: e,
                location: ErrorLocation::from(Location::caller()),
            }),
        Some(other) => Err(CoreError::InvalidPaths {
            message: format!("expected array, string or null, got {}", json_kind(&other)),
            location: ErrorLocation::from(Location::caller()),
        }),
    }
}

/// Encode points as the array form every current writer uses.
#[track_caller]
pub fn encode_paths(paths: &[StrokePoint]) -> CoreResult<Value> {
    serde_json::to_value(paths).map_err(|e| CoreError::Json {
        source: e,
        location: ErrorLocation::from(Location::caller()),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
