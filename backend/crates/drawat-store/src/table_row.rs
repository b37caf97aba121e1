use drawat_core::models::timestamp;
use drawat_core::{Did, VectorRecord, decode_paths};

use chrono::{DateTime, Utc};
use log::warn;
use serde::Deserialize;
use serde_json::Value;

/// One row of the centralized table: `{did, vector, created_at, updated_at}`.
///
/// `vector` is kept raw until the row is turned into a record, since
/// writers have stored it as `null`, as an array, or as a JSON string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TableRow {
    pub did: Did,
    #[serde(default)]
    pub vector: Option<Value>,
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub updated_at: DateTime<Utc>,
}

impl TableRow {
    /// Undecodable vectors degrade to "registered, nothing drawable".
    pub fn into_record(self) -> VectorRecord {
        let paths = match decode_paths(self.vector) {
            Ok(paths) => paths,
            Err(e) => {
                warn!(
                    "[WARN] Undecodable vector for DID: {}, treating as empty: {}",
                    self.did, e
                );
                None
            }
        };

        VectorRecord {
            did: self.did,
            paths,
            updated_at: self.updated_at,
        }
    }
}
