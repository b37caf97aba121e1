pub mod clock;
pub mod error;
pub mod models;
pub mod retention;

#[cfg(test)]
mod tests;

pub use error_location::ErrorLocation;

pub use clock::{Clock, SystemClock};
pub use error::{CoreError, Result as CoreResult};
pub use models::agent::Agent;
pub use models::did::Did;
pub use models::paths_payload::{decode_paths, encode_paths};
pub use models::stroke::{Stroke, flatten_strokes, split_strokes};
pub use models::stroke_point::StrokePoint;
pub use models::timestamp::parse_timestamp;
pub use models::vector_record::VectorRecord;
pub use retention::{RETENTION_WINDOW_MILLIS, is_retained, retention_window};

#[cfg(any(test, feature = "testing"))]
pub use clock::FixedClock;

/// Collection NSID of the per-identity vector record in a user's repository.
pub const VECTOR_COLLECTION: &str = "blue.drawat.vector";

/// Fixed record key: each identity holds exactly one vector record.
pub const VECTOR_RECORD_KEY: &str = "self";
