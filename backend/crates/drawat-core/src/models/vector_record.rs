use crate::{Did, StrokePoint, is_retained};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The single authoritative per-identity document holding drawn paths.
///
/// `paths` is `None` for an identity that registered but never drew.
/// Writes replace the whole record; there is no append.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorRecord {
    pub did: Did,
    pub paths: Option<Vec<StrokePoint>>,
    pub updated_at: DateTime<Utc>,
}

impl VectorRecord {
    pub fn new(did: Did, paths: Vec<StrokePoint>, updated_at: DateTime<Utc>) -> Self {
        Self {
            did,
            paths: Some(paths),
            updated_at,
        }
    }

    /// Record registered at login so the identity is discoverable before drawing.
    pub fn placeholder(did: Did, updated_at: DateTime<Utc>) -> Self {
        Self {
            did,
            paths: None,
            updated_at,
        }
    }

    /// Points this record contributes to the canvas; empty when absent.
    pub fn drawable_paths(&self) -> &[StrokePoint] {
        self.paths.as_deref().unwrap_or_default()
    }

    pub fn has_drawable_paths(&self) -> bool {
        !self.drawable_paths().is_empty()
    }

    pub fn is_retained(&self, now: DateTime<Utc>) -> bool {
        is_retained(self.updated_at, now)
    }
}
