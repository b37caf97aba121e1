use drawat_core::{Did, StrokePoint, VectorRecord};

use serde::Serialize;

/// Outcome of one pull.
///
/// `others_records` is ordered by ascending update time; ties keep
/// directory order. Only retained records with drawable paths appear in
/// either record field, while `holder_identities` lists every identity the
/// directory returned.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PullResult {
    pub own_record: Option<VectorRecord>,
    pub others_records: Vec<VectorRecord>,
    pub holder_identities: Vec<Did>,
}

impl PullResult {
    /// Others' paths in order, then the local identity's.
    pub fn merged_paths(&self) -> Vec<StrokePoint> {
        self.others_paths()
            .chain(self.own_paths().iter())
            .cloned()
            .collect()
    }

    pub fn others_paths(&self) -> impl Iterator<Item = &StrokePoint> {
        self.others_records
            .iter()
            .flat_map(|record| record.drawable_paths().iter())
    }

    pub fn own_paths(&self) -> &[StrokePoint] {
        self.own_record
            .as_ref()
            .map(VectorRecord::drawable_paths)
            .unwrap_or_default()
    }
}
