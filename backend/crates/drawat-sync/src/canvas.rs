use crate::PullResult;

use drawat_core::{Did, Stroke, StrokePoint, split_strokes};
use drawat_session::IdentitySnapshot;

use log::debug;

/// What happened to a pull handed to [`Canvas::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasUpdate {
    Applied { others: usize, own: usize },
    /// The identity changed while the pull was in flight
    Discarded,
}

/// Merged drawing state: everybody else's retained paths, then our own.
///
/// Rebuilt from each completed pull. Local strokes not yet pushed survive
/// a pull, including strokes drawn before the first one; they are dropped
/// when the signed-in identity changes.
#[derive(Debug, Default)]
pub struct Canvas {
    others: Vec<StrokePoint>,
    own: Vec<StrokePoint>,
    owner: Option<Did>,
    epoch: Option<u64>,
    dirty: bool,
    holders: usize,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a pull that started at `observed`, unless `current` differs.
    pub fn apply(
        &mut self,
        observed: &IdentitySnapshot,
        current: &IdentitySnapshot,
        result: PullResult,
    ) -> CanvasUpdate {
        if observed != current {
            debug!(
                "Discarding pull started under epoch {} (now {})",
                observed.epoch, current.epoch
            );
            return CanvasUpdate::Discarded;
        }

        match self.epoch {
            Some(epoch) if epoch != current.epoch => {
                self.own.clear();
                self.dirty = false;
                self.epoch = Some(current.epoch);
                self.owner = current.did.clone();
            }
            Some(_) => {}
            None => {
                // First pull: points drawn so far go after the stored record.
                self.epoch = Some(current.epoch);
                self.owner = current.did.clone();
                if self.dirty {
                    let drawn = std::mem::take(&mut self.own);
                    self.own = result.own_paths().to_vec();
                    self.own.extend(drawn);
                }
            }
        }

        self.others = result.others_paths().cloned().collect();
        if !self.dirty {
            self.own = result.own_paths().to_vec();
        }
        self.holders = result.holder_identities.len();

        CanvasUpdate::Applied {
            others: self.others.len(),
            own: self.own.len(),
        }
    }

    /// Append a locally drawn point; the canvas needs a push afterwards.
    pub fn draw(&mut self, point: StrokePoint) {
        self.own.push(point);
        self.dirty = true;
    }

    pub fn extend(&mut self, points: impl IntoIterator<Item = StrokePoint>) {
        self.own.extend(points);
        self.dirty = true;
    }

    /// Replace local paths wholesale, e.g. from a file.
    pub fn replace_own(&mut self, points: Vec<StrokePoint>) {
        self.own = points;
        self.dirty = true;
    }

    pub fn mark_pushed(&mut self) {
        self.dirty = false;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn owner(&self) -> Option<&Did> {
        self.owner.as_ref()
    }

    pub fn holder_count(&self) -> usize {
        self.holders
    }

    pub fn own_paths(&self) -> &[StrokePoint] {
        &self.own
    }

    pub fn others_paths(&self) -> &[StrokePoint] {
        &self.others
    }

    pub fn merged_paths(&self) -> Vec<StrokePoint> {
        self.others.iter().chain(self.own.iter()).cloned().collect()
    }

    /// Strokes in paint order, without copying points.
    pub fn strokes(&self) -> Vec<Stroke<'_>> {
        let mut strokes = split_strokes(&self.others);
        strokes.extend(split_strokes(&self.own));
        strokes
    }
}
