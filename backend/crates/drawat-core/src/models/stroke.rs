//! Stroke view over the flat point sequence.
//!
//! The wire format has no stroke objects, only the `isNewStroke` marker bit.
//! A stroke starts at every marked point and at the first point of the
//! sequence whether or not it is marked, so no point is ever orphaned.

use crate::StrokePoint;

/// A contiguous run of points drawn without lifting the pen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke<'a> {
    points: &'a [StrokePoint],
}

impl<'a> Stroke<'a> {
    pub fn points(&self) -> &'a [StrokePoint] {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Color of the pen-down point; strokes are drawn in a single color.
    pub fn color(&self) -> Option<&'a str> {
        self.points.first().map(|p| p.color.as_str())
    }

    pub fn author(&self) -> Option<&'a str> {
        self.points.first().map(|p| p.author.as_str())
    }
}

/// Split a flat point sequence into strokes without copying.
pub fn split_strokes(points: &[StrokePoint]) -> Vec<Stroke<'_>> {
    let mut strokes = Vec::new();
    let mut start = 0;

    for (idx, point) in points.iter().enumerate().skip(1) {
        if point.is_new_stroke {
            strokes.push(Stroke {
                points: &points[start..idx],
            });
            start = idx;
        }
    }

    if start < points.len() {
        strokes.push(Stroke {
            points: &points[start..],
        });
    }

    strokes
}

/// Inverse of [`split_strokes`]: concatenate strokes back into wire order.
pub fn flatten_strokes(strokes: &[Stroke<'_>]) -> Vec<StrokePoint> {
    strokes
        .iter()
        .flat_map(|stroke| stroke.points.iter().cloned())
        .collect()
}
