mod models;

use crate::StrokePoint;

pub(crate) fn point(x: f64, y: f64, is_new_stroke: bool) -> StrokePoint {
    StrokePoint::new(x, y, "#000000", 2.0, is_new_stroke, "did:plc:alice")
}
