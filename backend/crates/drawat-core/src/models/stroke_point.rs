use serde::{Deserialize, Serialize};

/// One sampled point of a drawn path.
///
/// Points are stored as a flat ordered sequence; `is_new_stroke` marks the
/// pen-down point that starts a new stroke. Unknown fields sent by other
/// clients are ignored on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokePoint {
    pub x: f64,
    pub y: f64,
    pub color: String,
    pub size: f64,
    pub is_new_stroke: bool,
    pub author: String,
}

impl StrokePoint {
    pub fn new(
        x: f64,
        y: f64,
        color: impl Into<String>,
        size: f64,
        is_new_stroke: bool,
        author: impl Into<String>,
    ) -> Self {
        Self {
            x,
            y,
            color: color.into(),
            size,
            is_new_stroke,
            author: author.into(),
        }
    }
}
