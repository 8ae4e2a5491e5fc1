use serde::{Deserialize, Serialize};
use crate::common::BBox;

/// One object reported by the external detector for a processed frame.
///
/// `bbox` is `None` when the detector produced a result without geometry
/// (classification only). Such results never reach the tracker.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub bbox: Option<BBox>,
    pub label: String,
    pub confidence: f32,
}

impl Detection {
    pub fn new(bbox: Option<BBox>, label: &str, confidence: f32) -> Self {
        Self {
            bbox,
            label: label.to_string(),
            confidence,
        }
    }

    /// Sets the bounding box's coordinates using `(x1, y1, x2, y2)`.
    ///
    /// # Arguments
    ///
    /// * `x1` - The x-coordinate of the top-left corner.
    /// * `y1` - The y-coordinate of the top-left corner.
    /// * `x2` - The x-coordinate of the bottom-right corner.
    /// * `y2` - The y-coordinate of the bottom-right corner.
    ///
    /// # Returns
    ///
    /// A `Detection` instance with updated coordinates.
    pub fn with_x1y1_x2y2(mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        self.bbox = Some(BBox::new(x1, y1, x2, y2));
        self
    }

    /// Sets the bounding box's coordinates and dimensions using `(x, y, w, h)`.
    pub fn with_x1y1_wh(mut self, x: f32, y: f32, w: f32, h: f32) -> Self {
        self.bbox = Some(BBox::default().with_x1y1_wh(x, y, w, h));
        self
    }
}
