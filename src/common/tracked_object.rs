use image::Rgba;
use serde::{Deserialize, Serialize};
use crate::common::BBox;
use crate::data::palette;
use crate::frame_ops::Transform;

/// A detection accepted by the tracker for the current update.
///
/// `bbox` stays in frame coordinates; display placement is derived at draw
/// time through [`TrackedObject::display_rect`].
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedObject {
    pub bbox: BBox,
    pub label: String,
    pub confidence: f32,
    pub color_index: usize,
}

impl TrackedObject {
    pub fn new(bbox: BBox, label: &str, confidence: f32, color_index: usize) -> Self {
        Self {
            bbox,
            label: label.to_string(),
            confidence,
            color_index,
        }
    }

    pub fn color(&self) -> Rgba<u8> {
        palette::color_at(self.color_index)
    }

    pub fn display_rect(&self, frame_to_display: &Transform) -> BBox {
        frame_to_display.map_rect(&self.bbox)
    }

    /// Caption drawn next to the box, e.g. `"person 87.50%"`.
    pub fn caption(&self) -> String {
        let percent = 100. * self.confidence;
        if self.label.is_empty() {
            format!("{:.2}%", percent)
        } else {
            format!("{} {:.2}%", self.label, percent)
        }
    }
}
