use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in floating point coordinates.
///
/// Corners are always kept normalized (`x1 <= x2`, `y1 <= y2`), whichever
/// order they were handed in.
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub w: f32,
    pub h: f32,
}

impl BBox {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::default().with_x1y1_x2y2(x1, y1, x2, y2)
    }

    /// Returns the width of the bounding box.
    pub fn width(&self) -> f32 {
        self.w
    }

    /// Returns the height of the bounding box.
    pub fn height(&self) -> f32 {
        self.h
    }

    /// Returns the four corners, clockwise from the top-left one.
    pub fn corners(&self) -> [(f32, f32); 4] {
        [
            (self.x1, self.y1),
            (self.x2, self.y1),
            (self.x2, self.y2),
            (self.x1, self.y2),
        ]
    }

    pub fn as_xy_wh_i32(&self) -> (i32, i32, i32, i32) {
        (self.x1.round() as i32,
         self.y1.round() as i32,
         self.w.round() as i32,
         self.h.round() as i32)
    }

    /// Sets the bounding box's coordinates using `(x1, y1, x2, y2)` and calculates width and height.
    ///
    /// Swapped corners are put back in order, so the result is always normalized.
    pub fn with_x1y1_x2y2(mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        self.x1 = x1.min(x2);
        self.y1 = y1.min(y2);
        self.x2 = x1.max(x2);
        self.y2 = y1.max(y2);

        self.w = self.x2 - self.x1;
        self.h = self.y2 - self.y1;
        self
    }

    /// Sets the bounding box's coordinates and dimensions using `(x, y, w, h)`.
    ///
    /// # Arguments
    ///
    /// * `x` - The x-coordinate of the top-left corner.
    /// * `y` - The y-coordinate of the top-left corner.
    /// * `w` - The width of the bounding box.
    /// * `h` - The height of the bounding box.
    ///
    /// # Returns
    ///
    /// A `BBox` instance with updated coordinates and dimensions.
    pub fn with_x1y1_wh(self, x: f32, y: f32, w: f32, h: f32) -> Self {
        self.with_x1y1_x2y2(x, y, x + w, y + h)
    }

    /// Smallest box covering every given point.
    pub fn bounding(points: &[(f32, f32)]) -> Self {
        let mut x1 = f32::MAX;
        let mut y1 = f32::MAX;
        let mut x2 = f32::MIN;
        let mut y2 = f32::MIN;
        for &(x, y) in points {
            x1 = x1.min(x);
            y1 = y1.min(y);
            x2 = x2.max(x);
            y2 = y2.max(y);
        }
        if points.is_empty() {
            return Self::default();
        }
        Self::new(x1, y1, x2, y2)
    }
}
