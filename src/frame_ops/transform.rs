//! 2x3 affine transforms between rectangular coordinate frames.
//!
//! | a11 a12 b1 |
//! | a21 a22 b2 |

use serde::{Deserialize, Serialize};
use crate::common::BBox;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub a11: f32,
    pub a12: f32,
    pub b1: f32,
    pub a21: f32,
    pub a22: f32,
    pub b2: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            a11: 1.0,
            a12: 0.0,
            b1: 0.0,
            a21: 0.0,
            a22: 1.0,
            b2: 0.0,
        }
    }

    pub fn to_array(&self) -> [[f32; 3]; 2] {
        [[self.a11, self.a12, self.b1], [self.a21, self.a22, self.b2]]
    }

    pub fn translation(dx: f32, dy: f32) -> Self {
        Self {
            b1: dx,
            b2: dy,
            ..Self::identity()
        }
    }

    pub fn scale(sx: f32, sy: f32) -> Self {
        Self {
            a11: sx,
            a22: sy,
            ..Self::identity()
        }
    }

    /// Rotation around the origin, in degrees (positive turns x towards y).
    ///
    /// Right angles snap their sine/cosine to exact values so that mapping
    /// pixel corners does not pick up float noise.
    pub fn rotation(angle_degrees: f32) -> Self {
        let (sin_a, cos_a) = snapped_sin_cos(angle_degrees);
        Self {
            a11: cos_a,
            a12: -sin_a,
            b1: 0.0,
            a21: sin_a,
            a22: cos_a,
            b2: 0.0,
        }
    }

    /// Matrix product `self * other`: `other` is applied first.
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            a11: self.a11 * other.a11 + self.a12 * other.a21,
            a12: self.a11 * other.a12 + self.a12 * other.a22,
            b1: self.a11 * other.b1 + self.a12 * other.b2 + self.b1,
            a21: self.a21 * other.a11 + self.a22 * other.a21,
            a22: self.a21 * other.a12 + self.a22 * other.a22,
            b2: self.a21 * other.b1 + self.a22 * other.b2 + self.b2,
        }
    }

    /// Applies `self`, then `next`.
    pub fn then(&self, next: &Self) -> Self {
        next.compose(self)
    }

    pub fn map_point(&self, x: f32, y: f32) -> (f32, f32) {
        let new_x = self.a11 * x + self.a12 * y + self.b1;
        let new_y = self.a21 * x + self.a22 * y + self.b2;
        (new_x, new_y)
    }

    /// Maps all four corners and returns their normalized bounding box.
    pub fn map_rect(&self, rect: &BBox) -> BBox {
        let corners = rect.corners().map(|(x, y)| self.map_point(x, y));
        BBox::bounding(&corners)
    }

    pub fn determinant(&self) -> f32 {
        self.a11 * self.a22 - self.a12 * self.a21
    }

    /// Inverse transform, `None` when the matrix is singular.
    pub fn invert(&self) -> Option<Self> {
        let det = self.determinant();
        if det.abs() < 1e-10 {
            return None;
        }

        let inv_det = 1.0 / det;
        Some(Self {
            a11: self.a22 * inv_det,
            a12: -self.a12 * inv_det,
            b1: (self.a12 * self.b2 - self.a22 * self.b1) * inv_det,
            a21: -self.a21 * inv_det,
            a22: self.a11 * inv_det,
            b2: (self.a21 * self.b1 - self.a11 * self.b2) * inv_det,
        })
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }
}

fn snapped_sin_cos(angle_degrees: f32) -> (f32, f32) {
    if angle_degrees.fract() == 0.0 && (angle_degrees as i64) % 90 == 0 {
        return match (angle_degrees as i64).rem_euclid(360) {
            0 => (0.0, 1.0),
            90 => (1.0, 0.0),
            180 => (0.0, -1.0),
            _ => (-1.0, 0.0),
        };
    }
    let rad = angle_degrees.to_radians();
    (rad.sin(), rad.cos())
}

/// Builds the transform taking a `src_width x src_height` frame onto a
/// `dst_width x dst_height` one.
///
/// # Arguments
/// - `rotation`: degrees to rotate by, expected to be a multiple of 90 (negative allowed).
/// - `maintain_aspect`: scale both axes by the larger factor so the destination
///   is fully covered; content may overflow it. Otherwise each axis is stretched independently.
///
/// Panics on non-positive sizes.
pub fn build_transform(src_width: u32, src_height: u32,
                       dst_width: u32, dst_height: u32,
                       rotation: i32, maintain_aspect: bool) -> Transform {
    assert!(src_width > 0 && src_height > 0, "Invalid source size {}x{}", src_width, src_height);
    assert!(dst_width > 0 && dst_height > 0, "Invalid destination size {}x{}", dst_width, dst_height);

    let mut matrix = Transform::identity();

    if rotation != 0 {
        if rotation % 90 != 0 {
            log::warn!("Rotation of {} % 90 != 0", rotation);
        }

        // Center of the source on the origin, then rotate around it.
        matrix = matrix
            .then(&Transform::translation(-(src_width as f32) / 2.0, -(src_height as f32) / 2.0))
            .then(&Transform::rotation(rotation as f32));
    }

    let transpose = (rotation.unsigned_abs() + 90) % 180 == 0;
    let in_width = if transpose { src_height } else { src_width };
    let in_height = if transpose { src_width } else { src_height };

    if in_width != dst_width || in_height != dst_height {
        let scale_x = dst_width as f32 / in_width as f32;
        let scale_y = dst_height as f32 / in_height as f32;

        matrix = if maintain_aspect {
            let factor = scale_x.max(scale_y);
            matrix.then(&Transform::scale(factor, factor))
        } else {
            matrix.then(&Transform::scale(scale_x, scale_y))
        };
    }

    if rotation != 0 {
        matrix = matrix.then(&Transform::translation(dst_width as f32 / 2.0, dst_height as f32 / 2.0));
    }

    matrix
}
