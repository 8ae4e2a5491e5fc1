use serde::{Deserialize, Serialize};
use crate::common::Size;
use crate::frame_ops::{build_transform, Transform};

/// Preview frame size plus how the sensor is rotated relative to the screen.
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameGeometry {
    pub frame: Size,
    pub sensor_orientation: i32,
}

impl FrameGeometry {
    pub fn new(frame_width: u32, frame_height: u32, sensor_orientation: i32) -> Self {
        Self {
            frame: Size::new(frame_width, frame_height),
            sensor_orientation,
        }
    }

    /// Camera orientation relative to the screen canvas.
    pub fn from_rotation(frame: Size, camera_rotation: i32, screen_orientation: i32) -> Self {
        let sensor_orientation = camera_rotation - screen_orientation;
        log::info!("Camera orientation relative to screen canvas: {}", sensor_orientation);
        Self { frame, sensor_orientation }
    }

    pub fn is_rotated(&self) -> bool {
        self.sensor_orientation.rem_euclid(180) == 90
    }

    pub fn is_configured(&self) -> bool {
        self.frame.width > 0 && self.frame.height > 0
    }

    /// Frame to canvas mapping used for drawing: the rotated frame is scaled
    /// uniformly until it touches the canvas edges, anchored at the origin.
    pub fn frame_to_canvas(&self, canvas: Size) -> Transform {
        assert!(self.is_configured(), "Frame geometry not configured");
        assert!(canvas.width > 0 && canvas.height > 0, "Invalid canvas size {}", canvas);
        let rotated = self.is_rotated();
        let (fw, fh) = (self.frame.width as f32, self.frame.height as f32);

        let multiplier = (canvas.height as f32 / if rotated { fw } else { fh })
            .min(canvas.width as f32 / if rotated { fh } else { fw });

        let dst_width = (multiplier * if rotated { fh } else { fw }) as u32;
        let dst_height = (multiplier * if rotated { fw } else { fh }) as u32;

        build_transform(self.frame.width, self.frame.height,
                        dst_width, dst_height,
                        self.sensor_orientation, false)
    }

    /// Preview frame to the square detector input.
    pub fn frame_to_crop(&self, crop_size: u32, maintain_aspect: bool) -> Transform {
        build_transform(self.frame.width, self.frame.height,
                        crop_size, crop_size,
                        self.sensor_orientation, maintain_aspect)
    }

    /// Detector input back to the preview frame.
    pub fn crop_to_frame(&self, crop_size: u32, maintain_aspect: bool) -> Option<Transform> {
        self.frame_to_crop(crop_size, maintain_aspect).invert()
    }
}
