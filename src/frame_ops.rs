mod detector_input;
mod frame_geometry;
mod preview_size;
mod transform;
pub mod overlay;
pub mod yuv_convert;

pub use detector_input::*;
pub use frame_geometry::*;
pub use overlay::{draw_overlay, DrawItem};
pub use preview_size::*;
pub use transform::*;
