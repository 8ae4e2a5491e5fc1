mod detection;
mod frame_size;
mod pixel_frame;
mod rect_box;
mod tracked_object;

pub use detection::*;
pub use frame_size::*;
pub use pixel_frame::*;
pub use rect_box::*;
pub use tracked_object::*;
