mod announcement_gate;
mod multi_box_tracker;
mod occurrence_store;
mod speech;

pub use announcement_gate::*;
pub use multi_box_tracker::*;
pub use occurrence_store::*;
pub use speech::*;
