mod config_tracker;
mod filesystem_access;
mod label_translator;
pub mod palette;
pub mod send_channels;

pub use config_tracker::TrackerConfig;
pub use filesystem_access::data_dir;
pub(crate) use filesystem_access::ensure_parent;
pub use label_translator::LabelTranslator;
pub use palette::PALETTE;
pub use send_channels::{speech_channels, SendState, SpeechState};
