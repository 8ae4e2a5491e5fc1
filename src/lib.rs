mod utils;
pub mod common;
pub mod data;
pub mod frame_ops;
pub mod tracking;
pub mod pipeline;

use std::sync::Arc;
use crate::data::{speech_channels, LabelTranslator, SpeechState, TrackerConfig};
use crate::tracking::{AnnouncementGate, ChannelSpeaker, OccurrenceStore};

pub use crate::pipeline::SightPipeline;

/// Builds a pipeline from `config` whose announcements go out over a channel.
///
/// The returned [`SpeechState`] belongs to whatever drives the speech engine.
pub fn init_pipeline(config: TrackerConfig) -> anyhow::Result<(SightPipeline, SpeechState)> {
    log::info!("Initializing pipeline with config:\n{}", config.to_string());
    let (send_state, speech_state) = speech_channels();
    let pipeline = SightPipeline::from_config(config, Some(Box::new(ChannelSpeaker::new(send_state))))?;
    Ok((pipeline, speech_state))
}

/// Same as [`init_pipeline`], with an explicit store and translation table
/// instead of the filesystem ones.
pub fn init_pipeline_with(config: TrackerConfig,
                          store: Box<dyn OccurrenceStore>,
                          translator: LabelTranslator) -> (SightPipeline, SpeechState) {
    let (send_state, speech_state) = speech_channels();
    let gate = AnnouncementGate::new(store, Arc::new(translator), &config)
        .with_speaker(Box::new(ChannelSpeaker::new(send_state)));
    (SightPipeline::new(config, gate), speech_state)
}
