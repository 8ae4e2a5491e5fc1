use crate::tracking::SpeechRequest;

/// Receiving half, owned by the host's speech worker.
#[derive(Debug)]
pub struct SpeechState {
    pub speech_rx: crossbeam_channel::Receiver<SpeechRequest>,
}

/// Sending half, handed to a [`crate::tracking::ChannelSpeaker`].
#[derive(Debug, Clone)]
pub struct SendState {
    pub speech_tx: crossbeam_channel::Sender<SpeechRequest>,
}

pub fn speech_channels() -> (SendState, SpeechState) {
    let (speech_tx, speech_rx) = crossbeam_channel::unbounded();
    (SendState { speech_tx }, SpeechState { speech_rx })
}
