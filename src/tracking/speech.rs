use crate::data::SendState;

/// Text the host's speech engine should say for a label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechRequest {
    pub label: String,
    pub text: String,
}

/// The external speech collaborator. Implementations must return quickly,
/// actual synthesis happens elsewhere.
pub trait Speaker: Send + Sync {
    fn speak(&self, request: SpeechRequest);
}

/// Forwards requests over a channel to a speech worker owned by the host.
#[derive(Debug, Clone)]
pub struct ChannelSpeaker {
    send_state: SendState,
}

impl ChannelSpeaker {
    pub fn new(send_state: SendState) -> Self {
        Self { send_state }
    }
}

impl Speaker for ChannelSpeaker {
    fn speak(&self, request: SpeechRequest) {
        log::debug!("Queueing announcement for '{}': {}", request.label, request.text);
        if let Err(err) = self.send_state.speech_tx.send(request) {
            log::warn!("Speech worker is gone, dropping announcement: {}", err);
        }
    }
}
