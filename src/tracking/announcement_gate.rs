use std::sync::Arc;
use parking_lot::Mutex;
use crate::data::{LabelTranslator, TrackerConfig};
use crate::tracking::{OccurrenceRecords, OccurrenceStore, Speaker, SpeechRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnounceDecision {
    /// Say the translated label.
    Speak(String),
    Silent,
}

impl AnnounceDecision {
    pub fn is_speak(&self) -> bool {
        matches!(self, AnnounceDecision::Speak(_))
    }
}

/// Decides, from the persisted occurrence counts, whether a label is worth
/// announcing.
///
/// A label speaks on its second observation only: the first one may be a
/// spurious detection and anything after the second would be chatter. Once
/// the counts across all labels reach the reset total, the next evaluation
/// wipes the store instead and the cycle starts over.
pub struct AnnouncementGate {
    store: Mutex<Box<dyn OccurrenceStore>>,
    translator: Arc<LabelTranslator>,
    speaker: Option<Box<dyn Speaker>>,
    reset_total: u32,
    distinct_label_ceiling: usize,
    announce_suffix: String,
}

impl AnnouncementGate {
    pub fn new(store: Box<dyn OccurrenceStore>, translator: Arc<LabelTranslator>, config: &TrackerConfig) -> Self {
        Self {
            store: Mutex::new(store),
            translator,
            speaker: None,
            reset_total: config.reset_total,
            distinct_label_ceiling: config.distinct_label_ceiling,
            announce_suffix: config.announce_suffix.clone(),
        }
    }

    pub fn with_speaker(mut self, speaker: Box<dyn Speaker>) -> Self {
        self.speaker = Some(speaker);
        self
    }

    /// Runs one read-decide-write cycle for `label`.
    ///
    /// Store failures never surface here: unreadable content counts as empty
    /// and failed writes are logged.
    pub fn evaluate(&self, label: &str) -> AnnounceDecision {
        let mut store = self.store.lock();

        let mut records = store.load().unwrap_or_else(|err| {
            log::warn!("Occurrence store unreadable, starting over: {:#}", err);
            OccurrenceRecords::default()
        });

        let total = records.total();
        let distinct = records.distinct_labels();
        log::debug!("Occurrence store: {} labels, total {}", distinct, total);

        if total >= self.reset_total {
            if distinct >= self.distinct_label_ceiling {
                log::debug!("{} distinct labels recorded (ceiling {})", distinct, self.distinct_label_ceiling);
            }
            log::debug!("Total {} reached {}, clearing occurrence store", total, self.reset_total);
            if let Err(err) = store.clear() {
                log::warn!("Failed to clear occurrence store: {:#}", err);
            }
            return AnnounceDecision::Silent;
        }

        let previous = records.increment(label);
        if let Err(err) = store.save(&records) {
            log::warn!("Failed to persist occurrence store: {:#}", err);
        }

        if previous == 1 {
            let text = self.translator.translate(label);
            log::debug!("'{}' seen twice, announcing '{}'", label, text);
            AnnounceDecision::Speak(text)
        } else {
            log::debug!("'{}' seen {} time(s), staying silent", label, previous + 1);
            AnnounceDecision::Silent
        }
    }

    /// [`AnnouncementGate::evaluate`], then [`AnnouncementGate::announce`].
    pub fn observe(&self, label: &str) -> AnnounceDecision {
        let decision = self.evaluate(label);
        self.announce(label, &decision);
        decision
    }

    /// Hands a `Speak` decision to the speaker, suffix appended. Empty
    /// translations are not spoken.
    pub fn announce(&self, label: &str, decision: &AnnounceDecision) {
        let (AnnounceDecision::Speak(text), Some(speaker)) = (decision, &self.speaker) else {
            return;
        };
        if text.is_empty() {
            log::debug!("No translation for '{}', nothing to say", label);
            return;
        }
        speaker.speak(SpeechRequest {
            label: label.to_string(),
            text: format!("{}{}", text, self.announce_suffix),
        });
    }

    /// Drops all records, e.g. when the host shuts down.
    pub fn reset(&self) -> anyhow::Result<()> {
        self.store.lock().clear()
    }

    /// Snapshot of the persisted records.
    pub fn records(&self) -> anyhow::Result<OccurrenceRecords> {
        self.store.lock().load()
    }
}
