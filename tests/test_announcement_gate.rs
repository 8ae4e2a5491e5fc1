extern crate sight_speak;

use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;
use sight_speak::data::{speech_channels, LabelTranslator, TrackerConfig};
use sight_speak::tracking::{AnnounceDecision, AnnouncementGate, ChannelSpeaker, FileOccurrenceStore,
                            MemoryOccurrenceStore, OccurrenceRecords, OccurrenceStore};

fn translator() -> Arc<LabelTranslator> {
    Arc::new(LabelTranslator::parse("person=pessoa\ndog=cachorro\nchair=cadeira"))
}

fn memory_gate() -> AnnouncementGate {
    AnnouncementGate::new(Box::new(MemoryOccurrenceStore::new()), translator(), &TrackerConfig::new())
}

#[cfg(test)]
#[test]
fn second_sighting_speaks() {
    let gate = memory_gate();
    assert_eq!(gate.evaluate("person"), AnnounceDecision::Silent);
    assert_eq!(gate.evaluate("person"), AnnounceDecision::Speak("pessoa".to_string()));
    assert_eq!(gate.evaluate("person"), AnnounceDecision::Silent);
    assert_eq!(gate.evaluate("person"), AnnounceDecision::Silent);
}

#[test]
fn labels_count_independently() {
    let gate = memory_gate();
    assert!(!gate.evaluate("person").is_speak());
    assert!(!gate.evaluate("dog").is_speak());
    assert!(gate.evaluate("dog").is_speak());
    assert!(gate.evaluate("person").is_speak());
}

#[test]
fn reaching_total_resets_everything() {
    let mut records = OccurrenceRecords::new();
    for _ in 0..29 {
        records.increment("chair");
    }
    records.increment("person");
    assert_eq!(records.total(), 30);

    let gate = AnnouncementGate::new(Box::new(MemoryOccurrenceStore::with_records(records)),
                                     translator(), &TrackerConfig::new());

    // person sits at 1, but the total wins
    assert_eq!(gate.evaluate("person"), AnnounceDecision::Silent);
    assert!(gate.records().unwrap().is_empty());

    assert_eq!(gate.evaluate("person"), AnnounceDecision::Silent);
    assert!(gate.evaluate("person").is_speak());
}

#[test]
fn just_below_total_still_counts() {
    let mut records = OccurrenceRecords::new();
    for _ in 0..28 {
        records.increment("chair");
    }
    records.increment("dog");
    let gate = AnnouncementGate::new(Box::new(MemoryOccurrenceStore::with_records(records)),
                                     translator(), &TrackerConfig::new());

    assert!(gate.evaluate("dog").is_speak());
    assert_eq!(gate.records().unwrap().total(), 30);
    assert_eq!(gate.evaluate("dog"), AnnounceDecision::Silent);
    assert!(gate.records().unwrap().is_empty());
}

#[test]
fn custom_reset_total() {
    let config = TrackerConfig::new().with_reset_total(2);
    let gate = AnnouncementGate::new(Box::new(MemoryOccurrenceStore::new()), translator(), &config);
    gate.evaluate("person");
    assert!(gate.evaluate("person").is_speak());
    assert_eq!(gate.evaluate("person"), AnnounceDecision::Silent);
    assert!(gate.records().unwrap().is_empty());
}

#[test]
fn untranslated_label_speaks_empty() {
    let gate = memory_gate();
    gate.evaluate("kite");
    assert_eq!(gate.evaluate("kite"), AnnounceDecision::Speak(String::new()));
}

#[test]
fn speaker_gets_suffixed_text() {
    let (send_state, speech_state) = speech_channels();
    let gate = memory_gate().with_speaker(Box::new(ChannelSpeaker::new(send_state)));

    gate.observe("dog");
    assert!(speech_state.speech_rx.try_recv().is_err());

    assert!(gate.observe("dog").is_speak());
    let request = speech_state.speech_rx.recv_timeout(Duration::from_secs(1)).unwrap();
    assert_eq!(request.label, "dog");
    assert_eq!(request.text, "cachorro a frente");

    gate.observe("dog");
    assert!(speech_state.speech_rx.try_recv().is_err());
}

#[test]
fn empty_translation_is_not_spoken() {
    let (send_state, speech_state) = speech_channels();
    let gate = memory_gate().with_speaker(Box::new(ChannelSpeaker::new(send_state)));

    gate.observe("kite");
    assert!(gate.observe("kite").is_speak());
    assert!(speech_state.speech_rx.try_recv().is_err());
}

#[test]
fn dropped_speech_worker_does_not_panic() {
    let (send_state, speech_state) = speech_channels();
    drop(speech_state);
    let gate = memory_gate().with_speaker(Box::new(ChannelSpeaker::new(send_state)));

    gate.observe("person");
    assert!(gate.observe("person").is_speak());
}

#[test]
fn file_store_persists_between_gates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state").join("occurrences.txt");

    let gate = AnnouncementGate::new(Box::new(FileOccurrenceStore::new(&path)), translator(), &TrackerConfig::new());
    assert_eq!(gate.evaluate("person"), AnnounceDecision::Silent);
    drop(gate);

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "person-1");

    let gate = AnnouncementGate::new(Box::new(FileOccurrenceStore::new(&path)), translator(), &TrackerConfig::new());
    assert!(gate.evaluate("person").is_speak());
    assert_eq!(FileOccurrenceStore::new(&path).load().unwrap().count("person"), 2);
}

#[test]
fn file_store_handles_dashed_labels() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("occurrences.txt");
    std::fs::write(&path, "t-shirt-1\nperson-4\n").unwrap();

    let gate = AnnouncementGate::new(Box::new(FileOccurrenceStore::new(&path)), translator(), &TrackerConfig::new());
    assert!(gate.evaluate("t-shirt").is_speak());

    let records = FileOccurrenceStore::new(&path).load().unwrap();
    assert_eq!(records.count("t-shirt"), 2);
    assert_eq!(records.count("person"), 4);
}

#[test]
fn malformed_store_is_tolerated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("occurrences.txt");
    std::fs::write(&path, "garbage\nperson-one\n\ndog-1\n").unwrap();

    let gate = AnnouncementGate::new(Box::new(FileOccurrenceStore::new(&path)), translator(), &TrackerConfig::new());
    assert!(gate.evaluate("dog").is_speak());
    assert_eq!(gate.evaluate("person"), AnnounceDecision::Silent);
}

#[test]
fn unreadable_store_counts_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    // a directory where the file should be: every read and write fails
    let path = dir.path().join("occurrences.txt");
    std::fs::create_dir(&path).unwrap();

    let gate = AnnouncementGate::new(Box::new(FileOccurrenceStore::new(&path)), translator(), &TrackerConfig::new());
    assert_eq!(gate.evaluate("person"), AnnounceDecision::Silent);
    assert_eq!(gate.evaluate("person"), AnnounceDecision::Silent);
    assert!(gate.reset().is_err());
}

#[test]
fn reset_clears_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("occurrences.txt");

    let gate = AnnouncementGate::new(Box::new(FileOccurrenceStore::new(&path)), translator(), &TrackerConfig::new());
    gate.evaluate("person");
    gate.evaluate("dog");
    gate.reset().unwrap();

    assert!(gate.records().unwrap().is_empty());
    assert_eq!(gate.evaluate("person"), AnnounceDecision::Silent);
}

#[test]
fn concurrent_sightings_count_once_each() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("occurrences.txt");
    let gate = Arc::new(AnnouncementGate::new(Box::new(FileOccurrenceStore::new(&path)),
                                              translator(), &TrackerConfig::new()));

    let threads = 12;
    let barrier = Arc::new(Barrier::new(threads));
    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let gate = gate.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                gate.evaluate("person")
            })
        })
        .collect();

    let decisions: Vec<AnnounceDecision> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(decisions.iter().filter(|d| d.is_speak()).count(), 1);
    assert_eq!(gate.records().unwrap().count("person"), threads as u32);
    assert_eq!(FileOccurrenceStore::new(&path).load().unwrap().count("person"), threads as u32);
}

#[test]
fn temp_file_sits_beside_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("counts.tmp");

    let mut store = FileOccurrenceStore::new(&path);
    let mut records = OccurrenceRecords::new();
    records.increment("dog");
    store.save(&records).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "dog-1");
    assert!(!dir.path().join("counts.tmp.tmp").exists());
    assert_eq!(store.load().unwrap().count("dog"), 1);
}

#[test]
fn failed_save_removes_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("occurrences.txt");
    std::fs::create_dir(&path).unwrap();

    let mut store = FileOccurrenceStore::new(&path);
    assert!(store.save(&OccurrenceRecords::new()).is_err());
    assert!(!dir.path().join("occurrences.txt.tmp").exists());
}
