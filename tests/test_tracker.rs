extern crate sight_speak;

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use sight_speak::common::{Detection, Size};
use sight_speak::data::{LabelTranslator, TrackerConfig, PALETTE};
use sight_speak::frame_ops::{draw_overlay, Transform};
use sight_speak::tracking::{AnnounceDecision, AnnouncementGate, MemoryOccurrenceStore, MultiBoxTracker,
                            OccurrenceRecords, OccurrenceStore};

mod frames;

/// Store whose writes take a while, signalling when one starts.
struct SlowStore {
    records: OccurrenceRecords,
    save_started: crossbeam_channel::Sender<()>,
    delay: Duration,
}

impl OccurrenceStore for SlowStore {
    fn load(&self) -> anyhow::Result<OccurrenceRecords> {
        Ok(self.records.clone())
    }

    fn save(&mut self, records: &OccurrenceRecords) -> anyhow::Result<()> {
        let _ = self.save_started.send(());
        thread::sleep(self.delay);
        self.records = records.clone();
        Ok(())
    }
}

fn tracker_with_gate() -> (MultiBoxTracker, Arc<AnnouncementGate>) {
    let config = TrackerConfig::new();
    let translator = LabelTranslator::new().with_entry("person", "pessoa").with_entry("dog", "cachorro");
    let gate = Arc::new(AnnouncementGate::new(Box::new(MemoryOccurrenceStore::new()), Arc::new(translator), &config));
    (MultiBoxTracker::new(&config).with_gate(gate.clone()), gate)
}

#[cfg(test)]
#[test]
fn caps_at_palette_size() {
    let tracker = MultiBoxTracker::new(&TrackerConfig::new());
    let detections: Vec<Detection> = (0..20)
        .map(|i| frames::boxed("cup", 0.9, i as f32 * 20.0, 0.0, 18.0, 18.0))
        .collect();

    let tracked = tracker.update(&detections, &Transform::identity());
    assert_eq!(tracked.len(), PALETTE.len());
    for (i, object) in tracked.iter().enumerate() {
        assert_eq!(object.color_index, i);
        assert_eq!(object.color(), PALETTE[i]);
    }
}

#[test]
fn small_boxes_are_dropped_but_still_reported() {
    let tracker = MultiBoxTracker::new(&TrackerConfig::new());
    let detections = vec![
        frames::boxed("cup", 0.9, 0.0, 0.0, 15.9, 100.0),
        frames::boxed("dog", 0.8, 0.0, 0.0, 100.0, 10.0),
        frames::boxed("person", 0.7, 10.0, 10.0, 16.0, 16.0),
    ];

    let tracked = tracker.update(&detections, &Transform::scale(2.0, 2.0));
    assert_eq!(tracked.len(), 1);
    assert_eq!(tracked[0].label, "person");
    assert_eq!(tracked[0].color_index, 0);

    let screen = tracker.screen_rects();
    assert_eq!(screen.len(), 3);
    assert_eq!(screen[2].0, 0.7);
    assert_eq!(screen[2].1.width(), 32.0);
}

#[test]
fn detections_without_geometry_are_skipped() {
    let tracker = MultiBoxTracker::new(&TrackerConfig::new());
    let detections = vec![
        Detection::new(None, "person", 0.99),
        frames::boxed("dog", 0.6, 0.0, 0.0, 50.0, 50.0),
    ];

    let tracked = tracker.update(&detections, &Transform::identity());
    assert_eq!(tracked.len(), 1);
    assert_eq!(tracked[0].label, "dog");
    assert_eq!(tracker.screen_rects().len(), 1);
}

#[test]
fn each_update_replaces_the_set() {
    let tracker = MultiBoxTracker::new(&TrackerConfig::new());
    tracker.update(&[frames::boxed("dog", 0.6, 0.0, 0.0, 50.0, 50.0)], &Transform::identity());
    assert_eq!(tracker.tracked_objects().len(), 1);

    let tracked = tracker.update(&[], &Transform::identity());
    assert!(tracked.is_empty());
    assert!(tracker.tracked_objects().is_empty());
}

#[test]
fn only_first_label_reaches_the_gate() {
    let (tracker, gate) = tracker_with_gate();
    let detections = vec![
        frames::boxed("person", 0.9, 0.0, 0.0, 50.0, 50.0),
        frames::boxed("dog", 0.9, 60.0, 0.0, 50.0, 50.0),
    ];

    tracker.update(&detections, &Transform::identity());
    assert_eq!(tracker.last_decision(), Some(AnnounceDecision::Silent));
    tracker.update(&detections, &Transform::identity());
    assert_eq!(tracker.last_decision(), Some(AnnounceDecision::Speak("pessoa".to_string())));

    let records = gate.records().unwrap();
    assert_eq!(records.count("person"), 2);
    assert_eq!(records.count("dog"), 0);
}

#[test]
fn nothing_tracked_leaves_the_gate_alone() {
    let (tracker, gate) = tracker_with_gate();
    tracker.update(&[frames::boxed("person", 0.9, 0.0, 0.0, 5.0, 5.0)], &Transform::identity());

    assert_eq!(tracker.last_decision(), None);
    assert!(gate.records().unwrap().is_empty());
}

#[test]
fn draw_list_needs_frame_configuration() {
    let tracker = MultiBoxTracker::new(&TrackerConfig::new());
    tracker.update(&[frames::boxed("dog", 0.6, 0.0, 0.0, 50.0, 50.0)], &Transform::identity());
    assert!(tracker.draw_list(Size::new(640, 480)).is_empty());
}

#[test]
fn draw_list_places_boxes_on_canvas() {
    let tracker = MultiBoxTracker::new(&TrackerConfig::new());
    tracker.set_frame_configuration(640, 480, 0);
    tracker.update(&[frames::boxed("dog", 0.875, 100.0, 100.0, 80.0, 40.0)], &Transform::identity());

    let items = tracker.draw_list(Size::new(1280, 960));
    assert_eq!(items.len(), 1);
    let item = &items[0];
    assert_eq!(item.rect.x1, 200.0);
    assert_eq!(item.rect.width(), 160.0);
    assert_eq!(item.rect.height(), 80.0);
    assert_eq!(item.corner_size, 10.0);
    assert_eq!(item.color, PALETTE[0].0);
    assert_eq!(item.caption, "dog 87.50%");
}

#[test]
fn track_results_uses_last_canvas() {
    let tracker = MultiBoxTracker::new(&TrackerConfig::new());
    tracker.set_frame_configuration(640, 480, 0);
    let detections = [frames::boxed("dog", 0.9, 10.0, 10.0, 20.0, 20.0)];

    tracker.track_results(&detections, 1);
    assert_eq!(tracker.screen_rects()[0].1.x1, 10.0);

    tracker.draw_list(Size::new(1280, 960));
    tracker.track_results(&detections, 2);
    assert_eq!(tracker.screen_rects()[0].1.x1, 20.0);
}

#[test]
fn overlay_draws_box_outline() {
    let tracker = MultiBoxTracker::new(&TrackerConfig::new());
    tracker.set_frame_configuration(64, 64, 0);
    tracker.update(&[frames::boxed("dog", 0.9, 8.0, 8.0, 32.0, 32.0)], &Transform::identity());

    let mut canvas = image::RgbaImage::new(64, 64);
    draw_overlay(&mut canvas, &tracker.draw_list(Size::new(64, 64)));

    assert_eq!(*canvas.get_pixel(8, 8), PALETTE[0]);
    assert_eq!(*canvas.get_pixel(10, 20), PALETTE[0]);
    assert_eq!(*canvas.get_pixel(24, 24), image::Rgba([0, 0, 0, 0]));
}

#[test]
fn drawing_does_not_wait_for_store_writes() {
    let (save_started, save_started_rx) = crossbeam_channel::unbounded();
    let config = TrackerConfig::new();
    let store = SlowStore {
        records: OccurrenceRecords::new(),
        save_started,
        delay: Duration::from_millis(500),
    };
    let gate = Arc::new(AnnouncementGate::new(Box::new(store), Arc::new(LabelTranslator::new()), &config));
    let tracker = Arc::new(MultiBoxTracker::new(&config).with_gate(gate));
    tracker.set_frame_configuration(640, 480, 0);

    let worker = {
        let tracker = tracker.clone();
        thread::spawn(move || {
            tracker.update(&[frames::boxed("dog", 0.9, 0.0, 0.0, 50.0, 50.0)], &Transform::identity())
        })
    };

    save_started_rx.recv_timeout(Duration::from_secs(5)).unwrap();
    let start = Instant::now();
    let items = tracker.draw_list(Size::new(640, 480));
    let screen = tracker.screen_rects();
    assert!(start.elapsed() < Duration::from_millis(250), "draw_list took {:?}", start.elapsed());
    assert_eq!(items.len(), 1);
    assert_eq!(screen.len(), 1);
    assert_eq!(tracker.last_decision(), None);

    assert_eq!(worker.join().unwrap().len(), 1);
    assert_eq!(tracker.last_decision(), Some(AnnounceDecision::Silent));
}
