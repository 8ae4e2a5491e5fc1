//! Per-frame tracker: filters detections, hands out box colors and triggers
//! the announcement gate.
//!
//! Nothing carries over between updates except the palette order, every call
//! rebuilds the tracked set from that frame's detections alone.

use std::sync::Arc;
use parking_lot::Mutex;
use crate::common::{BBox, Detection, Size, TrackedObject};
use crate::data::{TrackerConfig, PALETTE};
use crate::frame_ops::{DrawItem, FrameGeometry, Transform};
use crate::tracking::{AnnounceDecision, AnnouncementGate};

#[derive(Default, Debug)]
struct TrackerState {
    geometry: FrameGeometry,
    frame_to_canvas: Option<Transform>,
    screen_rects: Vec<(f32, BBox)>,
    tracked_objects: Vec<TrackedObject>,
    last_decision: Option<AnnounceDecision>,
}

pub struct MultiBoxTracker {
    min_box_size: f32,
    gate: Option<Arc<AnnouncementGate>>,
    state: Mutex<TrackerState>,
}

impl MultiBoxTracker {
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            min_box_size: config.min_box_size,
            gate: None,
            state: Mutex::new(TrackerState::default()),
        }
    }

    pub fn with_gate(mut self, gate: Arc<AnnouncementGate>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn set_frame_configuration(&self, width: u32, height: u32, sensor_orientation: i32) {
        let mut state = self.state.lock();
        state.geometry = FrameGeometry::new(width, height, sensor_orientation);
        state.frame_to_canvas = None;
    }

    /// Tracks one frame's detections.
    ///
    /// `frame_to_display` only feeds the debug rectangles; the returned
    /// objects keep their frame coordinates. At most [`PALETTE`]`.len()`
    /// objects are accepted, the rest of the frame is dropped. The first
    /// accepted label goes through the announcement gate.
    pub fn update(&self, detections: &[Detection], frame_to_display: &Transform) -> Vec<TrackedObject> {
        let (tracked, first_label) = {
            let mut state = self.state.lock();
            let mut rects_to_track: Vec<(&Detection, BBox)> = Vec::new();

            state.screen_rects.clear();
            for result in detections {
                let Some(frame_rect) = result.bbox else {
                    continue;
                };

                let screen_rect = frame_to_display.map_rect(&frame_rect);
                log::trace!("Result! Frame: {:?} mapped to screen: {:?}", frame_rect, screen_rect);
                state.screen_rects.push((result.confidence, screen_rect));

                if frame_rect.width() < self.min_box_size || frame_rect.height() < self.min_box_size {
                    log::warn!("Degenerate rectangle! {:?}", frame_rect);
                    continue;
                }

                rects_to_track.push((result, frame_rect));
            }

            state.tracked_objects.clear();
            state.last_decision = None;
            if rects_to_track.is_empty() {
                log::debug!("Nothing to track, aborting.");
                return Vec::new();
            }

            for (result, frame_rect) in rects_to_track {
                if state.tracked_objects.len() >= PALETTE.len() {
                    break;
                }
                let color_index = state.tracked_objects.len();
                state.tracked_objects.push(TrackedObject::new(frame_rect, &result.label, result.confidence, color_index));
            }

            let first_label = state.tracked_objects.first().map(|first| first.label.clone());
            (state.tracked_objects.clone(), first_label)
        };

        // store I/O and speech stay outside the state lock, drawing must not wait on them
        if let (Some(gate), Some(label)) = (&self.gate, first_label) {
            let decision = gate.observe(&label);
            self.state.lock().last_decision = Some(decision);
        }

        tracked
    }

    /// Entry point for a detector result batch, mapped through the transform
    /// of the last drawn canvas.
    pub fn track_results(&self, results: &[Detection], timestamp: u64) -> Vec<TrackedObject> {
        log::info!("Processing {} results from {}", results.len(), timestamp);
        let frame_to_canvas = self.state.lock().frame_to_canvas.unwrap_or_else(|| {
            log::debug!("No canvas drawn yet, debug rectangles stay in frame coordinates");
            Transform::identity()
        });
        self.update(results, &frame_to_canvas)
    }

    /// Display placement of every tracked object for a canvas of the given size.
    ///
    /// Also remembers the frame to canvas transform for the following
    /// [`MultiBoxTracker::track_results`] calls.
    pub fn draw_list(&self, canvas: Size) -> Vec<DrawItem> {
        let mut state = self.state.lock();
        if !state.geometry.is_configured() {
            log::debug!("Frame configuration missing, nothing to draw");
            return Vec::new();
        }

        let frame_to_canvas = state.geometry.frame_to_canvas(canvas);
        state.frame_to_canvas = Some(frame_to_canvas);

        state.tracked_objects
            .iter()
            .map(|recognition| {
                let tracked_pos = recognition.display_rect(&frame_to_canvas);
                DrawItem {
                    rect: tracked_pos,
                    corner_size: tracked_pos.width().min(tracked_pos.height()) / 8.0,
                    color: recognition.color().0,
                    caption: recognition.caption(),
                }
            })
            .collect()
    }

    /// Confidence and display rectangle of every detection with geometry from
    /// the last update, degenerate ones included.
    pub fn screen_rects(&self) -> Vec<(f32, BBox)> {
        self.state.lock().screen_rects.clone()
    }

    pub fn tracked_objects(&self) -> Vec<TrackedObject> {
        self.state.lock().tracked_objects.clone()
    }

    /// Gate outcome of the last update, `None` if nothing was tracked or no gate is attached.
    pub fn last_decision(&self) -> Option<AnnounceDecision> {
        self.state.lock().last_decision.clone()
    }
}
