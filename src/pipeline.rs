use std::sync::Arc;
use std::time::Instant;
use image::RgbaImage;
use parking_lot::Mutex;
use crate::common::{Detection, PixelFrame, Size, TrackedObject};
use crate::data::{LabelTranslator, TrackerConfig};
use crate::frame_ops::{self, yuv_convert, DrawItem, FrameGeometry, Transform};
use crate::tracking::{AnnouncementGate, FileOccurrenceStore, MultiBoxTracker, OccurrenceStore, Speaker};
use crate::utils;

#[derive(Debug, Default, Clone, Copy)]
struct CropTransforms {
    frame_to_crop: Transform,
    crop_to_frame: Transform,
}

/// Frame conversion, tracking and announcement wired together for a host
/// that owns the camera, the detector and the speech engine.
pub struct SightPipeline {
    config: TrackerConfig,
    gate: Arc<AnnouncementGate>,
    tracker: MultiBoxTracker,
    crop: Mutex<Option<CropTransforms>>,
    is_test: bool,
}

impl SightPipeline {
    pub fn new(config: TrackerConfig, gate: AnnouncementGate) -> Self {
        let gate = Arc::new(gate);
        let tracker = MultiBoxTracker::new(&config).with_gate(gate.clone());
        Self {
            config,
            gate,
            tracker,
            crop: Mutex::new(None),
            is_test: false,
        }
    }

    /// Builds the pipeline from `config` alone: translations from
    /// `translations_path` (empty table when unset) and a file backed
    /// occurrence store.
    pub fn from_config(config: TrackerConfig, speaker: Option<Box<dyn Speaker>>) -> anyhow::Result<Self> {
        let translator = match &config.translations_path {
            Some(path) => LabelTranslator::from_file(path)?,
            None => {
                log::warn!("No translation table configured, announcements will be empty");
                LabelTranslator::new()
            }
        };

        let store_path = config.resolve_store_path()?;
        log::info!("Using occurrence store {}", store_path.display());
        let store: Box<dyn OccurrenceStore> = Box::new(FileOccurrenceStore::new(store_path));

        let mut gate = AnnouncementGate::new(store, Arc::new(translator), &config);
        if let Some(speaker) = speaker {
            gate = gate.with_speaker(speaker);
        }
        Ok(Self::new(config, gate))
    }

    /// Prints stage timings to stdout instead of the `trace` log.
    pub fn with_timing_output(mut self, x: bool) -> Self {
        self.is_test = x;
        self
    }

    pub fn tracker(&self) -> &MultiBoxTracker {
        &self.tracker
    }

    pub fn gate(&self) -> &AnnouncementGate {
        &self.gate
    }

    /// Negotiates the capture resolution against the configured desired size.
    pub fn choose_preview_size(&self, choices: &[Size]) -> Size {
        let wanted = self.config.desired_preview_size;
        frame_ops::choose_optimal_size(choices, wanted.width, wanted.height, self.config.preview_floor)
    }

    /// Configures frame geometry once the camera settled on a preview size.
    pub fn on_preview_size_chosen(&self, size: Size, camera_rotation: i32, screen_orientation: i32) {
        let geometry = FrameGeometry::from_rotation(size, camera_rotation, screen_orientation);
        log::info!("Initializing at size {}", size);

        let frame_to_crop = geometry.frame_to_crop(self.config.crop_size, self.config.maintain_aspect);
        let crop_to_frame = frame_to_crop.invert().unwrap_or_else(|| {
            log::warn!("Frame to crop transform is not invertible, using identity");
            Transform::identity()
        });
        *self.crop.lock() = Some(CropTransforms { frame_to_crop, crop_to_frame });

        self.tracker.set_frame_configuration(size.width, size.height, geometry.sensor_orientation);
    }

    fn crop_transforms(&self) -> CropTransforms {
        let crop = *self.crop.lock();
        crop.unwrap_or_else(|| {
            log::warn!("Preview size not chosen yet, crop transforms are identity");
            CropTransforms::default()
        })
    }

    /// Converts a sensor frame into the detector's square RGBA input.
    pub fn prepare_detector_input(&self, frame: &PixelFrame) -> RgbaImage {
        let start = Instant::now();
        let mut elapsed = start.elapsed();

        let pixels = yuv_convert::convert(frame);
        let rgb_frame = yuv_convert::to_rgba_image(&pixels, frame.width, frame.height);
        elapsed = utils::trace(self.is_test, "TIME", "YUV conversion", start, elapsed);

        let crop_size = self.config.crop_size;
        let crop = frame_ops::warp_to_crop(&rgb_frame, &self.crop_transforms().frame_to_crop, crop_size, crop_size);
        utils::trace(self.is_test, "TIME", "Crop", start, elapsed);

        crop
    }

    /// Maps detector results back to frame coordinates, tracks them and lets
    /// the first tracked label through the announcement gate.
    pub fn process_detections(&self, results: &[Detection], timestamp: u64) -> Vec<TrackedObject> {
        let start = Instant::now();
        let mut elapsed = start.elapsed();

        let mapped = frame_ops::map_recognitions(results, &self.crop_transforms().crop_to_frame, self.config.min_confidence);
        elapsed = utils::trace(self.is_test, "TIME", "Map recognitions", start, elapsed);

        let tracked = self.tracker.track_results(&mapped, timestamp);
        utils::trace(self.is_test, "TIME", "Tracking", start, elapsed);

        tracked
    }

    pub fn draw_list(&self, canvas: Size) -> Vec<DrawItem> {
        self.tracker.draw_list(canvas)
    }

    /// Forgets all occurrence counts.
    pub fn shutdown(&self) {
        if let Err(err) = self.gate.reset() {
            log::warn!("Failed to clear occurrence store on shutdown: {:#}", err);
        }
    }
}
