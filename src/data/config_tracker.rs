//! Options for building the tracking and announcement pipeline.

use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use crate::common::Size;
use crate::data::data_dir;

pub(crate) const STORE_FILE_NAME: &str = "occurrences.txt";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    // tracker
    pub min_box_size: f32,

    // detector input
    pub min_confidence: f32,
    pub crop_size: u32,
    pub maintain_aspect: bool,

    // preview negotiation
    pub preview_floor: u32,
    pub desired_preview_size: Size,

    // announcement gate
    pub reset_total: u32,
    pub distinct_label_ceiling: usize,
    pub announce_suffix: String,
    pub store_path: Option<PathBuf>,
    pub translations_path: Option<PathBuf>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            min_box_size: 16.0,

            min_confidence: 0.5,
            crop_size: 300,
            maintain_aspect: false,

            preview_floor: 320,
            desired_preview_size: Size::new(640, 480),

            reset_total: 30,
            distinct_label_ceiling: 6,
            announce_suffix: " a frente".to_string(),
            store_path: None,
            translations_path: None,
        }
    }
}

impl TrackerConfig {
    pub fn new() -> Self {
        Default::default()
    }

    /// Loads a config from a JSON file. Missing keys keep their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        log::info!("Loaded tracker config from {}", path.display());
        Ok(config)
    }

    /// Resolves the occurrence store location, falling back to the
    /// platform data directory when none was configured.
    pub fn resolve_store_path(&self) -> Result<PathBuf> {
        match &self.store_path {
            Some(path) => Ok(path.clone()),
            None => Ok(data_dir()?.join(STORE_FILE_NAME)),
        }
    }

    pub fn with_min_box_size(mut self, x: f32) -> Self {
        self.min_box_size = x;
        self
    }

    pub fn with_min_confidence(mut self, x: f32) -> Self {
        self.min_confidence = x;
        self
    }

    pub fn with_crop_size(mut self, n: u32) -> Self {
        self.crop_size = n;
        self
    }

    pub fn with_maintain_aspect(mut self, x: bool) -> Self {
        self.maintain_aspect = x;
        self
    }

    pub fn with_preview_floor(mut self, n: u32) -> Self {
        self.preview_floor = n;
        self
    }

    pub fn with_desired_preview_size(mut self, size: Size) -> Self {
        self.desired_preview_size = size;
        self
    }

    pub fn with_reset_total(mut self, n: u32) -> Self {
        self.reset_total = n;
        self
    }

    pub fn with_distinct_label_ceiling(mut self, n: usize) -> Self {
        self.distinct_label_ceiling = n;
        self
    }

    pub fn with_announce_suffix(mut self, suffix: &str) -> Self {
        self.announce_suffix = suffix.to_string();
        self
    }

    pub fn with_store_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.store_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_translations_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.translations_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn to_string(&self) -> String {
        format!("Min Box Size: {}\n\
        Min Confidence: {}\n\
        Detector Crop: {}x{} (maintain aspect: {})\n\
        Desired Preview Size: {} (floor {})\n\
        Announcement Reset Total: {}\n\
        Store Path: {:?}\n\
        Translations Path: {:?}",
                self.min_box_size, self.min_confidence,
                self.crop_size, self.crop_size, self.maintain_aspect,
                self.desired_preview_size, self.preview_floor,
                self.reset_total, self.store_path, self.translations_path)
    }
}
