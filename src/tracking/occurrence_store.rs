//! Persisted per-label occurrence counts backing the announcement gate.
//!
//! On disk the records are plain `label-count` lines. The count is whatever
//! follows the *last* `-`, so labels that contain dashes themselves
//! (`t-shirt-3`) still read back correctly.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use anyhow::Context;
use crate::data::ensure_parent;

/// Label to count mapping, at most one record per label.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct OccurrenceRecords {
    counts: BTreeMap<String, u32>,
}

impl OccurrenceRecords {
    pub fn new() -> Self {
        Default::default()
    }

    /// Parses `label-count` lines. Lines that don't parse are skipped, and a
    /// label listed twice keeps its last count.
    pub fn parse(text: &str) -> Self {
        let mut counts = BTreeMap::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match line.rsplit_once('-').and_then(|(label, count)| Some((label, count.trim().parse::<u32>().ok()?))) {
                Some((label, count)) if !label.is_empty() => {
                    counts.insert(label.to_string(), count);
                }
                _ => log::debug!("Skipping malformed occurrence record: {}", line),
            }
        }
        Self { counts }
    }

    pub fn to_text(&self) -> String {
        self.counts
            .iter()
            .map(|(label, count)| format!("{}-{}", label, count))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn count(&self, label: &str) -> u32 {
        self.counts.get(label).copied().unwrap_or(0)
    }

    /// Bumps `label` by one, creating it at 1. Returns the count it had before.
    pub fn increment(&mut self, label: &str) -> u32 {
        let count = self.counts.entry(label.to_string()).or_insert(0);
        let previous = *count;
        *count = count.saturating_add(1);
        previous
    }

    pub fn total(&self) -> u32 {
        self.counts.values().fold(0u32, |acc, c| acc.saturating_add(*c))
    }

    pub fn distinct_labels(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

}

/// Durable home of the occurrence records.
///
/// Every change rewrites the whole record set; callers hold a lock around
/// the load/save pair.
pub trait OccurrenceStore: Send {
    fn load(&self) -> anyhow::Result<OccurrenceRecords>;

    fn save(&mut self, records: &OccurrenceRecords) -> anyhow::Result<()>;

    fn clear(&mut self) -> anyhow::Result<()> {
        self.save(&OccurrenceRecords::default())
    }
}

/// Text file store. A missing file reads as empty.
#[derive(Debug, Clone)]
pub struct FileOccurrenceStore {
    path: PathBuf,
}

impl FileOccurrenceStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// `<store>.tmp`, appended so it never collides with the store itself.
    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl OccurrenceStore for FileOccurrenceStore {
    fn load(&self) -> anyhow::Result<OccurrenceRecords> {
        if !self.path.exists() {
            return Ok(OccurrenceRecords::default());
        }
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read occurrence store {}", self.path.display()))?;
        Ok(OccurrenceRecords::parse(&text))
    }

    fn save(&mut self, records: &OccurrenceRecords) -> anyhow::Result<()> {
        ensure_parent(&self.path)?;

        // write beside the target, then swap it in whole
        let tmp_path = self.tmp_path();
        let result = write_synced(&tmp_path, records.to_text().as_bytes())
            .and_then(|_| {
                fs::rename(&tmp_path, &self.path)
                    .with_context(|| format!("Failed to replace occurrence store {}", self.path.display()))
            });
        if result.is_err() && tmp_path.exists() {
            if let Err(err) = fs::remove_file(&tmp_path) {
                log::debug!("Failed to remove {}: {}", tmp_path.display(), err);
            }
        }
        result
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    let mut file = fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    file.write_all(bytes)?;
    file.sync_all()?;
    Ok(())
}

/// Store kept in memory only, for hosts without durable storage and for tests.
#[derive(Default, Debug, Clone)]
pub struct MemoryOccurrenceStore {
    records: OccurrenceRecords,
}

impl MemoryOccurrenceStore {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_records(records: OccurrenceRecords) -> Self {
        Self { records }
    }
}

impl OccurrenceStore for MemoryOccurrenceStore {
    fn load(&self) -> anyhow::Result<OccurrenceRecords> {
        Ok(self.records.clone())
    }

    fn save(&mut self, records: &OccurrenceRecords) -> anyhow::Result<()> {
        self.records = records.clone();
        Ok(())
    }
}
