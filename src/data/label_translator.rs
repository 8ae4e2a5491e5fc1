use std::collections::HashMap;
use std::path::Path;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use crate::utils;

/// Static `label=translation` table consulted before a label is announced.
///
/// Loaded once and shared read-only afterwards.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct LabelTranslator {
    table: HashMap<String, String>,
}

impl LabelTranslator {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let lines = utils::file_to_vec(path)
            .with_context(|| format!("Failed to read translation table {}", path.display()))?;
        let translator = Self::from_lines(lines);
        log::info!("Loaded {} label translations from {}", translator.len(), path.display());
        Ok(translator)
    }

    /// Builds the table from `label=translation` lines. Lines without `=` are
    /// skipped and a repeated label keeps its last translation.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = HashMap::new();
        for line in lines {
            let line = line.as_ref().trim_end_matches('\r');
            match line.split_once('=') {
                Some((label, translation)) => {
                    table.insert(label.to_string(), translation.to_string());
                }
                None => {
                    if !line.trim().is_empty() {
                        log::debug!("Skipping translation line without '=': {}", line);
                    }
                }
            }
        }
        Self { table }
    }

    pub fn parse(text: &str) -> Self {
        Self::from_lines(text.lines())
    }

    pub fn with_entry(mut self, label: &str, translation: &str) -> Self {
        self.table.insert(label.to_string(), translation.to_string());
        self
    }

    /// Exact-match lookup. An unknown label yields an empty string.
    pub fn translate(&self, label: &str) -> String {
        self.table.get(label).cloned().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
