//! File/code adapted from https://github.com/jamjamjon/usls
//!
//! Where the crate persists its state when the host doesn't say otherwise.

use std::path::{Path, PathBuf};

const APP_DIR: &str = "sight_speak";

/// Returns `<local data dir>/sight_speak`, creating it if it does not exist.
///
/// Example: `~/.local/share/sight_speak`.
pub fn data_dir() -> anyhow::Result<PathBuf> {
    let mut path = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("No local data directory available on this platform"))?;
    path.push(APP_DIR);
    create_directory(&path)?;
    Ok(path)
}

/// Creates the parent directory of `file` if it does not exist yet.
pub(crate) fn ensure_parent(file: &Path) -> anyhow::Result<()> {
    match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => create_directory(parent),
        _ => Ok(()),
    }
}

/// Creates the specified directory if it does not exist.
fn create_directory(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
