//! File discovery and scanning

use crate::error::{MixError, Result};
use crate::types::AudioFormat;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Discovered audio file, not yet probed
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    pub format: AudioFormat,
}

/// Scan a directory tree for audio files
///
/// The result is sorted by path: WalkDir yields entries in platform-dependent
/// order, and a stable pre-shuffle order is what makes a fixed seed reproduce
/// the same selection everywhere.
pub fn scan(root: &Path) -> Result<Vec<DiscoveredFile>> {
    if !root.exists() {
        return Err(MixError::TracksDirNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(MixError::NotADirectory(root.to_path_buf()));
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if !path.is_file() || is_hidden(path) {
            continue;
        }
        if let Some(file) = try_discover_file(path) {
            debug!("Discovered: {}", file.path.display());
            files.push(file);
        }
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));

    info!("Discovered {} audio files", files.len());

    if files.is_empty() {
        warn!("No supported audio files found in {}", root.display());
    }

    Ok(files)
}

/// Try to create a DiscoveredFile if the path is a supported audio format
fn try_discover_file(path: &Path) -> Option<DiscoveredFile> {
    let ext = path.extension()?.to_str()?;
    let format = AudioFormat::from_extension(ext)?;

    Some(DiscoveredFile {
        path: path.to_path_buf(),
        format,
    })
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}
