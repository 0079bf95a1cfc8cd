//! Duration and title probing from audio file headers
//!
//! Uses lofty to read stream properties and tags. Decoding stays in the
//! external tool; only header-level information is needed to plan a mix.

use crate::discovery::DiscoveredFile;
use crate::error::{MixError, Result};
use crate::types::Track;
use lofty::file::{AudioFile, TaggedFileExt};
use lofty::tag::Accessor;
use std::path::Path;
use tracing::debug;

/// Probe a discovered file into a `Track`
///
/// Failures here are recoverable: the pipeline warns and leaves the file
/// out of the candidate pool.
pub fn probe_track(file: &DiscoveredFile) -> Result<Track> {
    let path = &file.path;

    let tagged = lofty::read_from_path(path).map_err(|e| MixError::ProbeError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let duration = tagged.properties().duration();
    if duration.is_zero() {
        return Err(MixError::ProbeError {
            path: path.clone(),
            reason: "headers report zero duration".to_string(),
        });
    }

    let tag = tagged.primary_tag().or_else(|| tagged.first_tag());
    let title = tag
        .and_then(|t| t.title().map(|s| s.to_string()))
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| file_stem(path));

    debug!(
        "Probed {}: {:.1}s",
        path.display(),
        duration.as_secs_f64()
    );

    Ok(Track {
        path: path.clone(),
        duration,
        title,
    })
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}
