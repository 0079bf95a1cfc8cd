//! Core data types for mixtape
//!
//! These types represent the domain model and flow through the pipeline.

use std::path::PathBuf;
use std::time::Duration;

// =============================================================================
// Supported formats
// =============================================================================

/// Audio formats mixtape will pick up during discovery
///
/// The external tool does the actual decoding, so "supported" means
/// "has headers we can read a duration from and ffmpeg can decode".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Mp3,
    Wav,
    Flac,
    Aiff,
    Ogg,
    M4a,
}

impl AudioFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "mp3" => Some(AudioFormat::Mp3),
            "wav" => Some(AudioFormat::Wav),
            "flac" => Some(AudioFormat::Flac),
            "aiff" | "aif" => Some(AudioFormat::Aiff),
            "ogg" => Some(AudioFormat::Ogg),
            "m4a" => Some(AudioFormat::M4a),
            _ => None,
        }
    }

    /// Check if a path has a supported extension
    pub fn is_supported_path(path: &std::path::Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
            .is_some()
    }
}

// =============================================================================
// Track representation
// =============================================================================

/// A probed audio file: path, header duration, and a display title
#[derive(Debug, Clone)]
pub struct Track {
    /// Original file path
    pub path: PathBuf,
    /// Duration read from the file headers
    pub duration: Duration,
    /// Tag title, falling back to the file stem
    pub title: String,
}

impl Track {
    /// Format duration as MM:SS for logs and the tracklist printout
    pub fn duration_display(&self) -> String {
        let secs = self.duration.as_secs();
        format!("{}:{:02}", secs / 60, secs % 60)
    }
}

// =============================================================================
// Mix plan
// =============================================================================

/// One slot in the mix: a chosen track, how much of it is used, and where
#[derive(Debug, Clone)]
pub struct PlanEntry {
    pub track: Track,
    /// Portion of the track used in the mix (the final entry may be trimmed)
    pub take: Duration,
    /// Crossfade leading into this entry; zero for the first.
    /// Clamped so it never exceeds either neighboring take.
    pub crossfade_in: Duration,
    /// Offset of this entry's first sample inside the mix
    pub start: Duration,
}

/// Ordered track sequence with per-gap crossfades, built by the selection stage
#[derive(Debug, Clone)]
pub struct MixPlan {
    pub entries: Vec<PlanEntry>,
    /// Requested mix length
    pub target: Duration,
    /// Seed the shuffle ran with (logged and exported for reproducibility)
    pub seed: u64,
}

impl MixPlan {
    /// Total mix duration: takes minus crossfade overlaps.
    ///
    /// Equals `target` whenever the library had enough audio.
    pub fn total_duration(&self) -> Duration {
        self.entries
            .last()
            .map(|e| e.start + e.take)
            .unwrap_or(Duration::ZERO)
    }

    pub fn track_count(&self) -> usize {
        self.entries.len()
    }
}
