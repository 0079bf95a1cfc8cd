//! Unified error types for mixtape
//!
//! Error strategy:
//! - Per-file errors (unreadable headers): Recoverable, skip and continue
//! - System errors (bad directory, missing tool, render failure): Fatal, abort the run
//!
//! All errors include actionable suggestions where possible.

use std::path::PathBuf;
use thiserror::Error;

/// Supported audio formats for helpful error messages
pub const SUPPORTED_FORMATS: &str = "MP3, WAV, FLAC, AIFF, OGG, M4A";

/// Top-level error type for mixtape operations
#[derive(Debug, Error)]
pub enum MixError {
    // =========================================================================
    // Recoverable errors - skip file, continue with the rest of the library
    // =========================================================================
    #[error("Failed to read '{path}': {reason}\n  Tip: If the file plays in other apps, its headers may be damaged; it will be left out of the mix")]
    ProbeError { path: PathBuf, reason: String },

    // =========================================================================
    // Fatal errors - abort the run
    // =========================================================================
    #[error("Tracks directory not found: '{0}'\n  Tip: Check the path exists, or pass a different one with --tracks")]
    TracksDirNotFound(PathBuf),

    #[error("Not a directory: '{0}'\n  Tip: --tracks expects a directory to search, not a single file")]
    NotADirectory(PathBuf),

    #[error("No audio files found in '{dir}'\n  Supported formats: {SUPPORTED_FORMATS}")]
    NoTracksFound { dir: PathBuf },

    #[error("Not enough audio to fill {requested_secs:.0}s: the library holds {available_secs:.0}s\n  Tip: Lower --length, shorten --crossfade, or point --tracks at a larger library")]
    InsufficientAudio {
        available_secs: f64,
        requested_secs: f64,
    },

    #[error("External tool '{bin}' is unavailable: {reason}\n  Tip: Install ffmpeg and make sure it is on PATH, or pass the binary with --ffmpeg")]
    ToolUnavailable { bin: String, reason: String },

    #[error("External tool exited with status {status}:\n{stderr}")]
    ToolFailed { status: i32, stderr: String },

    #[error("Cannot write output to '{path}': {reason}\n  Tip: Check write permissions for the output directory")]
    OutputError { path: PathBuf, reason: String },

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MixError {
    /// Whether the error should skip a single file rather than abort the run
    pub fn is_recoverable(&self) -> bool {
        matches!(self, MixError::ProbeError { .. })
    }
}

/// Result type alias for mixtape operations
pub type Result<T> = std::result::Result<T, MixError>;
