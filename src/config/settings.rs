//! Runtime configuration settings

use std::path::PathBuf;
use std::time::Duration;

/// Runtime settings for one mix run
#[derive(Debug, Clone)]
pub struct Settings {
    /// Track library root
    pub tracks_dir: PathBuf,
    /// Output file for the rendered mix
    pub output: PathBuf,
    /// Requested mix length
    pub target: Duration,
    /// Crossfade applied at each track boundary
    pub crossfade: Duration,
    /// Fixed shuffle seed; a fresh one is drawn when absent
    pub seed: Option<u64>,
    /// Optional JSON cue manifest path
    pub manifest: Option<PathBuf>,
    /// External tool binary name or path
    pub ffmpeg_bin: String,
    /// Plan only, render nothing
    pub dry_run: bool,
    /// Show the probe progress bar
    pub show_progress: bool,
}

impl Settings {
    /// Create settings from CLI arguments
    ///
    /// `--length` is minutes; everything downstream works in `Duration`.
    pub fn from_cli(cli: &super::cli::Cli) -> Self {
        Self {
            tracks_dir: cli.tracks.clone(),
            output: cli.output.clone(),
            target: Duration::from_secs_f64(cli.length.max(0.0) * 60.0),
            crossfade: Duration::from_millis(cli.crossfade),
            seed: cli.seed,
            manifest: cli.manifest.clone(),
            ffmpeg_bin: cli.ffmpeg.clone(),
            dry_run: cli.dry_run,
            show_progress: !cli.quiet,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tracks_dir: PathBuf::from("tracks"),
            output: PathBuf::from("random_mix.mp3"),
            target: Duration::from_secs(60 * 60),
            crossfade: Duration::from_millis(5500),
            seed: None,
            manifest: None,
            ffmpeg_bin: "ffmpeg".to_string(),
            dry_run: false,
            show_progress: true,
        }
    }
}
