//! CLI argument parsing and configuration

use clap::Parser;
use std::path::PathBuf;

/// mixtape - Random crossfaded mix generator
///
/// Picks a pseudo-random subset of tracks from a directory tree and
/// concatenates them, with crossfades, into a single file of roughly the
/// requested length. Decoding, crossfading and trimming are delegated to
/// ffmpeg.
#[derive(Parser, Debug)]
#[command(name = "mixtape")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Target length of the final mix in minutes (fractional allowed)
    #[arg(short, long, value_name = "MINUTES")]
    pub length: f64,

    /// Output filename; the extension picks the codec (.mp3 or .wav)
    #[arg(short, long, value_name = "FILE", default_value = "random_mix.mp3")]
    pub output: PathBuf,

    /// Directory containing the track library
    #[arg(short, long, value_name = "DIR", default_value = "tracks")]
    pub tracks: PathBuf,

    /// Crossfade duration between adjacent tracks in milliseconds
    #[arg(short, long, value_name = "MS", default_value_t = 5500)]
    pub crossfade: u64,

    /// Fix the selection shuffle for a reproducible mix
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Also write a JSON cue manifest (seed, per-track offsets) to this path
    #[arg(long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// External audio tool binary
    #[arg(long, value_name = "BIN", default_value = "ffmpeg")]
    pub ffmpeg: String,

    /// Plan and print the tracklist without rendering anything
    #[arg(long, default_value = "false")]
    pub dry_run: bool,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress the progress bar and non-error logs)
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Cli {
    /// Get the log level based on verbosity flags
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_help_text() {
        let cli = Cli::parse_from(["mixtape", "--length", "60"]);
        assert_eq!(cli.output, PathBuf::from("random_mix.mp3"));
        assert_eq!(cli.tracks, PathBuf::from("tracks"));
        assert_eq!(cli.crossfade, 5500);
        assert_eq!(cli.ffmpeg, "ffmpeg");
        assert!(cli.seed.is_none());
        assert!(!cli.dry_run);
    }

    #[test]
    fn length_is_required() {
        assert!(Cli::try_parse_from(["mixtape"]).is_err());
    }

    #[test]
    fn log_level_follows_verbosity() {
        let cli = Cli::parse_from(["mixtape", "--length", "1", "-vv"]);
        assert_eq!(cli.log_level(), tracing::Level::DEBUG);
    }
}
