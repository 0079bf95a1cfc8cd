//! JSON cue manifest for a rendered mix
//!
//! Records what the selection chose - seed, per-track start offsets, takes
//! and crossfades - so a mix can be reproduced or inspected after the fact.

use crate::error::{MixError, Result};
use crate::types::MixPlan;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

/// JSON output schema version
const SCHEMA_VERSION: &str = "1.0";

/// Top-level manifest structure
#[derive(Debug, Serialize, Deserialize)]
pub struct MixManifest {
    /// Schema version for forward compatibility
    pub version: String,
    /// mixtape version that generated this file
    pub generator_version: String,
    /// Timestamp of the run
    pub created_at: String,
    /// Shuffle seed; rerunning with `--seed` reproduces the mix
    pub seed: u64,
    /// Requested mix length in seconds
    pub target_secs: f64,
    /// Planned mix length in seconds (equals target when audio sufficed)
    pub actual_secs: f64,
    /// Tracks in mix order
    pub tracks: Vec<ManifestTrack>,
}

/// One slot of the mix as it appears in the manifest
#[derive(Debug, Serialize, Deserialize)]
pub struct ManifestTrack {
    pub path: String,
    pub title: String,
    /// Offset of this track's first sample inside the mix
    pub start_secs: f64,
    /// Portion of the track used
    pub take_secs: f64,
    /// Crossfade leading into this track (zero for the first)
    pub crossfade_in_secs: f64,
    /// Whether the take is shorter than the source track
    pub trimmed: bool,
}

impl MixManifest {
    pub fn from_plan(plan: &MixPlan) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            seed: plan.seed,
            target_secs: plan.target.as_secs_f64(),
            actual_secs: plan.total_duration().as_secs_f64(),
            tracks: plan
                .entries
                .iter()
                .map(|e| ManifestTrack {
                    path: e.track.path.to_string_lossy().into_owned(),
                    title: e.track.title.clone(),
                    start_secs: e.start.as_secs_f64(),
                    take_secs: e.take.as_secs_f64(),
                    crossfade_in_secs: e.crossfade_in.as_secs_f64(),
                    trimmed: e.take < e.track.duration,
                })
                .collect(),
        }
    }
}

/// Write the manifest for a plan
///
/// Uses atomic write pattern: writes to a temp file first, then renames.
/// This prevents a half-written manifest if the write is interrupted.
pub fn write_manifest(plan: &MixPlan, output_path: &Path) -> Result<()> {
    let temp_path = output_path.with_extension("json.tmp");

    {
        let file = File::create(&temp_path).map_err(|e| MixError::OutputError {
            path: output_path.to_path_buf(),
            reason: format!("Failed to create temp file: {}", e),
        })?;
        let writer = BufWriter::new(file);

        serde_json::to_writer_pretty(writer, &MixManifest::from_plan(plan)).map_err(|e| {
            MixError::OutputError {
                path: output_path.to_path_buf(),
                reason: format!("Failed to serialize manifest: {}", e),
            }
        })?;
    }

    std::fs::rename(&temp_path, output_path).map_err(|e| MixError::OutputError {
        path: output_path.to_path_buf(),
        reason: format!("Failed to finalize manifest: {}", e),
    })?;

    info!("Wrote manifest to {}", output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PlanEntry, Track};
    use std::path::PathBuf;
    use std::time::Duration;

    fn sample_plan() -> MixPlan {
        MixPlan {
            entries: vec![
                PlanEntry {
                    track: Track {
                        path: PathBuf::from("a.mp3"),
                        duration: Duration::from_secs(100),
                        title: "A".into(),
                    },
                    take: Duration::from_secs(100),
                    crossfade_in: Duration::ZERO,
                    start: Duration::ZERO,
                },
                PlanEntry {
                    track: Track {
                        path: PathBuf::from("b.mp3"),
                        duration: Duration::from_secs(200),
                        title: "B".into(),
                    },
                    take: Duration::from_secs(55),
                    crossfade_in: Duration::from_secs(5),
                    start: Duration::from_secs(95),
                },
            ],
            target: Duration::from_secs(150),
            seed: 42,
        }
    }

    #[test]
    fn manifest_mirrors_the_plan() {
        let m = MixManifest::from_plan(&sample_plan());

        assert_eq!(m.version, SCHEMA_VERSION);
        assert_eq!(m.seed, 42);
        assert_eq!(m.target_secs, 150.0);
        assert_eq!(m.actual_secs, 150.0);
        assert_eq!(m.tracks.len(), 2);
        assert_eq!(m.tracks[1].start_secs, 95.0);
        assert_eq!(m.tracks[1].crossfade_in_secs, 5.0);
        assert!(!m.tracks[0].trimmed);
        assert!(m.tracks[1].trimmed);
    }

    #[test]
    fn write_round_trips_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mix.json");

        write_manifest(&sample_plan(), &path).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: MixManifest = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.seed, 42);
        assert_eq!(parsed.tracks[0].path, "a.mp3");
    }
}
