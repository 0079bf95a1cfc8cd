//! Pipeline orchestration
//!
//! Wires the linear stages together: discover, probe, select, render,
//! manifest. Single-threaded by design; the only expensive step is the
//! one batched external render call.

use crate::config::Settings;
use crate::discovery;
use crate::error::{MixError, Result};
use crate::manifest;
use crate::probe;
use crate::render;
use crate::selection;
use crate::types::MixPlan;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Pipeline result summary
#[derive(Debug)]
pub struct MixReport {
    /// Probed candidates the selection drew from
    pub tracks_available: usize,
    /// Tracks that made it into the mix
    pub tracks_used: usize,
    /// Files skipped because their headers could not be read
    pub skipped_files: usize,
    /// Seed the shuffle ran with
    pub seed: u64,
    /// Planned mix length in seconds
    pub mix_secs: f64,
    pub output: PathBuf,
    /// False for dry runs
    pub rendered: bool,
}

/// Run the full mix pipeline
pub fn run(settings: &Settings) -> Result<MixReport> {
    let pipeline_start = Instant::now();

    // Phase 1: Discovery
    info!("Scanning for audio files...");
    let discovery_start = Instant::now();
    let files = discovery::scan(&settings.tracks_dir)?;
    if files.is_empty() {
        return Err(MixError::NoTracksFound {
            dir: settings.tracks_dir.clone(),
        });
    }
    info!(
        "Found {} audio files in {:.2}s",
        files.len(),
        discovery_start.elapsed().as_secs_f64()
    );

    // Phase 2: Probe durations
    let probe_start = Instant::now();
    let progress_bar = if settings.show_progress {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut tracks = Vec::with_capacity(files.len());
    let mut skipped_files = 0usize;

    for file in &files {
        match probe::probe_track(file) {
            Ok(track) => tracks.push(track),
            Err(e) if e.is_recoverable() => {
                warn!("{}", e);
                skipped_files += 1;
            }
            Err(e) => return Err(e),
        }
        if let Some(ref pb) = progress_bar {
            pb.inc(1);
            pb.set_message(
                file.path
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .into_owned(),
            );
        }
    }

    if let Some(pb) = progress_bar {
        pb.finish_and_clear();
    }

    if tracks.is_empty() {
        // Every file on disk failed to probe
        return Err(MixError::NoTracksFound {
            dir: settings.tracks_dir.clone(),
        });
    }

    debug!(
        "Probed {} tracks in {:.2}s ({} unreadable)",
        tracks.len(),
        probe_start.elapsed().as_secs_f64(),
        skipped_files
    );

    // Phase 3: Selection
    let seed = settings.seed.unwrap_or_else(rand::random);
    info!("Selection seed: {}", seed);
    let plan = selection::plan_mix(&tracks, settings.target, settings.crossfade, seed)?;
    info!(
        "Selected {} of {} tracks ({:.1} minutes)",
        plan.track_count(),
        tracks.len(),
        plan.total_duration().as_secs_f64() / 60.0
    );

    print_tracklist(&plan, settings.dry_run);

    if settings.dry_run {
        println!("Dry run - nothing rendered");
        println!();
        return Ok(MixReport {
            tracks_available: tracks.len(),
            tracks_used: plan.track_count(),
            skipped_files,
            seed,
            mix_secs: plan.total_duration().as_secs_f64(),
            output: settings.output.clone(),
            rendered: false,
        });
    }

    // Phase 4: Render
    let render_start = Instant::now();
    render::render(&plan, settings)?;
    info!(
        "Render completed in {:.2}s",
        render_start.elapsed().as_secs_f64()
    );

    // Phase 5: Manifest
    if let Some(manifest_path) = &settings.manifest {
        manifest::write_manifest(&plan, manifest_path)?;
    }

    info!(
        "Total pipeline time: {:.2}s",
        pipeline_start.elapsed().as_secs_f64()
    );

    Ok(MixReport {
        tracks_available: tracks.len(),
        tracks_used: plan.track_count(),
        skipped_files,
        seed,
        mix_secs: plan.total_duration().as_secs_f64(),
        output: settings.output.clone(),
        rendered: true,
    })
}

/// Print the planned tracklist with start offsets
fn print_tracklist(plan: &MixPlan, dry_run: bool) {
    println!();
    if dry_run {
        println!("=== DRY RUN ===");
        println!();
    }

    for (i, entry) in plan.entries.iter().enumerate() {
        let start = entry.start.as_secs();
        let trimmed = if entry.take < entry.track.duration {
            let used = entry.take.as_secs();
            format!("  ({}:{:02} of {}, trimmed)", used / 60, used % 60, entry.track.duration_display())
        } else {
            String::new()
        };
        println!(
            "{:>3}. [{}:{:02}] {}{}",
            i + 1,
            start / 60,
            start % 60,
            entry.track.title,
            trimmed
        );
    }
    println!();
}
