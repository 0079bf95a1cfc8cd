//! Random selection of tracks to fill a target duration
//!
//! Shuffles the candidate pool with a seeded RNG, then accumulates tracks
//! into a [`MixPlan`], counting each crossfade overlap once, until the mix
//! reaches the target. The final track's take is trimmed so the plan lands
//! exactly on target.

use crate::error::{MixError, Result};
use crate::types::{MixPlan, PlanEntry, Track};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::time::Duration;
use tracing::debug;

/// Build a mix plan from the candidate pool
///
/// The same `seed` over the same (path-sorted) pool always yields the same
/// plan. Per-gap crossfades are clamped to the shorter of the two adjacent
/// takes; a track that would be entirely swallowed by its crossfade is
/// skipped.
pub fn plan_mix(
    tracks: &[Track],
    target: Duration,
    crossfade: Duration,
    seed: u64,
) -> Result<MixPlan> {
    let mut order: Vec<&Track> = tracks.iter().collect();
    order.shuffle(&mut StdRng::seed_from_u64(seed));

    let mut entries: Vec<PlanEntry> = Vec::new();
    let mut total = Duration::ZERO;

    for track in order {
        if total >= target {
            break;
        }

        let gap = match entries.last() {
            Some(prev) => crossfade.min(prev.take).min(track.duration),
            None => Duration::ZERO,
        };

        // gap is clamped to track.duration, so equality means the whole
        // track would vanish into the overlap
        if !entries.is_empty() && track.duration <= gap {
            debug!(
                "Skipping {}: shorter than the crossfade window",
                track.path.display()
            );
            continue;
        }

        let start = total - gap;
        let remaining = target - total;

        let take = if track.duration - gap >= remaining {
            // Final slot: trim so the mix lands exactly on target
            remaining + gap
        } else {
            track.duration
        };

        total = start + take;
        entries.push(PlanEntry {
            track: track.clone(),
            take,
            crossfade_in: gap,
            start,
        });
    }

    if total < target {
        return Err(MixError::InsufficientAudio {
            available_secs: total.as_secs_f64(),
            requested_secs: target.as_secs_f64(),
        });
    }

    Ok(MixPlan {
        entries,
        target,
        seed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn pool(durations_secs: &[u64]) -> Vec<Track> {
        durations_secs
            .iter()
            .enumerate()
            .map(|(i, secs)| Track {
                path: PathBuf::from(format!("track_{i:02}.mp3")),
                duration: Duration::from_secs(*secs),
                title: format!("track_{i:02}"),
            })
            .collect()
    }

    fn selected_paths(plan: &MixPlan) -> Vec<PathBuf> {
        plan.entries.iter().map(|e| e.track.path.clone()).collect()
    }

    #[test]
    fn same_seed_same_plan() {
        let tracks = pool(&[180, 240, 200, 150, 300, 210, 190, 260]);
        let target = Duration::from_secs(600);
        let cf = Duration::from_secs(5);

        let a = plan_mix(&tracks, target, cf, 42).unwrap();
        let b = plan_mix(&tracks, target, cf, 42).unwrap();
        assert_eq!(selected_paths(&a), selected_paths(&b));
        assert_eq!(a.entries.len(), b.entries.len());
    }

    #[test]
    fn different_seeds_vary_the_selection() {
        let tracks = pool(&[180, 240, 200, 150, 300, 210, 190, 260, 170, 220]);
        let target = Duration::from_secs(600);
        let cf = Duration::from_secs(5);

        let selections: Vec<_> = (0..6)
            .map(|seed| selected_paths(&plan_mix(&tracks, target, cf, seed).unwrap()))
            .collect();
        assert!(
            selections.iter().any(|s| *s != selections[0]),
            "six seeds produced identical selections"
        );
    }

    #[test]
    fn plan_lands_exactly_on_target() {
        let tracks = pool(&[180, 240, 200, 150, 300]);
        let target = Duration::from_secs(500);
        let plan = plan_mix(&tracks, target, Duration::from_secs(5), 7).unwrap();

        assert_eq!(plan.total_duration(), target);
        // Everything but the last take is a whole track
        for entry in &plan.entries[..plan.entries.len() - 1] {
            assert_eq!(entry.take, entry.track.duration);
        }
        let last = plan.entries.last().unwrap();
        assert!(last.take <= last.track.duration);
    }

    #[test]
    fn crossfade_overlap_is_counted_once_per_gap() {
        // Force a known order with a single track repeated: 3 x 100s with a
        // 10s crossfade covers 100 + 90 + 90 = 280s
        let tracks = pool(&[100, 100, 100]);
        let target = Duration::from_secs(280);
        let plan = plan_mix(&tracks, target, Duration::from_secs(10), 1).unwrap();

        assert_eq!(plan.entries.len(), 3);
        assert_eq!(plan.entries[0].start, Duration::ZERO);
        assert_eq!(plan.entries[0].crossfade_in, Duration::ZERO);
        assert_eq!(plan.entries[1].start, Duration::from_secs(90));
        assert_eq!(plan.entries[1].crossfade_in, Duration::from_secs(10));
        assert_eq!(plan.entries[2].start, Duration::from_secs(180));
        assert_eq!(plan.total_duration(), target);
    }

    #[test]
    fn zero_crossfade_concatenates_back_to_back() {
        let tracks = pool(&[60, 60, 60]);
        let plan = plan_mix(
            &tracks,
            Duration::from_secs(150),
            Duration::ZERO,
            3,
        )
        .unwrap();

        assert_eq!(plan.entries[1].crossfade_in, Duration::ZERO);
        assert_eq!(plan.entries[1].start, Duration::from_secs(60));
        assert_eq!(plan.total_duration(), Duration::from_secs(150));
        // 150s out of 180s: the third take is trimmed to 30s
        assert_eq!(plan.entries[2].take, Duration::from_secs(30));
    }

    #[test]
    fn single_track_plan_when_first_track_covers_target() {
        let tracks = pool(&[600]);
        let target = Duration::from_secs(300);
        let plan = plan_mix(&tracks, target, Duration::from_secs(5), 0).unwrap();

        assert_eq!(plan.entries.len(), 1);
        assert_eq!(plan.entries[0].take, target);
        assert_eq!(plan.entries[0].crossfade_in, Duration::ZERO);
    }

    #[test]
    fn insufficient_audio_is_a_terminal_error() {
        let tracks = pool(&[60, 60]);
        let err = plan_mix(
            &tracks,
            Duration::from_secs(600),
            Duration::from_secs(5),
            0,
        )
        .unwrap_err();

        match err {
            MixError::InsufficientAudio {
                available_secs,
                requested_secs,
            } => {
                assert!(available_secs < requested_secs);
                assert_eq!(requested_secs, 600.0);
            }
            other => panic!("expected InsufficientAudio, got {other}"),
        }
    }

    #[test]
    fn tracks_shorter_than_the_crossfade_are_skipped() {
        // The 1s fillers cannot survive a 5s crossfade; with only 30s of
        // usable audio the plan cannot reach 40s
        let tracks = pool(&[30, 1, 1, 1]);
        let err = plan_mix(
            &tracks,
            Duration::from_secs(40),
            Duration::from_secs(5),
            9,
        )
        .unwrap_err();
        assert!(matches!(err, MixError::InsufficientAudio { .. }));
    }

    #[test]
    fn gap_is_clamped_to_short_neighbors() {
        // A 3s track between long ones: its gaps can be at most 3s even
        // though 10s was requested
        let tracks = pool(&[120, 3, 120]);
        let plan = plan_mix(
            &tracks,
            Duration::from_secs(200),
            Duration::from_secs(10),
            11,
        )
        .unwrap();

        for entry in &plan.entries {
            assert!(entry.crossfade_in <= entry.take);
            assert!(entry.crossfade_in <= entry.track.duration);
        }
        assert_eq!(plan.total_duration(), Duration::from_secs(200));
    }

    #[test]
    fn empty_pool_cannot_fill_any_target() {
        let err = plan_mix(
            &[],
            Duration::from_secs(60),
            Duration::from_secs(5),
            0,
        )
        .unwrap_err();
        assert!(matches!(err, MixError::InsufficientAudio { .. }));
    }
}
