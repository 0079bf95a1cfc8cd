//! Crossfade concatenation via ffmpeg
//!
//! The whole render is one batched invocation: every planned track as an
//! input, an `acrossfade` filter chain carrying the plan's per-gap
//! durations, and a final `-t` trim to the exact requested length. The
//! args builder is pure; the runner is a thin `Command` wrapper.

use crate::config::Settings;
use crate::error::{MixError, Result};
use crate::types::MixPlan;
use std::path::Path;
use std::process::Command;
use std::time::Duration;
use tracing::{debug, info};

/// MP3 VBR quality: 0 (best) - 9 (worst)
const MP3_QUALITY: u8 = 2;

/// Build the complete ffmpeg argument list for a plan.
/// Returns a `Vec<String>` ready for `Command::new(bin).args(...)`.
pub fn build_ffmpeg_args(plan: &MixPlan, output: &Path) -> Vec<String> {
    let mut args: Vec<String> = Vec::new();

    args.push("-y".into());
    args.push("-hide_banner".into());

    for entry in &plan.entries {
        args.push("-i".into());
        args.push(entry.track.path.to_string_lossy().into_owned());
    }

    if plan.entries.len() > 1 {
        let chain = if plan
            .entries
            .iter()
            .skip(1)
            .all(|e| e.crossfade_in.is_zero())
        {
            build_concat_filter(plan.entries.len())
        } else {
            build_acrossfade_chain(plan)
        };
        args.push("-filter_complex".into());
        args.push(chain);
        args.push("-map".into());
        args.push("[mix]".into());
    } else {
        // Single input: no filter needed, just drop any embedded cover art
        args.push("-vn".into());
    }

    // Exact-length trim; selection plans to the same figure
    args.push("-t".into());
    args.push(fmt_secs(plan.target));

    // Output codec from the extension
    match output.extension().and_then(|e| e.to_str()) {
        Some("wav") => {
            args.push("-acodec".into());
            args.push("pcm_s16le".into());
        }
        _ => {
            args.push("-q:a".into());
            args.push(MP3_QUALITY.to_string());
        }
    }

    args.push(output.to_string_lossy().into_owned());
    args
}

/// Pairwise acrossfade chain with the plan's per-gap durations.
/// `c1=tri:c2=tri` selects linear fade curves.
fn build_acrossfade_chain(plan: &MixPlan) -> String {
    let mut parts: Vec<String> = Vec::new();
    let last = plan.entries.len() - 1;

    for (i, entry) in plan.entries.iter().enumerate().skip(1) {
        let src = if i == 1 {
            "[0:a]".to_string()
        } else {
            format!("[x{}]", i - 1)
        };
        let dst = if i == last {
            "[mix]".to_string()
        } else {
            format!("[x{i}]")
        };
        parts.push(format!(
            "{src}[{i}:a]acrossfade=d={}:c1=tri:c2=tri{dst}",
            fmt_secs(entry.crossfade_in)
        ));
    }

    parts.join(";")
}

/// Butt-joined concatenation for a zero crossfade (acrossfade rejects d=0)
fn build_concat_filter(inputs: usize) -> String {
    let labels: String = (0..inputs).map(|i| format!("[{i}:a]")).collect();
    format!("{labels}concat=n={inputs}:v=0:a=1[mix]")
}

fn fmt_secs(d: Duration) -> String {
    format!("{:.3}", d.as_secs_f64())
}

/// Check that the external tool can be launched at all
///
/// Done before rendering so a missing binary fails with an actionable
/// message instead of a confusing render error.
pub fn ensure_available(bin: &str) -> Result<()> {
    let output = Command::new(bin)
        .arg("-version")
        .output()
        .map_err(|e| MixError::ToolUnavailable {
            bin: bin.to_string(),
            reason: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(MixError::ToolUnavailable {
            bin: bin.to_string(),
            reason: format!(
                "'{bin} -version' exited with status {}",
                output.status.code().unwrap_or(-1)
            ),
        });
    }

    debug!("{} is available", bin);
    Ok(())
}

/// Render a plan to the output file
pub fn render(plan: &MixPlan, settings: &Settings) -> Result<()> {
    if plan.entries.is_empty() {
        return Err(MixError::ConfigError(
            "refusing to render an empty plan".to_string(),
        ));
    }

    ensure_available(&settings.ffmpeg_bin)?;

    if let Some(parent) = settings.output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| MixError::OutputError {
                path: settings.output.clone(),
                reason: e.to_string(),
            })?;
        }
    }

    let args = build_ffmpeg_args(plan, &settings.output);
    debug!("{} {}", settings.ffmpeg_bin, args.join(" "));

    let output = Command::new(&settings.ffmpeg_bin)
        .args(&args)
        .output()
        .map_err(|e| MixError::ToolUnavailable {
            bin: settings.ffmpeg_bin.clone(),
            reason: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(MixError::ToolFailed {
            status: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    info!("Rendered {}", settings.output.display());
    Ok(())
}
