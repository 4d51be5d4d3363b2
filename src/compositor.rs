use std::io::Write;
use std::path::Path;
use std::time::Duration;
use anyhow::{Result, anyhow};
use log::{info, debug};
use tempfile::NamedTempFile;

use crate::audio::run_ffmpeg;
use crate::timecode::TimecodeSheet;

// @module: Final video compositing

/// Thin wrapper over the external video compositor.
///
/// Derives per-image display durations from the timecode sheet (delta to
/// the next timestamp; the final image runs to the track's total duration),
/// writes an ffmpeg concat script, and muxes it with the combined audio.
#[derive(Debug, Default)]
pub struct VideoCompositor;

impl VideoCompositor {
    /// Create a new compositor
    pub fn new() -> Self {
        VideoCompositor
    }

    /// Compose the slideshow video from the timecode sheet and audio track
    pub async fn compose(
        &self,
        timecodes: &TimecodeSheet,
        total_ms: u64,
        audio_file: &Path,
        output: &Path,
    ) -> Result<()> {
        if timecodes.is_empty() {
            return Err(anyhow!("Cannot compose a video from an empty timecode sheet"));
        }

        let script = Self::concat_script(timecodes, total_ms)?;

        // The concat demuxer reads the image list from a file
        let mut list_file = NamedTempFile::new()?;
        list_file.write_all(script.as_bytes())?;
        list_file.flush()?;

        debug!("Concat script:\n{}", script);

        let args = vec![
            "-y".to_string(),
            "-f".to_string(), "concat".to_string(),
            "-safe".to_string(), "0".to_string(),
            "-i".to_string(), list_file.path().to_string_lossy().to_string(),
            "-i".to_string(), audio_file.to_string_lossy().to_string(),
            "-c:v".to_string(), "libx264".to_string(),
            "-pix_fmt".to_string(), "yuv420p".to_string(),
            "-c:a".to_string(), "copy".to_string(),
            "-shortest".to_string(),
            output.to_string_lossy().to_string(),
        ];

        run_ffmpeg(&args, Duration::from_secs(600)).await?;

        info!("Video written to {}", output.display());
        Ok(())
    }

    /// Build the concat demuxer script from the sheet.
    ///
    /// Timestamps are second-aligned by construction, so durations come out
    /// as whole seconds too.
    fn concat_script(timecodes: &TimecodeSheet, total_ms: u64) -> Result<String> {
        let mut script = String::new();

        for (i, entry) in timecodes.entries.iter().enumerate() {
            let end_ms = match timecodes.entries.get(i + 1) {
                Some(next) => next.timestamp_ms,
                None => total_ms,
            };
            if end_ms < entry.timestamp_ms {
                return Err(anyhow!(
                    "Timecode sheet is not monotonic at entry {}: {} -> {}",
                    i, entry.timestamp_ms, end_ms
                ));
            }
            let duration_s = (end_ms - entry.timestamp_ms) as f64 / 1000.0;

            script.push_str(&format!("file '{}'\n", entry.image_path.display()));
            script.push_str(&format!("duration {:.3}\n", duration_s));
        }

        // concat demuxer quirk: the last file must be listed again or its
        // duration directive is ignored
        if let Some(last) = timecodes.entries.last() {
            script.push_str(&format!("file '{}'\n", last.image_path.display()));
        }

        Ok(script)
    }
}
