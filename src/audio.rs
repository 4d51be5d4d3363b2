use std::path::{Path, PathBuf};
use std::time::Duration;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use log::{error, debug};
use serde_json::{Value, from_str};
use tokio::process::Command;

use crate::errors::BuildError;

// @module: Audio track plan, clip probing and encoding

/// Sample rate the combined track is normalized to. Matches the clips the
/// speech service returns, so normalization is a no-op in the common case.
const TRACK_SAMPLE_RATE: u32 = 24_000;

/// One piece of the combined audio stream, in append order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioPiece {
    /// A clip read from a file, with its probed duration
    Clip {
        /// Source file of the clip
        path: PathBuf,
        /// Probed duration in milliseconds
        duration_ms: u64,
    },

    /// Generated silence of an exact duration
    Silence {
        /// Silence duration in milliseconds
        duration_ms: u64,
    },
}

impl AudioPiece {
    /// Duration this piece contributes to the track
    pub fn duration_ms(&self) -> u64 {
        match self {
            AudioPiece::Clip { duration_ms, .. } => *duration_ms,
            AudioPiece::Silence { duration_ms } => *duration_ms,
        }
    }
}

/// Append-only sink for the combined audio stream.
///
/// Both implementations of the build output (the audio track and the
/// timecode sheet) are written in a single forward pass: pieces are only
/// ever appended, never reordered, trimmed or revisited.
pub trait AudioSink {
    /// Append a clip with its known duration
    fn append_clip(&mut self, path: &Path, duration_ms: u64);

    /// Append silence of the given duration
    fn append_silence(&mut self, duration_ms: u64);
}

/// The ordered plan of the combined audio stream.
///
/// The track holds clip references rather than decoded samples, so very
/// large dictionaries never require the whole stream in memory; decoding
/// happens once, inside the encoder.
#[derive(Debug, Default, Clone)]
pub struct AudioTrack {
    /// Pieces in append order
    pub pieces: Vec<AudioPiece>,
}

impl AudioTrack {
    /// Create an empty track
    pub fn new() -> Self {
        AudioTrack { pieces: Vec::new() }
    }

    /// Total planned duration of the track
    pub fn duration_ms(&self) -> u64 {
        self.pieces.iter().map(|p| p.duration_ms()).sum()
    }

    /// Whether the track has no pieces
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}

impl AudioSink for AudioTrack {
    fn append_clip(&mut self, path: &Path, duration_ms: u64) {
        self.pieces.push(AudioPiece::Clip {
            path: path.to_path_buf(),
            duration_ms,
        });
    }

    fn append_silence(&mut self, duration_ms: u64) {
        self.pieces.push(AudioPiece::Silence { duration_ms });
    }
}

/// Capability to fetch the duration of a named audio asset.
///
/// The production implementation probes files with ffprobe; tests substitute
/// a mock keyed by path. Either way, a missing file is an immediate fatal
/// error, never something to wait or retry for.
#[async_trait]
pub trait ClipStore: Send + Sync {
    /// Duration of the clip at `path` in milliseconds
    async fn duration_ms(&self, path: &Path) -> Result<u64, BuildError>;
}

/// Clip duration lookup backed by ffprobe
#[derive(Debug, Default)]
pub struct MediaProbe;

impl MediaProbe {
    /// Create a new probe
    pub fn new() -> Self {
        MediaProbe
    }
}

#[async_trait]
impl ClipStore for MediaProbe {
    async fn duration_ms(&self, path: &Path) -> Result<u64, BuildError> {
        if !path.is_file() {
            return Err(BuildError::MissingAsset(path.to_path_buf()));
        }

        let ffprobe_future = Command::new("ffprobe")
            .args([
                "-v", "quiet",
                "-print_format", "json",
                "-show_format",
                path.to_str().unwrap_or(""),
            ])
            .output();

        let timeout_duration = Duration::from_secs(60);
        let output = tokio::select! {
            result = ffprobe_future => {
                result.map_err(|e| BuildError::ClipUnreadable {
                    path: path.to_path_buf(),
                    message: format!("failed to execute ffprobe: {}", e),
                })?
            },
            _ = tokio::time::sleep(timeout_duration) => {
                return Err(BuildError::ClipUnreadable {
                    path: path.to_path_buf(),
                    message: "ffprobe timed out after 60 seconds".to_string(),
                });
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!("ffprobe failed for {}: {}", path.display(), stderr);
            return Err(BuildError::ClipUnreadable {
                path: path.to_path_buf(),
                message: stderr.to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let json: Value = from_str(&stdout).map_err(|e| BuildError::ClipUnreadable {
            path: path.to_path_buf(),
            message: format!("failed to parse ffprobe output: {}", e),
        })?;

        let seconds: f64 = json
            .get("format")
            .and_then(|f| f.get("duration"))
            .and_then(|d| d.as_str())
            .and_then(|d| d.parse().ok())
            .ok_or_else(|| BuildError::ClipUnreadable {
                path: path.to_path_buf(),
                message: "no duration in ffprobe output".to_string(),
            })?;

        Ok((seconds * 1000.0).round() as u64)
    }
}

/// Encoder serializing an [`AudioTrack`] to a single MP3 file.
///
/// Clips enter ffmpeg as file inputs and silences as `anullsrc` sources with
/// exact `-t` durations; the concat audio filter joins them in plan order.
/// One invocation, one output.
#[derive(Debug, Default)]
pub struct AudioEncoder;

impl AudioEncoder {
    /// Create a new encoder
    pub fn new() -> Self {
        AudioEncoder
    }

    /// Encode the track to `output`
    pub async fn encode<P: AsRef<Path>>(&self, track: &AudioTrack, output: P) -> Result<()> {
        let output = output.as_ref();

        if track.is_empty() {
            // An empty dictionary still yields a valid, zero-duration file
            let args = vec![
                "-y".to_string(),
                "-f".to_string(), "lavfi".to_string(),
                "-t".to_string(), "0".to_string(),
                "-i".to_string(), silence_source(),
                "-c:a".to_string(), "libmp3lame".to_string(),
                output.to_string_lossy().to_string(),
            ];
            return run_ffmpeg(&args, Duration::from_secs(60)).await;
        }

        let mut args: Vec<String> = vec!["-y".to_string()];
        for piece in &track.pieces {
            match piece {
                AudioPiece::Clip { path, .. } => {
                    args.push("-i".to_string());
                    args.push(path.to_string_lossy().to_string());
                }
                AudioPiece::Silence { duration_ms } => {
                    args.push("-f".to_string());
                    args.push("lavfi".to_string());
                    args.push("-t".to_string());
                    args.push(format!("{:.3}", *duration_ms as f64 / 1000.0));
                    args.push("-i".to_string());
                    args.push(silence_source());
                }
            }
        }

        // Normalize every input to the track format before concatenation;
        // the concat filter requires identical sample rates and layouts
        let mut filter = String::new();
        for i in 0..track.pieces.len() {
            filter.push_str(&format!(
                "[{i}:a]aformat=sample_rates={rate}:channel_layouts=mono[a{i}];",
                i = i,
                rate = TRACK_SAMPLE_RATE
            ));
        }
        for i in 0..track.pieces.len() {
            filter.push_str(&format!("[a{}]", i));
        }
        filter.push_str(&format!("concat=n={}:v=0:a=1[out]", track.pieces.len()));

        args.push("-filter_complex".to_string());
        args.push(filter);
        args.push("-map".to_string());
        args.push("[out]".to_string());
        args.push("-c:a".to_string());
        args.push("libmp3lame".to_string());
        args.push("-q:a".to_string());
        args.push("4".to_string());
        args.push(output.to_string_lossy().to_string());

        debug!(
            "Encoding {} pieces ({} ms) to {}",
            track.pieces.len(),
            track.duration_ms(),
            output.display()
        );

        run_ffmpeg(&args, Duration::from_secs(600)).await
    }
}

/// lavfi silence source description shared by the encoder paths
fn silence_source() -> String {
    format!(
        "anullsrc=channel_layout=mono:sample_rate={}",
        TRACK_SAMPLE_RATE
    )
}

/// Run ffmpeg with the given arguments, failing on non-zero exit or timeout
pub(crate) async fn run_ffmpeg(args: &[String], timeout: Duration) -> Result<()> {
    let ffmpeg_future = Command::new("ffmpeg").args(args).output();

    let result = tokio::select! {
        result = ffmpeg_future => {
            result.map_err(|e| anyhow!("Failed to execute ffmpeg command: {}", e))?
        },
        _ = tokio::time::sleep(timeout) => {
            return Err(anyhow!("ffmpeg command timed out after {} seconds", timeout.as_secs()));
        }
    };

    if !result.status.success() {
        let stderr = String::from_utf8_lossy(&result.stderr);
        let filtered = filter_ffmpeg_stderr(&stderr);
        error!("ffmpeg failed: {}", filtered);
        return Err(anyhow!("ffmpeg failed: {}", filtered));
    }

    Ok(())
}

/// Filter ffmpeg stderr to only show meaningful error lines, stripping the
/// version banner, build configuration, and stream metadata noise.
pub(crate) fn filter_ffmpeg_stderr(stderr: &str) -> String {
    let dominated_prefixes = [
        "ffmpeg version",
        "  built with",
        "  configuration:",
        "  lib",
        "Input #",
        "  Metadata:",
        "  Duration:",
        "  Stream #",
        "Output #",
        "Stream mapping:",
        "Press [q]",
        "size=",
    ];

    let meaningful: Vec<&str> = stderr
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return false;
            }
            !dominated_prefixes.iter().any(|p| line.starts_with(p))
        })
        .collect();

    if meaningful.is_empty() {
        "unknown ffmpeg error (stderr was empty after filtering)".to_string()
    } else {
        meaningful.join("\n")
    }
}
