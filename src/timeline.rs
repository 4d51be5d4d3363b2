use std::path::Path;
use log::{debug, warn};

use crate::assets::{AssetLocator, MANDARIN_LANGUAGE};
use crate::audio::{AudioSink, AudioTrack, ClipStore};
use crate::dictionary::Dictionary;
use crate::errors::BuildError;
use crate::timecode::TimecodeSheet;

// @module: Timeline synchronization engine

/// Silence appended after every spoken clip
pub const CLIP_GAP_MS: u64 = 2_000;

/// How many times each translation variant is played
pub const VARIANT_REPEATS: usize = 2;

/// The finished timeline: one continuous audio plan and its parallel
/// timecode listing, sharing one index space.
#[derive(Debug, Default)]
pub struct Timeline {
    /// Ordered audio plan
    pub track: AudioTrack,

    /// Ordered timecode listing
    pub timecodes: TimecodeSheet,

    /// Final cumulative elapsed time; equals the track's total duration
    pub total_ms: u64,
}

/// Explicit build state threaded through every step.
///
/// The cumulative counter is monotonically non-decreasing over the whole
/// build and never resets; both sinks are owned here and mutated only by
/// the single sequential pass.
struct TimelineState {
    track: AudioTrack,
    timecodes: TimecodeSheet,
    cumulative_ms: u64,
}

impl TimelineState {
    fn new() -> Self {
        TimelineState {
            track: AudioTrack::new(),
            timecodes: TimecodeSheet::new(),
            cumulative_ms: 0,
        }
    }

    /// Record a timecode entry for `image` at the current cumulative time
    fn mark(&mut self, image: &Path) {
        self.timecodes.append(self.cumulative_ms, image);
    }

    /// Append a clip followed by the standard gap of silence
    fn push_clip_with_gap(&mut self, path: &Path, duration_ms: u64) {
        self.track.append_clip(path, duration_ms);
        self.track.append_silence(CLIP_GAP_MS);
        self.cumulative_ms += duration_ms + CLIP_GAP_MS;
    }

    /// Pad with silence up to the next whole second.
    ///
    /// Always rounds forward, never stays: an exact multiple of 1000 is
    /// pushed one full second further. Timecodes only carry whole seconds,
    /// so the next visual must start on a boundary strictly after the
    /// audio that precedes it.
    fn pad_to_next_second(&mut self) {
        let boundary = (self.cumulative_ms / 1_000 + 1) * 1_000;
        let needed = boundary - self.cumulative_ms;
        self.track.append_silence(needed);
        self.cumulative_ms += needed;
    }
}

/// Builds the timeline from a dictionary and a clip store.
///
/// Strictly sequential by design: segment order defines video/audio sync,
/// and every step depends on the cumulative time left by the previous one.
/// All assets must already be durably on disk; a missing file aborts the
/// build immediately with no partial output.
pub struct TimelineBuilder<'a, S: ClipStore> {
    locator: &'a AssetLocator,
    clips: &'a S,
}

impl<'a, S: ClipStore> TimelineBuilder<'a, S> {
    /// Create a builder over the given naming scheme and clip store
    pub fn new(locator: &'a AssetLocator, clips: &'a S) -> Self {
        TimelineBuilder { locator, clips }
    }

    /// Build the timeline for the whole dictionary, in declared order.
    ///
    /// An empty dictionary produces empty outputs; emptiness validation
    /// belongs to the caller.
    pub async fn build(&self, dictionary: &Dictionary) -> Result<Timeline, BuildError> {
        let mut state = TimelineState::new();

        if dictionary.phrases.is_empty() {
            warn!("Dictionary '{}' has no phrases; producing empty outputs", dictionary.name);
        }

        for (phrase, languages) in &dictionary.phrases {
            self.schedule_phrase(&mut state, phrase).await?;

            for (language, variants) in languages {
                for (index, _variant) in variants.iter().enumerate() {
                    self.schedule_variant(&mut state, phrase, language, index)
                        .await?;
                }
            }
        }

        debug!(
            "Timeline built: {} segments, {} ms total",
            state.timecodes.len(),
            state.cumulative_ms
        );

        Ok(Timeline {
            total_ms: state.cumulative_ms,
            track: state.track,
            timecodes: state.timecodes,
        })
    }

    /// Schedule the English phrase card: timecode entry, clip, gap, padding
    async fn schedule_phrase(
        &self,
        state: &mut TimelineState,
        phrase: &str,
    ) -> Result<(), BuildError> {
        let image = self.locator.phrase_image(phrase);
        let audio = self.locator.phrase_audio(phrase);
        require_present(&image)?;

        state.mark(&image);

        let duration = self.clips.duration_ms(&audio).await?;
        state.push_clip_with_gap(&audio, duration);
        state.pad_to_next_second();

        Ok(())
    }

    /// Schedule one translation variant card.
    ///
    /// The variant clip plays twice, each repetition followed by its own
    /// gap; Mandarin variants additionally get their breakdown clip.
    async fn schedule_variant(
        &self,
        state: &mut TimelineState,
        phrase: &str,
        language: &str,
        index: usize,
    ) -> Result<(), BuildError> {
        let image = self.locator.variant_image(phrase, language, index);
        let audio = self.locator.variant_audio(phrase, language, index);
        require_present(&image)?;

        state.mark(&image);

        for _ in 0..VARIANT_REPEATS {
            let duration = self.clips.duration_ms(&audio).await?;
            state.push_clip_with_gap(&audio, duration);
        }

        if language == MANDARIN_LANGUAGE {
            let breakdown = self.locator.breakdown_audio(phrase, language, index);
            let duration = self.clips.duration_ms(&breakdown).await?;
            state.push_clip_with_gap(&breakdown, duration);
        }

        state.pad_to_next_second();

        Ok(())
    }
}

/// Presence check for image assets. Content is never validated, only
/// existence; the clip store performs the equivalent check for audio.
fn require_present(path: &Path) -> Result<(), BuildError> {
    if !path.is_file() {
        return Err(BuildError::MissingAsset(path.to_path_buf()));
    }
    Ok(())
}
