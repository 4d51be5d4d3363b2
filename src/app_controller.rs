use anyhow::{Result, Context, anyhow};
use log::{error, warn, info, debug};
use std::path::PathBuf;
use std::sync::Arc;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::Config;
use crate::assets::{AssetLocator, MANDARIN_LANGUAGE};
use crate::audio::{AudioEncoder, MediaProbe};
use crate::compositor::VideoCompositor;
use crate::dictionary::{Dictionary, TranslationVariant};
use crate::file_utils::FileManager;
use crate::pinyin;
use crate::render::CardRenderer;
use crate::speech::{GoogleSpeech, SpeechSynthesizer};
use crate::timeline::TimelineBuilder;

// @module: Application controller for the slideshow build

/// One card's worth of generation work: its image, its spoken clip, and
/// the optional breakdown narration for Mandarin variants
#[derive(Debug, Clone)]
struct CardJob {
    /// Card text; a bare phrase or a full variant
    variant: Option<TranslationVariant>,
    /// English phrase backing this card
    phrase: String,
    /// Language spoken on this card
    language: String,
    /// Expected image path
    image: PathBuf,
    /// Expected audio path
    audio: PathBuf,
    /// Breakdown narration: (text, output path)
    breakdown: Option<(String, PathBuf)>,
}

/// Main application controller for the slideshow build
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self { config })
    }

    /// Run the full workflow: generate assets, build the timeline, export
    /// the audio and timecode artifacts, and optionally compose the video.
    pub async fn run(
        &self,
        dictionary_path: PathBuf,
        regenerate: bool,
        skip_video: bool,
    ) -> Result<()> {
        let start_time = std::time::Instant::now();

        if !dictionary_path.exists() {
            return Err(anyhow!("Dictionary file does not exist: {:?}", dictionary_path));
        }

        // Load and validate before any asset work begins
        let dictionary = Dictionary::load(&dictionary_path)?;
        dictionary.validate().context("Dictionary validation failed")?;

        let locator = AssetLocator::new(&self.config.out_dir, &dictionary.name);
        FileManager::ensure_dir(locator.image_dir())?;
        FileManager::ensure_dir(locator.audio_dir())?;

        // Phase 1: fan out image rendering and speech synthesis. Everything
        // must be durably on disk before the sequential build starts.
        let jobs = self.collect_jobs(&dictionary, &locator, regenerate);
        info!(
            "📖 {}: {} cards, {} to generate",
            dictionary.name,
            dictionary.card_count(),
            jobs.len()
        );
        self.generate_assets(jobs).await?;

        // Phase 2: the strictly sequential timeline pass
        let probe = MediaProbe::new();
        let builder = TimelineBuilder::new(&locator, &probe);
        let timeline = builder.build(&dictionary).await?;

        info!(
            "Timeline: {} segments, {} total",
            timeline.timecodes.len(),
            crate::timecode::TimecodeEntry::format_timestamp(timeline.total_ms)
        );

        // Phase 3: export both artifacts, audio first
        let audio_path = locator.combined_audio();
        AudioEncoder::new()
            .encode(&timeline.track, &audio_path)
            .await
            .context("Failed to encode combined audio")?;
        info!("Audio written to {}", audio_path.display());

        let timecode_path = locator.timecode_listing();
        timeline.timecodes.write_to(&timecode_path)?;
        info!("Timecodes written to {}", timecode_path.display());

        if skip_video {
            debug!("Skipping video compositing");
        } else if timeline.timecodes.is_empty() {
            warn!("No segments to compose; skipping video");
        } else {
            VideoCompositor::new()
                .compose(
                    &timeline.timecodes,
                    timeline.total_ms,
                    &audio_path,
                    &locator.video_output(),
                )
                .await?;
        }

        info!(
            "Completed in {}",
            Self::format_duration(start_time.elapsed())
        );

        Ok(())
    }

    /// Enumerate the cards still needing assets, in dictionary order.
    ///
    /// Existing files are reused unless `regenerate` is set; presence of the
    /// image alone is not enough, each expected file is checked on its own.
    fn collect_jobs(
        &self,
        dictionary: &Dictionary,
        locator: &AssetLocator,
        regenerate: bool,
    ) -> Vec<CardJob> {
        let mut jobs = Vec::new();

        for (phrase, languages) in &dictionary.phrases {
            jobs.push(CardJob {
                variant: None,
                phrase: phrase.clone(),
                language: "en".to_string(),
                image: locator.phrase_image(phrase),
                audio: locator.phrase_audio(phrase),
                breakdown: None,
            });

            for (language, variants) in languages {
                for (index, variant) in variants.iter().enumerate() {
                    let breakdown = if language == MANDARIN_LANGUAGE {
                        variant.romanization.as_ref().map(|romanization| {
                            let syllables = pinyin::decompose(romanization);
                            (
                                pinyin::speech_text(&syllables),
                                locator.breakdown_audio(phrase, language, index),
                            )
                        })
                    } else {
                        None
                    };

                    jobs.push(CardJob {
                        variant: Some(variant.clone()),
                        phrase: phrase.clone(),
                        language: language.clone(),
                        image: locator.variant_image(phrase, language, index),
                        audio: locator.variant_audio(phrase, language, index),
                        breakdown,
                    });
                }
            }
        }

        if regenerate {
            return jobs;
        }

        // Keep a job when any of its expected files is still missing
        jobs.into_iter()
            .filter(|job| {
                !FileManager::file_exists(&job.image)
                    || !FileManager::file_exists(&job.audio)
                    || job
                        .breakdown
                        .as_ref()
                        .is_some_and(|(_, path)| !FileManager::file_exists(path))
            })
            .collect()
    }

    /// Process the generation jobs with bounded concurrency and a progress bar
    async fn generate_assets(&self, jobs: Vec<CardJob>) -> Result<()> {
        if jobs.is_empty() {
            info!("All assets already generated (use -r to regenerate)");
            return Ok(());
        }

        let renderer = Arc::new(CardRenderer::new(self.config.fonts_dir.clone()));
        let synthesizer = self.build_synthesizer()?;

        let progress_bar = ProgressBar::new(jobs.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} cards ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar.set_message("Generating cards");

        let concurrent = self.config.generation.concurrent_tasks;
        let results: Vec<Result<()>> = stream::iter(jobs.into_iter())
            .map(|job| {
                let renderer = Arc::clone(&renderer);
                let synthesizer = Arc::clone(&synthesizer);
                let pb = progress_bar.clone();

                async move {
                    let result = Self::generate_card(&renderer, synthesizer.as_ref(), &job).await;
                    pb.inc(1);
                    if let Err(e) = &result {
                        error!("Failed to generate card for '{}': {}", job.phrase, e);
                    }
                    result
                }
            })
            .buffer_unordered(concurrent)
            .collect()
            .await;

        progress_bar.finish_and_clear();

        let failures = results.iter().filter(|r| r.is_err()).count();
        if failures > 0 {
            return Err(anyhow!("{} card(s) failed to generate", failures));
        }

        Ok(())
    }

    /// Generate the image and audio (and breakdown narration) for one card
    async fn generate_card(
        renderer: &CardRenderer,
        synthesizer: &dyn SpeechSynthesizer,
        job: &CardJob,
    ) -> Result<()> {
        match &job.variant {
            Some(variant) => {
                renderer
                    .render_variant(variant, &job.language, &job.image)
                    .await?;
                synthesizer
                    .synthesize(&variant.translation, &job.language, &job.audio)
                    .await?;
            }
            None => {
                renderer.render_phrase(&job.phrase, &job.image).await?;
                synthesizer
                    .synthesize(&job.phrase, &job.language, &job.audio)
                    .await?;
            }
        }

        // The breakdown narration spells out letters and tones in English
        if let Some((text, path)) = &job.breakdown {
            synthesizer.synthesize(text, "en", path).await?;
        }

        Ok(())
    }

    /// Build the configured speech synthesizer
    fn build_synthesizer(&self) -> Result<Arc<dyn SpeechSynthesizer>> {
        let timeout = self.config.generation.speech_timeout_secs;
        let endpoint = &self.config.generation.speech_endpoint;

        let synthesizer = if endpoint.is_empty() {
            GoogleSpeech::new(timeout)?
        } else {
            GoogleSpeech::with_endpoint(endpoint, timeout)?
        };

        Ok(Arc::new(synthesizer))
    }

    // Format duration in a human-readable format
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
