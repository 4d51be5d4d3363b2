/*!
 * Speech synthesis backends.
 *
 * This module contains client implementations for text-to-speech services:
 * - Google: the Google Translate TTS endpoint
 * - Mock: a deterministic in-memory synthesizer for tests
 */

use std::fmt::Debug;
use std::path::Path;
use async_trait::async_trait;

use crate::errors::SpeechError;

/// Common trait for all speech synthesizers.
///
/// A synthesizer turns a text, in a given language, into an audio clip on
/// disk. Implementations are interchangeable behind this seam so the asset
/// generation step never cares which service produced a clip.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync + Debug {
    /// Synthesize `text` spoken in `language` and save it to `output`
    async fn synthesize(&self, text: &str, language: &str, output: &Path)
        -> Result<(), SpeechError>;
}

pub mod google;
pub mod mock;

pub use google::GoogleSpeech;
pub use mock::MockSpeech;
