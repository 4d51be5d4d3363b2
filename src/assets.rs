use std::path::{Path, PathBuf};

// @module: Deterministic asset path naming

/// Language code of the tone-marked Mandarin variant, which additionally
/// gets a breakdown audio clip
pub const MANDARIN_LANGUAGE: &str = "zh-CN";

/// Pure naming scheme mapping a (phrase, language, variant-index) triple to
/// the image/audio files the generation step is expected to have produced.
///
/// Layout:
/// - `{out_dir}/{dictionary}/images/{phrase}.png` and
///   `{out_dir}/{dictionary}/audios/{phrase}.mp3` for the English phrase
/// - `{phrase}_{language}{index}.png` / `.mp3` for each translation variant
/// - `{phrase}_{language}{index}-breakdown.mp3` for Mandarin variants
///
/// This is a naming function only; it never touches the filesystem.
#[derive(Debug, Clone)]
pub struct AssetLocator {
    /// Root output directory, usually "out"
    out_dir: PathBuf,

    /// Dictionary name, used as the per-dictionary subdirectory
    dictionary_name: String,
}

impl AssetLocator {
    /// Create a locator for the given dictionary under the given output root
    pub fn new<P: AsRef<Path>, S: Into<String>>(out_dir: P, dictionary_name: S) -> Self {
        AssetLocator {
            out_dir: out_dir.as_ref().to_path_buf(),
            dictionary_name: dictionary_name.into(),
        }
    }

    /// Directory holding all card images for this dictionary
    pub fn image_dir(&self) -> PathBuf {
        self.out_dir.join(&self.dictionary_name).join("images")
    }

    /// Directory holding all audio clips for this dictionary
    pub fn audio_dir(&self) -> PathBuf {
        self.out_dir.join(&self.dictionary_name).join("audios")
    }

    /// Image for the English phrase card
    pub fn phrase_image(&self, phrase: &str) -> PathBuf {
        self.image_dir().join(format!("{}.png", phrase))
    }

    /// Audio for the spoken English phrase
    pub fn phrase_audio(&self, phrase: &str) -> PathBuf {
        self.audio_dir().join(format!("{}.mp3", phrase))
    }

    /// Image for one translation variant card
    pub fn variant_image(&self, phrase: &str, language: &str, index: usize) -> PathBuf {
        self.image_dir()
            .join(format!("{}_{}{}.png", phrase, language, index))
    }

    /// Audio for one spoken translation variant
    pub fn variant_audio(&self, phrase: &str, language: &str, index: usize) -> PathBuf {
        self.audio_dir()
            .join(format!("{}_{}{}.mp3", phrase, language, index))
    }

    /// Breakdown narration audio for a Mandarin variant
    pub fn breakdown_audio(&self, phrase: &str, language: &str, index: usize) -> PathBuf {
        self.audio_dir()
            .join(format!("{}_{}{}-breakdown.mp3", phrase, language, index))
    }

    /// Combined audio artifact, next to the working directory root
    pub fn combined_audio(&self) -> PathBuf {
        PathBuf::from(format!("{}-audio.mp3", self.dictionary_name))
    }

    /// Timecode listing artifact
    pub fn timecode_listing(&self) -> PathBuf {
        PathBuf::from(format!("{}-timecodes.txt", self.dictionary_name))
    }

    /// Final composited video artifact
    pub fn video_output(&self) -> PathBuf {
        PathBuf::from(format!("{}.mp4", self.dictionary_name))
    }
}
