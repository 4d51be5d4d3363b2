use std::path::Path;
use std::time::Duration;
use anyhow::Result;
use log::debug;

use crate::audio::run_ffmpeg;
use crate::dictionary::TranslationVariant;
use crate::errors::RenderError;

// @module: Card image rendering via ffmpeg drawtext

/// Card canvas, 1080p
const CANVAS: &str = "color=c=black:s=1920x1080:d=5";

/// Default font, covers Latin and CJK scripts
const DEFAULT_FONT: &str = "NotoSansCJK-Regular.ttc";

/// Font for Devanagari script
const DEVANAGARI_FONT: &str = "NotoSansDevanagari-Regular.ttf";

/// Characters that cannot be escaped reliably inside a drawtext filter
const ILLEGAL_CHARS: [char; 3] = [':', '{', '\''];

/// Renders static card images, one per phrase or translation variant.
///
/// Layout: the translation centered at size 100; for variants, the language
/// code top-left at 60, the romanization 120 px below center, and the note
/// another 120 px below (200 px when a romanization precedes it).
#[derive(Debug, Clone)]
pub struct CardRenderer {
    /// Directory containing the font files
    fonts_dir: String,
}

impl CardRenderer {
    /// Create a renderer reading fonts from the given directory
    pub fn new<S: Into<String>>(fonts_dir: S) -> Self {
        CardRenderer {
            fonts_dir: fonts_dir.into(),
        }
    }

    /// Font file for a language
    fn font_for(&self, language: &str) -> &'static str {
        if language == "hi" {
            DEVANAGARI_FONT
        } else {
            DEFAULT_FONT
        }
    }

    /// Build one drawtext argument for ffmpeg
    fn drawtext(
        &self,
        text: &str,
        fontfile: &str,
        fontsize: u32,
        x: &str,
        y: &str,
    ) -> Result<String, RenderError> {
        if let Some(character) = text.chars().find(|c| ILLEGAL_CHARS.contains(c)) {
            return Err(RenderError::IllegalCharacter {
                character,
                text: text.to_string(),
            });
        }

        Ok(format!(
            "drawtext=text='{text}':fontfile={dir}/{fontfile}:fontcolor=white:fontsize={fontsize}:x={x}:y={y}",
            text = text,
            dir = self.fonts_dir,
            fontfile = fontfile,
            fontsize = fontsize,
            x = x,
            y = y,
        ))
    }

    /// Render the card for a bare English phrase
    pub async fn render_phrase(&self, phrase: &str, output: &Path) -> Result<()> {
        let fontfile = self.font_for("en");
        let drawtext = self.drawtext(phrase, fontfile, 100, "(w-text_w)/2", "(h-text_h)/2")?;
        self.run(&drawtext, output).await
    }

    /// Render the card for one translation variant
    pub async fn render_variant(
        &self,
        variant: &TranslationVariant,
        language: &str,
        output: &Path,
    ) -> Result<()> {
        let fontfile = self.font_for(language);
        let mut filters = vec![
            self.drawtext(
                &variant.translation,
                fontfile,
                100,
                "(w-text_w)/2",
                "(h-text_h)/2",
            )?,
            // Language header
            self.drawtext(language, fontfile, 60, "10", "10")?,
        ];

        // Subheadings stack below the translation; the note drops further
        // down when a romanization line already occupies the first slot
        let mut previous_subheading = false;
        if let Some(romanization) = &variant.romanization {
            filters.push(self.drawtext(
                romanization,
                fontfile,
                60,
                "(w-text_w)/2",
                "(h-text_h)/2 + 120",
            )?);
            previous_subheading = true;
        }
        if let Some(note) = &variant.note {
            let y = if previous_subheading {
                "(h-text_h)/2 + 200"
            } else {
                "(h-text_h)/2 + 120"
            };
            filters.push(self.drawtext(note, fontfile, 60, "(w-text_w)/2", y)?);
        }

        self.run(&filters.join(", "), output).await
    }

    /// Invoke ffmpeg to draw the card as a single frame
    async fn run(&self, drawtext: &str, output: &Path) -> Result<()> {
        debug!("Rendering card: {}", output.display());

        let args = vec![
            "-y".to_string(),
            "-f".to_string(), "lavfi".to_string(),
            "-i".to_string(), CANVAS.to_string(),
            "-vf".to_string(), drawtext.to_string(),
            "-t".to_string(), "5".to_string(),
            "-frames:v".to_string(), "1".to_string(),
            output.to_string_lossy().to_string(),
        ];

        run_ffmpeg(&args, Duration::from_secs(60)).await
    }
}
