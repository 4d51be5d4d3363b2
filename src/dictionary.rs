use std::path::Path;
use anyhow::{Result, Context};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::BuildError;
use crate::file_utils::FileManager;

// @module: Ordered in-memory view of the phrase dictionary

/// One translation of an English phrase into a given language
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranslationVariant {
    // @field: Translated text
    pub translation: String,

    // @field: Romanized form, when the script needs one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub romanization: Option<String>,

    // @field: Free-form usage note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl TranslationVariant {
    /// Create a variant with just a translation - used by tests and external consumers
    #[allow(dead_code)]
    pub fn new<S: Into<String>>(translation: S) -> Self {
        TranslationVariant {
            translation: translation.into(),
            romanization: None,
            note: None,
        }
    }
}

/// Translations of one English phrase, keyed by language code, in declared order
pub type PhraseTranslations = IndexMap<String, Vec<TranslationVariant>>;

/// The full dictionary document.
///
/// Key order is significant: it defines video order and is preserved exactly
/// as declared in the source JSON. IndexMap keeps insertion order through
/// serde deserialization, so no sorting or normalization ever happens.
#[derive(Debug, Clone)]
pub struct Dictionary {
    /// Dictionary name, derived from the source file stem
    pub name: String,

    /// English phrases mapped to their per-language translations
    pub phrases: IndexMap<String, PhraseTranslations>,
}

impl Dictionary {
    /// Create an empty dictionary with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Dictionary {
            name: name.into(),
            phrases: IndexMap::new(),
        }
    }

    /// Load a dictionary from a JSON file.
    ///
    /// The dictionary name is the file name without its extension, matching
    /// the naming used for every generated artifact.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| "dictionary".to_string());

        let content = FileManager::read_to_string(path)?;
        let phrases: IndexMap<String, PhraseTranslations> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse dictionary file: {}", path.display()))?;

        Ok(Dictionary { name, phrases })
    }

    /// Validate that the document is usable as a build input.
    ///
    /// Emptiness is checked here, in the calling layer, not inside the
    /// builder: the builder itself produces empty outputs for an empty
    /// dictionary.
    pub fn validate(&self) -> Result<(), BuildError> {
        if self.phrases.is_empty() {
            return Err(BuildError::InvalidDictionary(
                "dictionary contains no phrases".to_string(),
            ));
        }

        for (phrase, languages) in &self.phrases {
            if phrase.trim().is_empty() {
                return Err(BuildError::InvalidDictionary(
                    "dictionary contains an empty phrase key".to_string(),
                ));
            }
            for (language, variants) in languages {
                if variants.is_empty() {
                    return Err(BuildError::InvalidDictionary(format!(
                        "phrase '{}' has no variants for language '{}'",
                        phrase, language
                    )));
                }
                // Mandarin variants need a romanization to synthesize the
                // breakdown clip the timeline will schedule
                if language == crate::assets::MANDARIN_LANGUAGE {
                    for (index, variant) in variants.iter().enumerate() {
                        if variant.romanization.is_none() {
                            return Err(BuildError::InvalidDictionary(format!(
                                "Mandarin variant {} of '{}' has no romanization",
                                index, phrase
                            )));
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Total number of cards the dictionary produces: one per English phrase
    /// plus one per translation variant
    pub fn card_count(&self) -> usize {
        self.phrases
            .values()
            .map(|languages| 1 + languages.values().map(|v| v.len()).sum::<usize>())
            .sum()
    }
}
