use std::collections::HashMap;
use once_cell::sync::Lazy;

// @module: Pinyin tone decomposition

// @const: Diacritic to tone lookup table
static TONE_MAP: Lazy<HashMap<char, u8>> = Lazy::new(|| {
    HashMap::from([
        ('ā', 1), ('á', 2), ('ǎ', 3), ('à', 4),
        ('ē', 1), ('é', 2), ('ě', 3), ('è', 4),
        ('ī', 1), ('í', 2), ('ǐ', 3), ('ì', 4),
        ('ō', 1), ('ó', 2), ('ǒ', 3), ('ò', 4),
        ('ū', 1), ('ú', 2), ('ǔ', 3), ('ù', 4),
        ('ǖ', 1), ('ǘ', 2), ('ǚ', 3), ('ǜ', 4),
    ])
});

/// One syllable of a romanized Mandarin phrase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Syllable {
    /// The syllable's characters joined for display, e.g. "n, ǐ"
    pub letters: String,

    /// Tone 1-4, or None for syllables without a tone-bearing diacritic
    /// (neutral tone). An unresolved tone is a data condition, not an error.
    pub tone: Option<u8>,
}

/// Determine a syllable's tone from its diacritic.
///
/// Characters are scanned in order and the first table match wins. This is
/// deliberate: scanning for the canonical tone-bearing vowel instead would
/// change observable behavior on ambiguous syllables.
pub fn tone_of(syllable: &str) -> Option<u8> {
    syllable.chars().find_map(|c| TONE_MAP.get(&c).copied())
}

/// Break a romanized phrase into its per-syllable letters and tones.
///
/// Syllables are the whitespace-separated words of the phrase, in order.
pub fn decompose(phrase: &str) -> Vec<Syllable> {
    phrase
        .split_whitespace()
        .map(|word| Syllable {
            letters: word
                .chars()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(", "),
            tone: tone_of(word),
        })
        .collect()
}

/// Render a breakdown to the narration text handed to speech synthesis.
///
/// Tones 1-4 read as "tone N"; a syllable without a diacritic reads as
/// "neutral tone" rather than inventing a tone number.
pub fn speech_text(breakdown: &[Syllable]) -> String {
    let mut text = String::new();
    for syllable in breakdown {
        match syllable.tone {
            Some(tone) => text.push_str(&format!("{}, tone {}.", syllable.letters, tone)),
            None => text.push_str(&format!("{}, neutral tone.", syllable.letters)),
        }
    }
    text
}
