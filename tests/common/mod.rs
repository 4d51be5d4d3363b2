/*!
 * Common test utilities for the vocaslider test suite
 */

use std::fs;
use std::path::{Path, PathBuf};
use anyhow::Result;
use tempfile::TempDir;

use vocaslider::dictionary::{Dictionary, TranslationVariant};

// Re-export the mock clip store module
pub mod mock_clips;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Touches an empty placeholder file, creating parent directories as needed.
/// The builder only checks asset presence, never content.
pub fn touch(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, b"")?;
    Ok(())
}

/// A sample dictionary document matching the documented JSON format
pub fn sample_dictionary_json() -> &'static str {
    r#"{
    "hello": {
        "zh-CN": [
            {"translation": "你好", "romanization": "Nǐ hǎo"}
        ],
        "hi": [
            {"translation": "नमस्ते", "romanization": "namaste"}
        ]
    },
    "thank you": {
        "zh-CN": [
            {"translation": "谢谢", "romanization": "Xièxiè"}
        ]
    }
}"#
}

/// Build a small dictionary in code: one phrase with one variant
pub fn single_phrase_dictionary(
    name: &str,
    phrase: &str,
    language: &str,
    translation: &str,
) -> Dictionary {
    let mut dictionary = Dictionary::new(name);
    let mut languages = indexmap::IndexMap::new();
    languages.insert(
        language.to_string(),
        vec![TranslationVariant::new(translation)],
    );
    dictionary.phrases.insert(phrase.to_string(), languages);
    dictionary
}
