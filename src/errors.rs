/*!
 * Error types for the vocaslider application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building the timeline
#[derive(Error, Debug)]
pub enum BuildError {
    /// An expected image or audio file is absent at build time.
    /// Fatal: a single missing clip desynchronizes every timestamp after it.
    #[error("Missing asset: {}", .0.display())]
    MissingAsset(PathBuf),

    /// The dictionary document is malformed or empty.
    /// Detected by the calling layer before the builder starts.
    #[error("Invalid dictionary: {0}")]
    InvalidDictionary(String),

    /// A clip exists but its duration could not be determined
    #[error("Failed to read audio clip {path}: {message}")]
    ClipUnreadable {
        /// Path of the clip that failed to probe
        path: PathBuf,
        /// Probe failure detail
        message: String,
    },
}

/// Errors that can occur when rendering card images
#[derive(Error, Debug)]
pub enum RenderError {
    /// Text contains a character that cannot be placed in a drawtext filter
    #[error("Illegal character '{character}' in text: {text}")]
    IllegalCharacter {
        /// The offending character
        character: char,
        /// The text it was found in
        text: String,
    },

    /// The external renderer exited with a failure
    #[error("Renderer failed: {0}")]
    RendererFailed(String),
}

/// Errors that can occur during speech synthesis
#[derive(Error, Debug)]
pub enum SpeechError {
    /// Error when making the synthesis request fails
    #[error("Speech request failed: {0}")]
    RequestFailed(String),

    /// Error returned by the speech service itself
    #[error("Speech service responded with error: {status_code} - {message}")]
    ServiceError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the service
        message: String,
    },

    /// Error writing the synthesized audio to disk
    #[error("Failed to save synthesized audio: {0}")]
    SaveFailed(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the timeline build
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// Error from card rendering
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Error from speech synthesis
    #[error("Speech error: {0}")]
    Speech(#[from] SpeechError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
