/*!
 * Mock speech synthesizer for testing.
 *
 * Simulates different behaviors:
 * - `MockSpeech::working()` - writes a placeholder clip and records the call
 * - `MockSpeech::failing()` - always fails with a service error
 */

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use async_trait::async_trait;

use crate::errors::SpeechError;
use crate::file_utils::FileManager;
use crate::speech::SpeechSynthesizer;

/// One recorded synthesis call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpokenClip {
    /// Text that was requested
    pub text: String,
    /// Language it was spoken in
    pub language: String,
    /// Where the clip was written
    pub output: PathBuf,
}

/// Behavior mode for the mock synthesizer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Writes placeholder bytes and succeeds
    Working,
    /// Always fails with a service error
    Failing,
}

/// Mock synthesizer recording every request it receives
#[derive(Debug)]
pub struct MockSpeech {
    /// Behavior mode
    behavior: MockBehavior,
    /// Calls in arrival order
    calls: Mutex<Vec<SpokenClip>>,
}

impl MockSpeech {
    /// Create a mock with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Create a working mock that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock that always fails
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Snapshot of the recorded calls
    pub fn calls(&self) -> Vec<SpokenClip> {
        self.calls.lock().expect("mock lock poisoned").clone()
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSpeech {
    async fn synthesize(
        &self,
        text: &str,
        language: &str,
        output: &Path,
    ) -> Result<(), SpeechError> {
        match self.behavior {
            MockBehavior::Working => {
                FileManager::write_bytes(output, b"mock-mp3")
                    .map_err(|e| SpeechError::SaveFailed(e.to_string()))?;

                let mut calls = self.calls.lock().expect("mock lock poisoned");
                calls.push(SpokenClip {
                    text: text.to_string(),
                    language: language.to_string(),
                    output: output.to_path_buf(),
                });
                Ok(())
            }
            MockBehavior::Failing => Err(SpeechError::ServiceError {
                status_code: 503,
                message: "mock synthesizer configured to fail".to_string(),
            }),
        }
    }
}
