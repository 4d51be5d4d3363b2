use std::path::Path;
use std::time::Duration;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use crate::errors::SpeechError;
use crate::file_utils::FileManager;
use crate::speech::SpeechSynthesizer;

/// Default Google Translate TTS endpoint
const DEFAULT_ENDPOINT: &str = "https://translate.google.com/translate_tts";

/// Client identifier the endpoint expects for unauthenticated requests
const CLIENT_PARAM: &str = "tw-ob";

/// Speech synthesizer backed by the Google Translate TTS endpoint.
///
/// Returns MP3 clips (24 kHz mono). The endpoint caps input length, which
/// is fine here: inputs are single phrases or short breakdown narrations.
#[derive(Debug)]
pub struct GoogleSpeech {
    /// Endpoint URL
    endpoint: String,
    /// HTTP client for making requests
    client: Client,
}

impl GoogleSpeech {
    /// Create a synthesizer against the default endpoint
    pub fn new(timeout_secs: u64) -> Result<Self, SpeechError> {
        Self::with_endpoint(DEFAULT_ENDPOINT, timeout_secs)
    }

    /// Create a synthesizer against a custom endpoint
    pub fn with_endpoint(endpoint: &str, timeout_secs: u64) -> Result<Self, SpeechError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| SpeechError::RequestFailed(format!("failed to build client: {}", e)))?;

        Ok(GoogleSpeech {
            endpoint: endpoint.to_string(),
            client,
        })
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleSpeech {
    async fn synthesize(
        &self,
        text: &str,
        language: &str,
        output: &Path,
    ) -> Result<(), SpeechError> {
        debug!("Synthesizing '{}' ({}) to {}", text, language, output.display());

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("ie", "UTF-8"),
                ("client", CLIENT_PARAM),
                ("tl", language),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| SpeechError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SpeechError::ServiceError {
                status_code: status.as_u16(),
                message,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SpeechError::RequestFailed(e.to_string()))?;

        FileManager::write_bytes(output, &bytes)
            .map_err(|e| SpeechError::SaveFailed(e.to_string()))?;

        Ok(())
    }
}
