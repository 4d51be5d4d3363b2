use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Root directory for generated images and audio clips
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// Directory containing the card fonts
    #[serde(default = "default_fonts_dir")]
    pub fonts_dir: String,

    /// Asset generation settings
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Settings for the parallel asset generation step
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GenerationConfig {
    /// Maximum number of concurrent render/synthesis tasks
    #[serde(default = "default_concurrent_tasks")]
    pub concurrent_tasks: usize,

    /// Speech request timeout in seconds
    #[serde(default = "default_speech_timeout_secs")]
    pub speech_timeout_secs: u64,

    /// Speech service endpoint; empty selects the default service
    #[serde(default = "String::new")]
    pub speech_endpoint: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            concurrent_tasks: default_concurrent_tasks(),
            speech_timeout_secs: default_speech_timeout_secs(),
            speech_endpoint: String::new(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_out_dir() -> String {
    "out".to_string()
}

fn default_fonts_dir() -> String {
    "assets/fonts".to_string()
}

fn default_concurrent_tasks() -> usize {
    4
}

fn default_speech_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.out_dir.trim().is_empty() {
            return Err(anyhow!("Output directory must not be empty"));
        }

        if self.generation.concurrent_tasks == 0 {
            return Err(anyhow!("Concurrent task count must be at least 1"));
        }

        if self.generation.speech_timeout_secs == 0 {
            return Err(anyhow!("Speech timeout must be at least 1 second"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            out_dir: default_out_dir(),
            fonts_dir: default_fonts_dir(),
            generation: GenerationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
