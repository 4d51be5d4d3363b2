/*!
 * Mock clip store for testing the timeline builder.
 *
 * Durations are keyed by path; asking for an unregistered path fails with
 * `MissingAsset`, matching how the production probe treats absent files.
 */

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use async_trait::async_trait;

use vocaslider::audio::ClipStore;
use vocaslider::errors::BuildError;

/// Clip store backed by an in-memory duration table
#[derive(Debug, Default)]
pub struct MockClipStore {
    durations: HashMap<PathBuf, u64>,
}

impl MockClipStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a clip with the given duration
    pub fn insert<P: AsRef<Path>>(&mut self, path: P, duration_ms: u64) {
        self.durations
            .insert(path.as_ref().to_path_buf(), duration_ms);
    }
}

#[async_trait]
impl ClipStore for MockClipStore {
    async fn duration_ms(&self, path: &Path) -> Result<u64, BuildError> {
        self.durations
            .get(path)
            .copied()
            .ok_or_else(|| BuildError::MissingAsset(path.to_path_buf()))
    }
}
