use std::fmt;
use std::path::{Path, PathBuf};
use anyhow::Result;

use crate::file_utils::FileManager;

// @module: Append-only timecode listing

/// One (timestamp, image) pair marking when an image should appear
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimecodeEntry {
    /// Timestamp in milliseconds; always a whole multiple of 1000
    pub timestamp_ms: u64,

    /// Image shown from this timestamp onward
    pub image_path: PathBuf,
}

impl TimecodeEntry {
    /// Format a millisecond timestamp as zero-padded HH:MM:SS.
    ///
    /// Milliseconds are truncated to whole seconds by integer division; the
    /// builder only ever records second-aligned timestamps, so nothing is
    /// lost. Durations of 24 hours or more widen the hours field instead of
    /// wrapping, so the listing stays unambiguous for the compositor.
    pub fn format_timestamp(ms: u64) -> String {
        let total_seconds = ms / 1_000;
        let hours = total_seconds / 3_600;
        let minutes = (total_seconds % 3_600) / 60;
        let seconds = total_seconds % 60;

        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    }

    /// Formatted timestamp for this entry
    pub fn formatted(&self) -> String {
        Self::format_timestamp(self.timestamp_ms)
    }
}

impl fmt::Display for TimecodeEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}\t{}", self.formatted(), self.image_path.display())
    }
}

/// Ordered listing of timecode entries.
///
/// Written in a single forward pass: entries are only ever appended, in
/// segment order, which is identical to the order pieces enter the audio
/// track.
#[derive(Debug, Default, Clone)]
pub struct TimecodeSheet {
    /// Entries in append order
    pub entries: Vec<TimecodeEntry>,
}

impl TimecodeSheet {
    /// Create an empty sheet
    pub fn new() -> Self {
        TimecodeSheet {
            entries: Vec::new(),
        }
    }

    /// Append one entry at the given timestamp
    pub fn append<P: AsRef<Path>>(&mut self, timestamp_ms: u64, image_path: P) {
        self.entries.push(TimecodeEntry {
            timestamp_ms,
            image_path: image_path.as_ref().to_path_buf(),
        });
    }

    /// Number of entries in the sheet
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the sheet has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize the sheet as tab-separated lines, one per entry
    pub fn to_listing(&self) -> String {
        let mut listing = String::new();
        for entry in &self.entries {
            listing.push_str(&format!(
                "{}\t{}\n",
                entry.formatted(),
                entry.image_path.display()
            ));
        }
        listing
    }

    /// Write the listing to a file
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        FileManager::write_to_file(path, &self.to_listing())
    }
}

impl fmt::Display for TimecodeSheet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_listing())
    }
}
