use serde::{Deserialize, Serialize};

use crate::recording::RecorderConfig;

/// Configuration for a capture studio
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    /// MIME type of finished clips
    /// Default: "video/webm"
    pub clip_mime_type: String,

    /// Maximum number of clips kept in the archive (oldest evicted first)
    /// Default: unbounded
    pub archive_limit: Option<usize>,

    /// Capacity of the fragment feed between stream and recorder
    pub feed_capacity: usize,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            clip_mime_type: "video/webm".to_string(),
            archive_limit: None,
            feed_capacity: 100,
        }
    }
}

impl StudioConfig {
    pub fn recorder_config(&self) -> RecorderConfig {
        RecorderConfig {
            mime_type: self.clip_mime_type.clone(),
            feed_capacity: self.feed_capacity,
        }
    }
}
