use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::media::{Device, Selections, StreamInfo};
use crate::recording::{Clip, RecordingState};

/// Page metadata set during `prepare`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
}

/// Snapshot of the studio for status displays
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudioStatus {
    /// Current recorder state
    pub recording_state: RecordingState,

    /// Current audio/video selections
    pub selections: Selections,

    /// Live stream, if one is bound
    pub stream: Option<StreamInfo>,

    /// Number of devices in the catalog snapshot
    pub devices_count: usize,

    /// Number of clips in the archive
    pub clips_count: usize,
}

/// One entry of a device selector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceOption {
    #[serde(flatten)]
    pub device: Device,
    pub selected: bool,
}

/// One entry of the recordings list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipView {
    pub id: Uuid,

    /// When the recording finished
    pub recorded_at: DateTime<Utc>,

    /// Human readable age, e.g. "3 minutes ago"
    pub recorded_ago: String,

    pub size_bytes: usize,
    pub mime_type: String,

    /// Relative URL serving the clip as a download
    pub download_url: String,
}

impl ClipView {
    pub fn new(clip: &Clip, now: DateTime<Utc>) -> Self {
        Self {
            id: clip.id,
            recorded_at: clip.timestamp,
            recorded_ago: relative_time(clip.timestamp, now),
            size_bytes: clip.media().len(),
            mime_type: clip.media().mime_type().to_string(),
            download_url: format!("/clips/{}/download", clip.id),
        }
    }
}

/// A single recording with its media inlined
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipDetail {
    #[serde(flatten)]
    pub view: ClipView,

    /// `data:` URL usable directly as a video source
    pub data_url: String,
}

impl ClipDetail {
    pub fn new(clip: &Clip, now: DateTime<Utc>) -> Self {
        Self {
            view: ClipView::new(clip, now),
            data_url: clip.to_data_url(),
        }
    }
}

/// Humanised age of `then` relative to `now`
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = now.signed_duration_since(then).num_seconds().max(0);

    let (value, unit) = match secs {
        0 => return "just now".to_string(),
        1..=59 => (secs, "second"),
        60..=3_599 => (secs / 60, "minute"),
        3_600..=86_399 => (secs / 3_600, "hour"),
        _ => (secs / 86_400, "day"),
    };

    if value == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", value, unit)
    }
}
