use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use uuid::Uuid;

use super::device::Device;
use super::selection::StreamConstraints;
use crate::error::CaptureResult;

/// Raw recorded media data delivered by the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub data: Vec<u8>,
}

impl Fragment {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into() }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Events pushed by a stream while it records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecorderEvent {
    /// Next fragment, in hardware order
    Data(Fragment),
    /// Flush finished; no further fragments follow
    Stopped,
}

/// Receiving end of a recording cycle
pub type RecorderFeed = mpsc::Receiver<RecorderEvent>;

/// Description of a live stream, safe to hand to observers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamInfo {
    pub id: Uuid,
    pub constraints: StreamConstraints,
    /// Devices actually opened, audio first
    pub devices: Vec<Device>,
}

/// Platform media subsystem (device enumeration + stream acquisition)
///
/// Implementations:
/// - `SimulatedPlatform`: configuration-driven in-process devices
#[async_trait::async_trait]
pub trait MediaPlatform: Send + Sync {
    /// Enumerate media devices
    ///
    /// Fails with `PermissionDenied` when media access is refused.
    async fn enumerate_devices(&self) -> CaptureResult<Vec<Device>>;

    /// Open a stream satisfying `constraints`
    async fn request_stream(
        &self,
        constraints: &StreamConstraints,
    ) -> CaptureResult<Box<dyn MediaStream>>;

    /// Platform name for logging
    fn name(&self) -> &str;
}

/// A live audio/video stream holding exclusive device handles
#[async_trait::async_trait]
pub trait MediaStream: Send + Sync {
    fn info(&self) -> &StreamInfo;

    /// Whether the stream still holds its tracks
    fn is_live(&self) -> bool;

    /// Stop all tracks and release the devices. Idempotent.
    fn stop(&mut self);

    /// Begin recording
    ///
    /// Returns the feed that receives fragments followed by `Stopped`.
    fn start_recording(&mut self, feed_capacity: usize) -> CaptureResult<RecorderFeed>;

    /// Ask the recorder to flush
    ///
    /// Returns once the final fragment and `Stopped` are queued on the feed.
    async fn stop_recording(&mut self) -> CaptureResult<()>;

    /// Recorder state as seen by the platform
    fn is_recording(&self) -> bool;
}

/// Where the live stream is shown. Fire-and-forget.
pub trait PreviewSurface: Send + Sync {
    fn bind(&self, stream: Option<&StreamInfo>);
}
