use std::sync::Arc;

use tracing::{info, warn};

use crate::error::CaptureResult;
use crate::media::{MediaPlatform, MediaStream, PreviewSurface, Selections, StreamInfo};

/// Owner of the single live capture stream
///
/// The stream always matches `selections`. Any previous stream is released
/// before a replacement is requested, so device handles never overlap.
pub struct CaptureSession {
    platform: Arc<dyn MediaPlatform>,
    preview: Arc<dyn PreviewSurface>,
    selections: Selections,
    stream: Option<Box<dyn MediaStream>>,
}

impl CaptureSession {
    pub fn new(platform: Arc<dyn MediaPlatform>, preview: Arc<dyn PreviewSurface>) -> Self {
        Self {
            platform,
            preview,
            selections: Selections::default(),
            stream: None,
        }
    }

    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    pub fn stream(&self) -> Option<&dyn MediaStream> {
        self.stream.as_deref()
    }

    pub fn stream_mut(&mut self) -> Option<&mut (dyn MediaStream + 'static)> {
        self.stream.as_deref_mut()
    }

    pub fn stream_info(&self) -> Option<&StreamInfo> {
        self.stream.as_deref().map(|s| s.info())
    }

    pub fn is_live(&self) -> bool {
        self.stream.as_deref().is_some_and(|s| s.is_live())
    }

    /// Replace the live stream with one matching `selections`
    ///
    /// Disabled tracks are left out of the request. With both tracks disabled
    /// nothing is requested and `Ok(None)` is returned. On failure the session
    /// is left without a stream and the preview stays blank.
    pub async fn acquire(&mut self, selections: Selections) -> CaptureResult<Option<StreamInfo>> {
        self.release();
        self.selections = selections;

        let Some(constraints) = self.selections.constraints() else {
            info!("Audio and video both disabled, not requesting a stream");
            return Ok(None);
        };

        info!(
            "Requesting stream (audio={:?}, video={:?})",
            constraints.audio, constraints.video
        );

        let stream = match self.platform.request_stream(&constraints).await {
            Ok(stream) => stream,
            Err(e) => {
                warn!("Stream acquisition failed: {}", e);
                return Err(e);
            }
        };

        let info = stream.info().clone();
        self.preview.bind(Some(&info));
        self.stream = Some(stream);

        info!(
            "Capture stream {} live with {} tracks",
            info.id,
            info.devices.len()
        );

        Ok(Some(info))
    }

    /// Re-acquire with the current selections
    pub async fn reacquire(&mut self) -> CaptureResult<Option<StreamInfo>> {
        let selections = self.selections.clone();
        self.acquire(selections).await
    }

    /// Stop all tracks of the live stream. Idempotent.
    pub fn release(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            let id = stream.info().id;
            stream.stop();
            self.preview.bind(None);
            info!("Released capture stream {}", id);
        }
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        self.release();
    }
}
