use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::config::StudioConfig;
use super::view::{ClipView, DeviceOption, PageMeta, StudioStatus};
use crate::capture::{CaptureSession, DeviceCatalog, PreviewSlot};
use crate::error::CaptureResult;
use crate::media::{Device, MediaKind, MediaPlatform, Selection, Selections, StreamInfo};
use crate::recording::{Clip, Recorder, RecordingArchive, RecordingState};

/// Device selection, live preview and recording for one UI session
///
/// Owns every piece of per-session state explicitly: the device catalog, the
/// capture session with its selections, the recorder and the archive.
pub struct Studio {
    catalog: DeviceCatalog,
    session: CaptureSession,
    recorder: Recorder,
    archive: RecordingArchive,
    preview: PreviewSlot,
}

impl Studio {
    pub fn new(platform: Arc<dyn MediaPlatform>, config: &StudioConfig) -> Self {
        let preview = PreviewSlot::new();
        let archive = RecordingArchive::new(config.archive_limit);

        info!(
            "Creating studio on {} platform (clips: {}, archive limit: {:?})",
            platform.name(),
            config.clip_mime_type,
            archive.limit()
        );

        Self {
            catalog: DeviceCatalog::new(Arc::clone(&platform)),
            session: CaptureSession::new(platform, Arc::new(preview.clone())),
            recorder: Recorder::new(config.recorder_config(), archive.clone()),
            archive,
            preview,
        }
    }

    /// Page metadata
    pub fn prepare(&self) -> PageMeta {
        PageMeta {
            title: "Get Short Video".to_string(),
            description: "Get a short video".to_string(),
        }
    }

    /// First enumeration and acquisition once the view is interactive
    ///
    /// Each kind starts on its first enumerated input device, or the platform
    /// default when none is listed. Failures leave the studio without a stream.
    pub async fn hydrate(&mut self) -> CaptureResult<Option<StreamInfo>> {
        info!("Hydrating studio");

        self.catalog.enumerate().await?;

        let initial = |kind: MediaKind| {
            self.catalog
                .first_input(kind)
                .map(|d| Selection::Device(d.id.clone()))
                .unwrap_or_default()
        };
        let selections = Selections::new(initial(MediaKind::Audio), initial(MediaKind::Video));

        self.recorder.interrupt().await;
        self.session.acquire(selections).await
    }

    /// Re-enumerate devices (after a permission grant or hot-plug)
    pub async fn refresh_devices(&mut self) -> CaptureResult<Vec<Device>> {
        self.catalog.enumerate().await.map(|devices| devices.to_vec())
    }

    /// Change the selection for one kind and rebuild the live stream
    ///
    /// An in-progress recording is interrupted and its data discarded. If the
    /// new stream cannot be acquired the studio is left without one; the user
    /// recovers by selecting again.
    pub async fn select(
        &mut self,
        kind: MediaKind,
        selection: Selection,
    ) -> CaptureResult<Option<StreamInfo>> {
        info!("Selecting {} device: {:?}", kind, selection);

        let mut selections = self.session.selections().clone();
        selections.set(kind, selection);

        self.recorder.interrupt().await;
        self.session.acquire(selections).await
    }

    pub async fn start_recording(&mut self) -> CaptureResult<()> {
        self.recorder.start(&mut self.session).await
    }

    /// Request the recording to stop; see `Recorder::stop`
    pub async fn stop_recording(&mut self) -> CaptureResult<bool> {
        self.recorder.stop(&mut self.session).await
    }

    /// Wait for the clip of the last stopped recording
    pub async fn finished(&mut self) -> Option<Clip> {
        self.recorder.finished().await
    }

    /// View teardown: detach listeners and release the stream
    ///
    /// Safe to call when nothing was ever acquired, and more than once.
    pub async fn terminate(&mut self) {
        info!("Terminating studio");
        self.recorder.detach().await;
        self.session.release();
    }

    pub fn catalog(&self) -> &DeviceCatalog {
        &self.catalog
    }

    pub fn session(&self) -> &CaptureSession {
        &self.session
    }

    pub fn recorder(&self) -> &Recorder {
        &self.recorder
    }

    pub fn archive(&self) -> &RecordingArchive {
        &self.archive
    }

    pub fn preview(&self) -> &PreviewSlot {
        &self.preview
    }

    pub fn recording_state(&self) -> RecordingState {
        self.recorder.state()
    }

    /// Device selector entries for `kind`, in enumeration order
    pub fn device_options(&self, kind: MediaKind) -> Vec<DeviceOption> {
        let current = self.session.selections().get(kind);

        self.catalog
            .devices_of_kind(kind.device_kind())
            .map(|device| DeviceOption {
                selected: matches!(current, Selection::Device(id) if *id == device.id),
                device: device.clone(),
            })
            .collect()
    }

    /// Recordings list, newest first
    pub async fn clip_views(&self) -> Vec<ClipView> {
        let now = Utc::now();
        self.archive
            .all()
            .await
            .iter()
            .map(|clip| ClipView::new(clip, now))
            .collect()
    }

    pub async fn status(&self) -> StudioStatus {
        StudioStatus {
            recording_state: self.recorder.state(),
            selections: self.session.selections().clone(),
            stream: self.session.stream_info().cloned(),
            devices_count: self.catalog.devices().len(),
            clips_count: self.archive.len().await,
        }
    }
}

impl Drop for Studio {
    fn drop(&mut self) {
        if self.session.is_live() {
            warn!("Studio dropped without terminate, releasing stream");
        }
    }
}
