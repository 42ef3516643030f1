use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::archive::RecordingArchive;
use super::buffer::ChunkBuffer;
use super::clip::{Clip, MediaBlob};
use crate::capture::CaptureSession;
use crate::error::{CaptureError, CaptureResult};
use crate::media::{RecorderEvent, RecorderFeed};

/// Recorder state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordingState {
    #[default]
    Idle,
    Recording,
}

/// Settings for the recorder
#[derive(Debug, Clone)]
pub struct RecorderConfig {
    /// MIME type stamped on finished clips
    pub mime_type: String,
    /// Capacity of the fragment feed channel
    pub feed_capacity: usize,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            mime_type: "video/webm".to_string(),
            feed_capacity: 100,
        }
    }
}

/// Listener task for one recording cycle
///
/// Dropping the subscription detaches the listener.
struct Subscription {
    handle: JoinHandle<Option<Clip>>,
}

impl Subscription {
    /// Wait for the cycle's completion event
    async fn finish(mut self) -> Option<Clip> {
        match (&mut self.handle).await {
            Ok(clip) => clip,
            Err(e) if e.is_cancelled() => None,
            Err(e) => {
                error!("Recorder listener task panicked: {}", e);
                None
            }
        }
    }

    /// Abort the listener and wait until it has stopped running
    async fn cancel(mut self) {
        self.handle.abort();
        if let Err(e) = (&mut self.handle).await {
            if !e.is_cancelled() {
                error!("Recorder listener task panicked: {}", e);
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Records the live stream of a `CaptureSession` into clips
///
/// Fragments are buffered while recording. When the stream reports the flush
/// as complete, the buffer is assembled into a `Clip` and prepended to the
/// archive.
pub struct Recorder {
    config: RecorderConfig,
    state: RecordingState,
    buffer: Arc<Mutex<ChunkBuffer>>,
    archive: RecordingArchive,
    subscription: Option<Subscription>,
}

impl Recorder {
    pub fn new(config: RecorderConfig, archive: RecordingArchive) -> Self {
        Self {
            config,
            state: RecordingState::Idle,
            buffer: Arc::new(Mutex::new(ChunkBuffer::new())),
            archive,
            subscription: None,
        }
    }

    pub fn state(&self) -> RecordingState {
        self.state
    }

    pub fn is_recording(&self) -> bool {
        self.state == RecordingState::Recording
    }

    pub fn archive(&self) -> &RecordingArchive {
        &self.archive
    }

    /// Fragments buffered for the current cycle
    pub async fn buffered_fragments(&self) -> usize {
        self.buffer.lock().await.len()
    }

    /// Start a recording cycle on the session's live stream
    ///
    /// Any completion still pending from the previous cycle is awaited first,
    /// then the buffer is cleared.
    pub async fn start(&mut self, session: &mut CaptureSession) -> CaptureResult<()> {
        if self.is_recording() {
            return Err(CaptureError::AlreadyRecording);
        }

        let stream = session
            .stream_mut()
            .filter(|s| s.is_live())
            .ok_or(CaptureError::NoActiveStream)?;

        if let Some(previous) = self.subscription.take() {
            debug!("Waiting for previous recording to complete");
            previous.finish().await;
        }

        self.buffer.lock().await.clear();

        let feed = stream.start_recording(self.config.feed_capacity)?;
        let stream_id = stream.info().id;

        let handle = tokio::spawn(collect_fragments(
            feed,
            Arc::clone(&self.buffer),
            self.archive.clone(),
            self.config.mime_type.clone(),
        ));

        self.subscription = Some(Subscription { handle });
        self.state = RecordingState::Recording;

        info!("Recording started on stream {}", stream_id);

        Ok(())
    }

    /// Ask the stream to flush and finish the cycle
    ///
    /// Returns as soon as the flush is requested; the clip is produced later
    /// by the completion event (see `finished`). Stopping while the stream is
    /// not recording is a no-op and returns `false`.
    pub async fn stop(&mut self, session: &mut CaptureSession) -> CaptureResult<bool> {
        let Some(stream) = session.stream_mut().filter(|s| s.is_recording()) else {
            debug!("Stop requested with no active recording");
            self.state = RecordingState::Idle;
            return Ok(false);
        };

        stream.stop_recording().await?;
        self.state = RecordingState::Idle;

        info!("Recording stop requested on stream {}", stream.info().id);

        Ok(true)
    }

    /// Wait for the completion of the last stopped cycle
    ///
    /// Returns the clip it produced, or `None` when the cycle produced no data,
    /// was interrupted, or nothing is pending. Returns `None` immediately while
    /// still recording.
    pub async fn finished(&mut self) -> Option<Clip> {
        if self.is_recording() {
            return None;
        }

        self.subscription.take()?.finish().await
    }

    /// Forced stop ahead of a stream replacement
    ///
    /// An in-progress cycle is cut short: its listener is detached and the
    /// buffered fragments are discarded, so no clip is emitted. A cycle whose
    /// stop was already requested is left to complete.
    pub async fn interrupt(&mut self) {
        if !self.is_recording() {
            return;
        }

        // Wait for the listener so it cannot touch the buffer after the clear
        if let Some(subscription) = self.subscription.take() {
            subscription.cancel().await;
        }
        let discarded = {
            let mut buffer = self.buffer.lock().await;
            let count = buffer.len();
            buffer.clear();
            count
        };
        self.state = RecordingState::Idle;

        warn!(
            "Recording interrupted by device change, discarded {} fragments",
            discarded
        );
    }

    /// Detach every listener and drop buffered data
    ///
    /// A cycle whose stop was requested but whose completion event has not
    /// been processed yet is dropped too, without producing a clip.
    pub async fn detach(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.cancel().await;
            debug!("Recorder listener detached");
        }
        self.buffer.lock().await.clear();
        self.state = RecordingState::Idle;
    }
}

/// Listener for one cycle: buffers fragments, assembles the clip on `Stopped`
async fn collect_fragments(
    mut feed: RecorderFeed,
    buffer: Arc<Mutex<ChunkBuffer>>,
    archive: RecordingArchive,
    mime_type: String,
) -> Option<Clip> {
    while let Some(event) = feed.recv().await {
        match event {
            RecorderEvent::Data(fragment) => {
                buffer.lock().await.push(fragment);
            }
            RecorderEvent::Stopped => {
                let fragments = buffer.lock().await.take();
                if fragments.is_empty() {
                    info!("Recording stopped without data, no clip produced");
                    return None;
                }

                let fragment_count = fragments.len();
                let clip = Clip::new(MediaBlob::from_fragments(fragments, &mime_type));
                archive.add(clip.clone()).await;

                info!(
                    "Clip {} archived ({} fragments, {} bytes)",
                    clip.id,
                    fragment_count,
                    clip.media().len()
                );

                return Some(clip);
            }
        }
    }

    debug!("Recorder feed closed before stop event");
    None
}
