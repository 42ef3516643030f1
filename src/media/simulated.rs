// Configuration-driven media platform: devices come from config, recording
// produces synthetic fragments or fragments injected by the caller.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::device::{Device, DeviceId, MediaKind};
use super::platform::{
    Fragment, MediaPlatform, MediaStream, RecorderEvent, RecorderFeed, StreamInfo,
};
use super::selection::{StreamConstraints, TrackConstraint};
use crate::error::{CaptureError, CaptureResult};

/// Settings for the simulated platform
#[derive(Debug, Clone)]
pub struct SimulatedPlatformConfig {
    /// Whether media access is granted
    pub permission_granted: bool,
    /// Interval between synthetic fragments (None = injected fragments only)
    pub fragment_interval: Option<Duration>,
    /// Size of each synthetic fragment in bytes
    pub fragment_size: usize,
    /// Devices reported by enumeration
    pub devices: Vec<Device>,
}

impl Default for SimulatedPlatformConfig {
    fn default() -> Self {
        Self {
            permission_granted: true,
            fragment_interval: None,
            fragment_size: 1024,
            devices: Vec::new(),
        }
    }
}

#[derive(Debug, Default)]
struct PlatformState {
    permission_granted: bool,
    devices: Vec<Device>,
    held: HashSet<DeviceId>,
    live_streams: usize,
    peak_live_streams: usize,
    requests: Vec<StreamConstraints>,
    recording_feed: Option<mpsc::Sender<RecorderEvent>>,
}

/// In-process media platform
///
/// Devices are exclusive: a device held by a live stream cannot be opened
/// again until that stream is stopped.
#[derive(Clone)]
pub struct SimulatedPlatform {
    shared: Arc<Mutex<PlatformState>>,
    fragment_interval: Option<Duration>,
    fragment_size: usize,
}

impl SimulatedPlatform {
    pub fn new(config: SimulatedPlatformConfig) -> Self {
        info!(
            "Simulated platform initialized ({} devices, permission={})",
            config.devices.len(),
            config.permission_granted
        );

        Self {
            shared: Arc::new(Mutex::new(PlatformState {
                permission_granted: config.permission_granted,
                devices: config.devices,
                ..Default::default()
            })),
            fragment_interval: config.fragment_interval,
            fragment_size: config.fragment_size,
        }
    }

    fn state(&self) -> MutexGuard<'_, PlatformState> {
        lock(&self.shared)
    }

    /// Grant or revoke media access
    pub fn set_permission(&self, granted: bool) {
        self.state().permission_granted = granted;
    }

    /// Replace the attached devices (hot-plug)
    pub fn set_devices(&self, devices: Vec<Device>) {
        self.state().devices = devices;
    }

    /// Every stream request issued so far, in order
    pub fn requests(&self) -> Vec<StreamConstraints> {
        self.state().requests.clone()
    }

    pub fn live_streams(&self) -> usize {
        self.state().live_streams
    }

    /// Highest number of simultaneously live streams observed
    pub fn peak_live_streams(&self) -> usize {
        self.state().peak_live_streams
    }

    pub fn is_held(&self, id: &DeviceId) -> bool {
        self.state().held.contains(id)
    }

    /// Deliver a fragment to the stream that is currently recording
    pub async fn inject_fragment(&self, data: impl Into<Vec<u8>>) -> CaptureResult<()> {
        let feed = self
            .state()
            .recording_feed
            .clone()
            .ok_or(CaptureError::NoActiveStream)?;

        feed.send(RecorderEvent::Data(Fragment::new(data)))
            .await
            .map_err(|_| CaptureError::NoActiveStream)
    }

    fn resolve(
        state: &PlatformState,
        kind: MediaKind,
        constraint: &TrackConstraint,
    ) -> CaptureResult<Option<Device>> {
        let wanted = kind.device_kind();

        match constraint {
            TrackConstraint::Off => Ok(None),
            TrackConstraint::Default => state
                .devices
                .iter()
                .find(|d| d.kind == wanted)
                .cloned()
                .map(Some)
                .ok_or_else(|| {
                    CaptureError::MediaAcquisition(format!("no {} input device available", kind))
                }),
            TrackConstraint::Exact(id) => {
                let device = state
                    .devices
                    .iter()
                    .find(|d| &d.id == id)
                    .ok_or_else(|| CaptureError::DeviceNotFound(id.clone()))?;

                if device.kind != wanted {
                    return Err(CaptureError::MediaAcquisition(format!(
                        "device {} is not a {} input",
                        id, kind
                    )));
                }

                Ok(Some(device.clone()))
            }
        }
    }
}

#[async_trait::async_trait]
impl MediaPlatform for SimulatedPlatform {
    async fn enumerate_devices(&self) -> CaptureResult<Vec<Device>> {
        let state = self.state();

        if !state.permission_granted {
            return Err(CaptureError::PermissionDenied(
                "media device access denied".to_string(),
            ));
        }

        Ok(state.devices.clone())
    }

    async fn request_stream(
        &self,
        constraints: &StreamConstraints,
    ) -> CaptureResult<Box<dyn MediaStream>> {
        let mut state = self.state();
        state.requests.push(constraints.clone());

        if !state.permission_granted {
            return Err(CaptureError::PermissionDenied(
                "camera and microphone access denied".to_string(),
            ));
        }

        let mut devices = Vec::new();
        for kind in MediaKind::ALL {
            if let Some(device) = Self::resolve(&state, kind, constraints.get(kind))? {
                devices.push(device);
            }
        }

        if devices.is_empty() {
            return Err(CaptureError::MediaAcquisition(
                "at least one of audio or video must be requested".to_string(),
            ));
        }

        if let Some(busy) = devices.iter().find(|d| state.held.contains(&d.id)) {
            return Err(CaptureError::DeviceBusy(busy.id.clone()));
        }

        for device in &devices {
            state.held.insert(device.id.clone());
        }
        state.live_streams += 1;
        state.peak_live_streams = state.peak_live_streams.max(state.live_streams);

        let info = StreamInfo {
            id: Uuid::new_v4(),
            constraints: constraints.clone(),
            devices,
        };

        debug!("Opened simulated stream {} ({} tracks)", info.id, info.devices.len());

        Ok(Box::new(SimulatedStream {
            info,
            shared: Arc::clone(&self.shared),
            live: true,
            fragment_interval: self.fragment_interval,
            fragment_size: self.fragment_size,
            recording: None,
        }))
    }

    fn name(&self) -> &str {
        "simulated"
    }
}

struct ActiveRecording {
    tx: mpsc::Sender<RecorderEvent>,
    ticker: Option<JoinHandle<()>>,
    sequence: Arc<AtomicU64>,
}

/// Live stream opened by `SimulatedPlatform`
pub struct SimulatedStream {
    info: StreamInfo,
    shared: Arc<Mutex<PlatformState>>,
    live: bool,
    fragment_interval: Option<Duration>,
    fragment_size: usize,
    recording: Option<ActiveRecording>,
}

impl SimulatedStream {
    fn detach_feed(&self, tx: &mpsc::Sender<RecorderEvent>) {
        let mut state = lock(&self.shared);
        if state
            .recording_feed
            .as_ref()
            .is_some_and(|current| current.same_channel(tx))
        {
            state.recording_feed = None;
        }
    }
}

#[async_trait::async_trait]
impl MediaStream for SimulatedStream {
    fn info(&self) -> &StreamInfo {
        &self.info
    }

    fn is_live(&self) -> bool {
        self.live
    }

    fn stop(&mut self) {
        if !self.live {
            return;
        }
        self.live = false;

        // Dropping the sender closes the feed without a Stopped event
        if let Some(recording) = self.recording.take() {
            if let Some(ticker) = recording.ticker {
                ticker.abort();
            }
            self.detach_feed(&recording.tx);
        }

        let mut state = lock(&self.shared);
        for device in &self.info.devices {
            state.held.remove(&device.id);
        }
        state.live_streams = state.live_streams.saturating_sub(1);

        debug!("Stopped simulated stream {}", self.info.id);
    }

    fn start_recording(&mut self, feed_capacity: usize) -> CaptureResult<RecorderFeed> {
        if !self.live {
            return Err(CaptureError::NoActiveStream);
        }
        if self.recording.is_some() {
            return Err(CaptureError::AlreadyRecording);
        }

        let (tx, rx) = mpsc::channel(feed_capacity.max(1));
        let sequence = Arc::new(AtomicU64::new(0));

        let ticker = self.fragment_interval.map(|interval| {
            let tx = tx.clone();
            let sequence = Arc::clone(&sequence);
            let size = self.fragment_size;
            tokio::spawn(async move {
                loop {
                    tokio::time::sleep(interval).await;
                    let fragment = synthetic_fragment(sequence.load(Ordering::SeqCst), size);
                    if tx.send(RecorderEvent::Data(fragment)).await.is_err() {
                        break;
                    }
                    sequence.fetch_add(1, Ordering::SeqCst);
                }
            })
        });

        lock(&self.shared).recording_feed = Some(tx.clone());
        self.recording = Some(ActiveRecording {
            tx,
            ticker,
            sequence,
        });

        Ok(rx)
    }

    async fn stop_recording(&mut self) -> CaptureResult<()> {
        let Some(recording) = self.recording.take() else {
            return Ok(());
        };

        self.detach_feed(&recording.tx);

        // Flush: whatever the ticker had not delivered goes out as one last fragment
        if let Some(ticker) = recording.ticker {
            ticker.abort();
            // Cancelled join error is expected; awaiting guarantees no late sends
            let _ = ticker.await;
            let last = synthetic_fragment(
                recording.sequence.load(Ordering::SeqCst),
                self.fragment_size,
            );
            if recording.tx.send(RecorderEvent::Data(last)).await.is_err() {
                warn!("Recorder feed closed before final fragment");
                return Ok(());
            }
        }

        if recording.tx.send(RecorderEvent::Stopped).await.is_err() {
            warn!("Recorder feed closed before stop event");
        }

        Ok(())
    }

    fn is_recording(&self) -> bool {
        self.live && self.recording.is_some()
    }
}

impl Drop for SimulatedStream {
    fn drop(&mut self) {
        self.stop();
    }
}

fn synthetic_fragment(sequence: u64, size: usize) -> Fragment {
    Fragment::new(vec![(sequence % 251) as u8; size])
}

fn lock(shared: &Mutex<PlatformState>) -> MutexGuard<'_, PlatformState> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}
