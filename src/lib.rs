pub mod capture;
pub mod config;
pub mod error;
pub mod http;
pub mod media;
pub mod recording;
pub mod studio;

pub use capture::{CaptureSession, DeviceCatalog, PreviewSlot};
pub use config::Config;
pub use error::{CaptureError, CaptureResult};
pub use http::{create_router, AppState};
pub use media::{
    Device, DeviceId, DeviceKind, Fragment, MediaKind, MediaPlatform, MediaStream, Selection,
    Selections, SimulatedPlatform, SimulatedPlatformConfig, StreamConstraints, TrackConstraint,
};
pub use recording::{Clip, MediaBlob, Recorder, RecordingArchive, RecordingState};
pub use studio::{Studio, StudioConfig, StudioStatus};
