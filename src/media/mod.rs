pub mod device;
pub mod platform;
pub mod selection;
pub mod simulated;

pub use device::{Device, DeviceId, DeviceKind, MediaKind};
pub use platform::{
    Fragment, MediaPlatform, MediaStream, PreviewSurface, RecorderEvent, RecorderFeed, StreamInfo,
};
pub use selection::{Selection, Selections, StreamConstraints, TrackConstraint};
pub use simulated::{SimulatedPlatform, SimulatedPlatformConfig};
