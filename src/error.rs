//! Capture error taxonomy
//!
//! Nothing here is fatal to the process: every variant degrades to
//! "no live preview / cannot record".

use thiserror::Error;

use crate::media::DeviceId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// Enumeration or acquisition refused by the platform or the user
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Constraints could not be satisfied
    #[error("Media acquisition failed: {0}")]
    MediaAcquisition(String),

    /// Device is held by another live stream
    #[error("Device busy: {0}")]
    DeviceBusy(DeviceId),

    /// Device was removed or never existed
    #[error("Device not found: {0}")]
    DeviceNotFound(DeviceId),

    /// Recording was requested without a bound stream
    #[error("No active capture stream")]
    NoActiveStream,

    #[error("Recording already in progress")]
    AlreadyRecording,
}

impl CaptureError {
    /// Whether the user can recover by re-selecting a device or falling back
    /// to the default one.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CaptureError::MediaAcquisition(_)
                | CaptureError::DeviceBusy(_)
                | CaptureError::DeviceNotFound(_)
        )
    }
}

pub type CaptureResult<T> = std::result::Result<T, CaptureError>;
