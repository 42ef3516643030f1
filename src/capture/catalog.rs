use std::sync::Arc;

use tracing::{info, warn};

use crate::error::CaptureResult;
use crate::media::{Device, DeviceKind, MediaKind, MediaPlatform};

/// Enumerated media devices
///
/// Holds the snapshot from the last successful enumeration. Callers
/// re-enumerate after permission grants or hot-plug.
pub struct DeviceCatalog {
    platform: Arc<dyn MediaPlatform>,
    devices: Vec<Device>,
}

impl DeviceCatalog {
    pub fn new(platform: Arc<dyn MediaPlatform>) -> Self {
        Self {
            platform,
            devices: Vec::new(),
        }
    }

    /// Enumerate devices and replace the snapshot
    ///
    /// On failure the previous snapshot is kept.
    pub async fn enumerate(&mut self) -> CaptureResult<&[Device]> {
        match self.platform.enumerate_devices().await {
            Ok(devices) => {
                info!(
                    "Enumerated {} devices via {}",
                    devices.len(),
                    self.platform.name()
                );
                self.devices = devices;
                Ok(&self.devices)
            }
            Err(e) => {
                warn!("Device enumeration failed: {}", e);
                Err(e)
            }
        }
    }

    /// Current snapshot, in enumeration order
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    /// Devices of one kind, preserving enumeration order
    pub fn devices_of_kind(&self, kind: DeviceKind) -> impl Iterator<Item = &Device> + '_ {
        self.devices.iter().filter(move |d| d.kind == kind)
    }

    /// First input device feeding `kind`, if any
    pub fn first_input(&self, kind: MediaKind) -> Option<&Device> {
        self.devices_of_kind(kind.device_kind()).next()
    }
}
