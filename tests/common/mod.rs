// Shared fixtures: mic A, mic B, cam X and an output device that must never
// show up in input selectors.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use short_video::{
    Device, DeviceKind, SimulatedPlatform, SimulatedPlatformConfig, Studio, StudioConfig,
};

pub fn devices() -> Vec<Device> {
    vec![
        Device::new("mic-a", DeviceKind::AudioInput, "Mic A"),
        Device::new("speaker", DeviceKind::AudioOutput, "Speaker"),
        Device::new("mic-b", DeviceKind::AudioInput, "Mic B"),
        Device::new("cam-x", DeviceKind::VideoInput, "Cam X"),
    ]
}

/// Platform that only delivers injected fragments
pub fn platform() -> SimulatedPlatform {
    SimulatedPlatform::new(SimulatedPlatformConfig {
        devices: devices(),
        ..Default::default()
    })
}

pub fn studio(platform: &SimulatedPlatform) -> Studio {
    Studio::new(Arc::new(platform.clone()), &StudioConfig::default())
}

/// Poll until the recorder has buffered `count` fragments
pub async fn wait_for_buffered(studio: &Studio, count: usize) {
    for _ in 0..200 {
        if studio.recorder().buffered_fragments().await >= count {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("recorder never buffered {} fragments", count);
}
