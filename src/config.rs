use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

use crate::media::{Device, SimulatedPlatformConfig};
use crate::studio::StudioConfig;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    #[serde(default)]
    pub capture: StudioConfig,
    #[serde(default)]
    pub platform: PlatformConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    pub permission_granted: bool,
    /// 0 disables synthetic fragments
    pub fragment_interval_ms: u64,
    pub fragment_size: usize,
    pub devices: Vec<Device>,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            permission_granted: true,
            fragment_interval_ms: 250,
            fragment_size: 4096,
            devices: Vec::new(),
        }
    }
}

impl PlatformConfig {
    pub fn simulated(&self) -> SimulatedPlatformConfig {
        SimulatedPlatformConfig {
            permission_granted: self.permission_granted,
            fragment_interval: (self.fragment_interval_ms > 0)
                .then(|| Duration::from_millis(self.fragment_interval_ms)),
            fragment_size: self.fragment_size,
            devices: self.devices.clone(),
        }
    }
}

impl Config {
    /// Load configuration from `path` (extension optional, `~` expanded)
    pub fn load(path: &str) -> Result<Self> {
        let path = shellexpand::tilde(path);

        let settings = config::Config::builder()
            .add_source(config::File::with_name(&path))
            .build()
            .with_context(|| format!("Failed to read config {}", path))?;

        settings
            .try_deserialize()
            .context("Invalid configuration")
    }
}
