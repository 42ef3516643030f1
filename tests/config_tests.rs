// Tests for configuration loading

use anyhow::Result;
use short_video::{Config, DeviceKind};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_full_config() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("studio.toml");

    fs::write(
        &path,
        r#"
[service]
name = "short-video"

[service.http]
bind = "0.0.0.0"
port = 9000

[capture]
clip_mime_type = "video/mp4"
archive_limit = 10

[platform]
permission_granted = false
fragment_interval_ms = 0

[[platform.devices]]
id = "mic-1"
kind = "audioinput"
label = "Mic"

[[platform.devices]]
id = "cam-1"
kind = "videoinput"
label = "Cam"
"#,
    )?;

    let cfg = Config::load(path.to_str().expect("utf-8 path"))?;

    assert_eq!(cfg.service.http.port, 9000);
    assert_eq!(cfg.capture.clip_mime_type, "video/mp4");
    assert_eq!(cfg.capture.archive_limit, Some(10));
    assert_eq!(cfg.capture.feed_capacity, 100, "Unset keys use defaults");

    let simulated = cfg.platform.simulated();
    assert!(!simulated.permission_granted);
    assert!(simulated.fragment_interval.is_none(), "0 means manual delivery");
    assert_eq!(simulated.devices.len(), 2);
    assert_eq!(simulated.devices[1].kind, DeviceKind::VideoInput);

    Ok(())
}

#[test]
fn test_sections_default_when_missing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("minimal.toml");

    fs::write(
        &path,
        r#"
[service]
name = "minimal"

[service.http]
bind = "127.0.0.1"
port = 8787
"#,
    )?;

    let cfg = Config::load(path.to_str().expect("utf-8 path"))?;

    assert_eq!(cfg.capture.clip_mime_type, "video/webm");
    assert!(cfg.capture.archive_limit.is_none());
    assert!(cfg.platform.permission_granted);
    assert!(cfg.platform.devices.is_empty());

    Ok(())
}

#[test]
fn test_missing_file_is_an_error() {
    assert!(Config::load("/definitely/not/here/studio").is_err());
}

#[test]
fn test_bundled_config_loads() -> Result<()> {
    let cfg = Config::load(concat!(env!("CARGO_MANIFEST_DIR"), "/config/short-video"))?;

    assert_eq!(cfg.service.name, "short-video");
    assert_eq!(cfg.platform.devices.len(), 4);

    Ok(())
}
