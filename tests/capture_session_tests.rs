// Integration tests for device enumeration and the live capture stream
//
// These tests verify that at most one stream is ever live, that disabled
// tracks are left out of requests, and that failures leave a clean state.

mod common;

use anyhow::Result;
use short_video::{
    CaptureError, CaptureSession, DeviceCatalog, DeviceId, DeviceKind, PreviewSlot, Selection,
    Selections, TrackConstraint,
};
use std::sync::Arc;

fn session(platform: &short_video::SimulatedPlatform) -> (CaptureSession, PreviewSlot) {
    let preview = PreviewSlot::new();
    let session = CaptureSession::new(Arc::new(platform.clone()), Arc::new(preview.clone()));
    (session, preview)
}

fn device(id: &str) -> Selection {
    Selection::Device(DeviceId::new(id))
}

#[tokio::test]
async fn test_catalog_filters_by_kind_in_order() -> Result<()> {
    let platform = common::platform();
    let mut catalog = DeviceCatalog::new(Arc::new(platform.clone()));

    assert!(catalog.devices().is_empty(), "Nothing before enumeration");

    let devices = catalog.enumerate().await?;
    assert_eq!(devices.len(), 4);

    let mics: Vec<&str> = catalog
        .devices_of_kind(DeviceKind::AudioInput)
        .map(|d| d.id.as_str())
        .collect();
    assert_eq!(mics, vec!["mic-a", "mic-b"]);

    let cams: Vec<&str> = catalog
        .devices_of_kind(DeviceKind::VideoInput)
        .map(|d| d.id.as_str())
        .collect();
    assert_eq!(cams, vec!["cam-x"]);

    Ok(())
}

#[tokio::test]
async fn test_catalog_permission_denied_keeps_snapshot() -> Result<()> {
    let platform = common::platform();
    let mut catalog = DeviceCatalog::new(Arc::new(platform.clone()));
    catalog.enumerate().await?;

    platform.set_permission(false);
    let result = catalog.enumerate().await;

    assert!(matches!(result, Err(CaptureError::PermissionDenied(_))));
    assert_eq!(catalog.devices().len(), 4, "Previous snapshot kept");

    Ok(())
}

#[tokio::test]
async fn test_acquire_requests_selected_devices() -> Result<()> {
    let platform = common::platform();
    let (mut session, preview) = session(&platform);

    let info = session
        .acquire(Selections::new(device("mic-a"), device("cam-x")))
        .await?
        .expect("stream acquired");

    assert_eq!(info.devices.len(), 2);
    assert_eq!(
        platform.requests()[0].audio,
        TrackConstraint::Exact(DeviceId::new("mic-a"))
    );
    assert_eq!(
        platform.requests()[0].video,
        TrackConstraint::Exact(DeviceId::new("cam-x"))
    );
    assert_eq!(preview.current().map(|s| s.id), Some(info.id));

    Ok(())
}

#[tokio::test]
async fn test_disabled_track_is_omitted() -> Result<()> {
    let platform = common::platform();
    let (mut session, _preview) = session(&platform);

    let info = session
        .acquire(Selections::new(Selection::Disabled, Selection::Unset))
        .await?
        .expect("video-only stream");

    assert_eq!(info.constraints.audio, TrackConstraint::Off);
    assert_eq!(info.constraints.video, TrackConstraint::Default);
    assert_eq!(info.devices.len(), 1);
    assert_eq!(info.devices[0].id.as_str(), "cam-x");

    Ok(())
}

#[tokio::test]
async fn test_both_disabled_never_requests() -> Result<()> {
    let platform = common::platform();
    let (mut session, preview) = session(&platform);

    session
        .acquire(Selections::new(device("mic-a"), device("cam-x")))
        .await?;
    assert_eq!(platform.live_streams(), 1);

    let result = session
        .acquire(Selections::new(Selection::Disabled, Selection::Disabled))
        .await?;

    assert!(result.is_none(), "No stream when both kinds are disabled");
    assert_eq!(platform.requests().len(), 1, "No platform request issued");
    assert_eq!(platform.live_streams(), 0, "Previous stream released");
    assert!(preview.current().is_none());
    assert!(!session.is_live());

    Ok(())
}

#[tokio::test]
async fn test_at_most_one_stream_live_across_changes() -> Result<()> {
    let platform = common::platform();
    let (mut session, _preview) = session(&platform);

    let sequence = vec![
        Selections::new(device("mic-a"), device("cam-x")),
        Selections::new(device("mic-b"), device("cam-x")),
        Selections::new(Selection::Unset, Selection::Unset),
        Selections::new(Selection::Disabled, device("cam-x")),
        Selections::new(device("mic-a"), Selection::Disabled),
        Selections::new(Selection::Disabled, Selection::Disabled),
        Selections::new(device("mic-b"), Selection::Unset),
    ];

    for selections in sequence {
        session.acquire(selections).await?;
        assert!(platform.live_streams() <= 1);
    }

    // Exclusive devices would have reported DeviceBusy on any overlap
    assert_eq!(platform.peak_live_streams(), 1);

    Ok(())
}

#[tokio::test]
async fn test_devices_are_exclusive() -> Result<()> {
    let platform = common::platform();
    let (mut first, _p1) = session(&platform);
    let (mut second, _p2) = session(&platform);

    first
        .acquire(Selections::new(device("mic-a"), Selection::Disabled))
        .await?;

    let busy = second
        .acquire(Selections::new(device("mic-a"), Selection::Disabled))
        .await;
    assert_eq!(busy, Err(CaptureError::DeviceBusy(DeviceId::new("mic-a"))));
    assert!(!second.is_live());

    first.release();
    assert!(!platform.is_held(&DeviceId::new("mic-a")));

    second.reacquire().await?;
    assert!(second.is_live());

    Ok(())
}

#[tokio::test]
async fn test_unknown_device_is_recoverable() -> Result<()> {
    let platform = common::platform();
    let (mut session, preview) = session(&platform);

    let result = session
        .acquire(Selections::new(device("ghost"), Selection::Unset))
        .await;

    let err = result.expect_err("unknown device");
    assert_eq!(err, CaptureError::DeviceNotFound(DeviceId::new("ghost")));
    assert!(err.is_recoverable());
    assert!(!session.is_live());
    assert!(preview.current().is_none());

    // Falling back to the default recovers
    session
        .acquire(Selections::new(Selection::Unset, Selection::Unset))
        .await?;
    assert!(session.is_live());

    Ok(())
}

#[tokio::test]
async fn test_wrong_kind_is_rejected() -> Result<()> {
    let platform = common::platform();
    let (mut session, _preview) = session(&platform);

    let result = session
        .acquire(Selections::new(device("cam-x"), Selection::Disabled))
        .await;

    assert!(matches!(result, Err(CaptureError::MediaAcquisition(_))));

    Ok(())
}

#[tokio::test]
async fn test_release_is_idempotent() -> Result<()> {
    let platform = common::platform();
    let (mut session, _preview) = session(&platform);

    session.release();

    session
        .acquire(Selections::new(Selection::Unset, Selection::Unset))
        .await?;
    session.release();
    session.release();

    assert_eq!(platform.live_streams(), 0);
    assert!(session.stream().is_none());

    Ok(())
}
