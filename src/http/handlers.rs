use super::state::AppState;
use crate::error::CaptureError;
use crate::media::{MediaKind, Selection, StreamInfo};
use crate::recording::RecordingState;
use crate::studio::ClipDetail;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use uuid::Uuid;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct SelectionResponse {
    pub kind: MediaKind,
    pub selection: Selection,
    /// Stream bound after the change (none when both kinds are disabled)
    pub stream: Option<StreamInfo>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecordingResponse {
    pub status: RecordingState,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
        .into_response()
}

fn capture_error_response(e: CaptureError) -> Response {
    let status = match &e {
        CaptureError::PermissionDenied(_) => StatusCode::FORBIDDEN,
        CaptureError::DeviceNotFound(_) => StatusCode::NOT_FOUND,
        CaptureError::DeviceBusy(_)
        | CaptureError::NoActiveStream
        | CaptureError::AlreadyRecording => StatusCode::CONFLICT,
        CaptureError::MediaAcquisition(_) => StatusCode::BAD_GATEWAY,
    };

    error_response(status, e.to_string())
}

fn parse_kind(kind: &str) -> Result<MediaKind, Response> {
    MediaKind::parse(kind).ok_or_else(|| {
        error_response(
            StatusCode::BAD_REQUEST,
            format!("Unknown media kind '{}' (expected audio or video)", kind),
        )
    })
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// GET /page
pub async fn get_page(State(state): State<AppState>) -> impl IntoResponse {
    let studio = state.studio.lock().await;
    Json(studio.prepare())
}

/// GET /status
pub async fn get_status(State(state): State<AppState>) -> impl IntoResponse {
    let studio = state.studio.lock().await;
    Json(studio.status().await)
}

/// GET /devices
/// Devices from the last enumeration
pub async fn list_all_devices(State(state): State<AppState>) -> impl IntoResponse {
    let studio = state.studio.lock().await;
    Json(studio.catalog().devices().to_vec())
}

/// POST /devices
/// Re-enumerate devices
pub async fn refresh_devices(State(state): State<AppState>) -> Response {
    let mut studio = state.studio.lock().await;

    match studio.refresh_devices().await {
        Ok(devices) => (StatusCode::OK, Json(devices)).into_response(),
        Err(e) => {
            warn!("Device refresh failed: {}", e);
            capture_error_response(e)
        }
    }
}

/// GET /devices/:kind
/// Selector entries for one media kind
pub async fn list_devices(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Response {
    let kind = match parse_kind(&kind) {
        Ok(kind) => kind,
        Err(response) => return response,
    };

    let studio = state.studio.lock().await;
    (StatusCode::OK, Json(studio.device_options(kind))).into_response()
}

/// PUT /selection/:kind
/// Change the selection for one kind; the live stream is rebuilt
pub async fn select_device(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Json(selection): Json<Selection>,
) -> Response {
    let kind = match parse_kind(&kind) {
        Ok(kind) => kind,
        Err(response) => return response,
    };

    let mut studio = state.studio.lock().await;

    match studio.select(kind, selection.clone()).await {
        Ok(stream) => (
            StatusCode::OK,
            Json(SelectionResponse {
                kind,
                selection,
                stream,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to apply {} selection: {}", kind, e);
            capture_error_response(e)
        }
    }
}

/// POST /record/start
pub async fn start_recording(State(state): State<AppState>) -> Response {
    let mut studio = state.studio.lock().await;

    match studio.start_recording().await {
        Ok(()) => {
            info!("Recording started");
            (
                StatusCode::OK,
                Json(RecordingResponse {
                    status: RecordingState::Recording,
                    message: "Recording started".to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            error!("Failed to start recording: {}", e);
            capture_error_response(e)
        }
    }
}

/// POST /record/stop
/// Stopping an idle recorder succeeds without effect
pub async fn stop_recording(State(state): State<AppState>) -> Response {
    let mut studio = state.studio.lock().await;

    match studio.stop_recording().await {
        Ok(stopped) => {
            let message = if stopped {
                "Recording stopped"
            } else {
                "Not recording"
            };
            (
                StatusCode::OK,
                Json(RecordingResponse {
                    status: RecordingState::Idle,
                    message: message.to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            error!("Failed to stop recording: {}", e);
            capture_error_response(e)
        }
    }
}

/// GET /clips
/// Recordings, newest first
pub async fn list_clips(State(state): State<AppState>) -> impl IntoResponse {
    let studio = state.studio.lock().await;
    Json(studio.clip_views().await)
}

/// GET /clips/:clip_id
/// One recording with its media as a data URL
pub async fn get_clip(
    State(state): State<AppState>,
    Path(clip_id): Path<Uuid>,
) -> Response {
    let clip = {
        let studio = state.studio.lock().await;
        studio.archive().get(clip_id).await
    };

    match clip {
        Some(clip) => (
            StatusCode::OK,
            Json(ClipDetail::new(&clip, chrono::Utc::now())),
        )
            .into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            format!("Clip {} not found", clip_id),
        ),
    }
}

/// GET /clips/:clip_id/download
pub async fn download_clip(
    State(state): State<AppState>,
    Path(clip_id): Path<Uuid>,
) -> Response {
    let clip = {
        let studio = state.studio.lock().await;
        studio.archive().get(clip_id).await
    };

    match clip {
        Some(clip) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, clip.media().mime_type().to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", clip.file_name()),
                ),
            ],
            clip.media().bytes().to_vec(),
        )
            .into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            format!("Clip {} not found", clip_id),
        ),
    }
}
