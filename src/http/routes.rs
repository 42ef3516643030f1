use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        .route("/page", get(handlers::get_page))
        .route("/status", get(handlers::get_status))
        // Device selection
        .route(
            "/devices",
            get(handlers::list_all_devices).post(handlers::refresh_devices),
        )
        .route("/devices/:kind", get(handlers::list_devices))
        .route("/selection/:kind", put(handlers::select_device))
        // Recording control
        .route("/record/start", post(handlers::start_recording))
        .route("/record/stop", post(handlers::stop_recording))
        // Recordings
        .route("/clips", get(handlers::list_clips))
        .route("/clips/:clip_id", get(handlers::get_clip))
        .route("/clips/:clip_id/download", get(handlers::download_clip))
        .layer(CorsLayer::permissive())
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
