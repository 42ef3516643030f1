//! HTTP API for the studio front end
//!
//! - GET /health - Health check
//! - GET /page - Page metadata
//! - GET /status - Recording state, selections, live stream
//! - GET /devices - Current device snapshot
//! - POST /devices - Re-enumerate devices
//! - GET /devices/:kind - Device selector entries (audio | video)
//! - PUT /selection/:kind - Change a selection and rebuild the stream
//! - POST /record/start - Start recording
//! - POST /record/stop - Stop recording
//! - GET /clips - Recordings, newest first
//! - GET /clips/:id - One recording with a data URL
//! - GET /clips/:id/download - Download a clip

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
