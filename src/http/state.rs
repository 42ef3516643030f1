use crate::studio::Studio;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The single studio of this process
    pub studio: Arc<Mutex<Studio>>,
}

impl AppState {
    pub fn new(studio: Studio) -> Self {
        Self {
            studio: Arc::new(Mutex::new(studio)),
        }
    }
}
