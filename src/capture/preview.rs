use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::media::{PreviewSurface, StreamInfo};

/// Preview surface backed by a watch channel
///
/// Holds whichever stream is currently bound; observers subscribe to changes.
#[derive(Clone)]
pub struct PreviewSlot {
    tx: Arc<watch::Sender<Option<StreamInfo>>>,
}

impl PreviewSlot {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    /// Stream currently shown, if any
    pub fn current(&self) -> Option<StreamInfo> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<StreamInfo>> {
        self.tx.subscribe()
    }
}

impl Default for PreviewSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewSurface for PreviewSlot {
    fn bind(&self, stream: Option<&StreamInfo>) {
        match stream {
            Some(info) => debug!("Preview bound to stream {}", info.id),
            None => debug!("Preview cleared"),
        }
        self.tx.send_replace(stream.cloned());
    }
}
