use std::collections::VecDeque;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::clip::Clip;

/// Session-lifetime list of finished clips, newest first
///
/// Unbounded unless a limit is configured; with a limit the oldest clips
/// are evicted.
#[derive(Clone, Default)]
pub struct RecordingArchive {
    clips: Arc<RwLock<VecDeque<Clip>>>,
    limit: Option<usize>,
}

impl RecordingArchive {
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            clips: Arc::new(RwLock::new(VecDeque::new())),
            limit: limit.filter(|&l| l > 0),
        }
    }

    /// Prepend a clip
    pub async fn add(&self, clip: Clip) {
        let mut clips = self.clips.write().await;
        clips.push_front(clip);

        if let Some(limit) = self.limit {
            while clips.len() > limit {
                if let Some(evicted) = clips.pop_back() {
                    debug!("Archive limit {} reached, evicted clip {}", limit, evicted.id);
                }
            }
        }
    }

    /// All clips, newest first
    pub async fn all(&self) -> Vec<Clip> {
        self.clips.read().await.iter().cloned().collect()
    }

    pub async fn get(&self, id: Uuid) -> Option<Clip> {
        self.clips.read().await.iter().find(|c| c.id == id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.clips.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.clips.read().await.is_empty()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}
