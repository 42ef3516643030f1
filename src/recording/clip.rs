use std::sync::Arc;

use base64::Engine;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::media::Fragment;

/// Assembled recording data, shared cheaply between clones
#[derive(Clone)]
pub struct MediaBlob {
    data: Arc<[u8]>,
    mime_type: String,
}

impl MediaBlob {
    /// Concatenate fragments in delivery order
    pub fn from_fragments(fragments: impl IntoIterator<Item = Fragment>, mime_type: &str) -> Self {
        let data: Vec<u8> = fragments.into_iter().flat_map(|f| f.data).collect();
        Self {
            data: data.into(),
            mime_type: mime_type.to_string(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl std::fmt::Debug for MediaBlob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MediaBlob({}, {} bytes)", self.mime_type, self.data.len())
    }
}

/// A finished recording. Immutable once created.
#[derive(Debug, Clone)]
pub struct Clip {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    media: MediaBlob,
}

impl Clip {
    /// Stamp `media` with the current time
    pub fn new(media: MediaBlob) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            media,
        }
    }

    pub fn media(&self) -> &MediaBlob {
        &self.media
    }

    /// Inline `data:` URL for the clip, usable as a video source or download link
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.media.mime_type(),
            base64::engine::general_purpose::STANDARD.encode(self.media.bytes())
        )
    }

    /// Suggested file name for downloads
    pub fn file_name(&self) -> String {
        let extension = self
            .media
            .mime_type()
            .split('/')
            .nth(1)
            .and_then(|sub| sub.split(';').next())
            .filter(|ext| !ext.is_empty())
            .unwrap_or("bin");

        format!(
            "recording-{}.{}",
            self.timestamp.format("%Y%m%d-%H%M%S"),
            extension
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blob_concatenates_in_order() {
        let blob = MediaBlob::from_fragments(
            vec![
                Fragment::new(b"ab".to_vec()),
                Fragment::new(b"cd".to_vec()),
                Fragment::new(b"e".to_vec()),
            ],
            "video/webm",
        );

        assert_eq!(blob.bytes(), b"abcde");
        assert_eq!(blob.len(), 5);
    }

    #[test]
    fn data_url_carries_mime_type() {
        let clip = Clip::new(MediaBlob::from_fragments(
            vec![Fragment::new(b"hi".to_vec())],
            "video/webm",
        ));

        assert_eq!(clip.to_data_url(), "data:video/webm;base64,aGk=");
    }

    #[test]
    fn file_name_uses_subtype() {
        let clip = Clip::new(MediaBlob::from_fragments(
            vec![Fragment::new(vec![0u8])],
            "video/webm;codecs=vp8",
        ));

        assert!(clip.file_name().starts_with("recording-"));
        assert!(clip.file_name().ends_with(".webm"));
    }
}
