//! Recording cycles and finished clips
//!
//! - `Recorder`: Idle/Recording state machine over the live stream
//! - `ChunkBuffer`: fragments collected during a cycle
//! - `Clip` / `MediaBlob`: a finished, immutable recording
//! - `RecordingArchive`: newest-first list of clips for the session

mod archive;
mod buffer;
mod clip;
mod recorder;

pub use archive::RecordingArchive;
pub use buffer::ChunkBuffer;
pub use clip::{Clip, MediaBlob};
pub use recorder::{Recorder, RecorderConfig, RecordingState};
