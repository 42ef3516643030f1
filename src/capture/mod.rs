//! Device enumeration and the live capture stream
//!
//! - `DeviceCatalog`: snapshot of enumerated devices, filterable by kind
//! - `CaptureSession`: the single live stream bound to the current selections
//! - `PreviewSlot`: preview surface the live stream is bound to

mod catalog;
mod preview;
mod session;

pub use catalog::DeviceCatalog;
pub use preview::PreviewSlot;
pub use session::CaptureSession;
