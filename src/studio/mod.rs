//! Per-session studio state and its lifecycle
//!
//! `Studio` ties the device catalog, capture session, recorder and archive
//! together and exposes the lifecycle hooks of the hosting view:
//! - `prepare`: page metadata
//! - `hydrate`: first enumeration + first acquisition
//! - `terminate`: detach listeners, release the stream

mod config;
mod studio;
mod view;

pub use config::StudioConfig;
pub use studio::Studio;
pub use view::{relative_time, ClipDetail, ClipView, DeviceOption, PageMeta, StudioStatus};
