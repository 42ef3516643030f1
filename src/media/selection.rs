use serde::{Deserialize, Serialize};

use super::device::{DeviceId, MediaKind};

/// User's choice for one media kind
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", content = "device_id", rename_all = "lowercase")]
pub enum Selection {
    /// Use the platform default device
    #[default]
    #[serde(rename = "default", alias = "unset")]
    Unset,
    /// Track explicitly turned off
    Disabled,
    /// Explicit device
    Device(DeviceId),
}

impl Selection {
    pub fn is_disabled(&self) -> bool {
        matches!(self, Selection::Disabled)
    }

    /// Constraint this selection contributes to a stream request
    pub fn constraint(&self) -> TrackConstraint {
        match self {
            Selection::Unset => TrackConstraint::Default,
            Selection::Disabled => TrackConstraint::Off,
            Selection::Device(id) => TrackConstraint::Exact(id.clone()),
        }
    }
}

/// Current selection per media kind. Kinds are independent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selections {
    pub audio: Selection,
    pub video: Selection,
}

impl Selections {
    pub fn new(audio: Selection, video: Selection) -> Self {
        Self { audio, video }
    }

    pub fn get(&self, kind: MediaKind) -> &Selection {
        match kind {
            MediaKind::Audio => &self.audio,
            MediaKind::Video => &self.video,
        }
    }

    /// Replace the selection for `kind`, returning whether it changed
    pub fn set(&mut self, kind: MediaKind, selection: Selection) -> bool {
        let slot = match kind {
            MediaKind::Audio => &mut self.audio,
            MediaKind::Video => &mut self.video,
        };
        if *slot == selection {
            return false;
        }
        *slot = selection;
        true
    }

    pub fn all_disabled(&self) -> bool {
        self.audio.is_disabled() && self.video.is_disabled()
    }

    /// Request constraints, or `None` when nothing should be requested
    pub fn constraints(&self) -> Option<StreamConstraints> {
        if self.all_disabled() {
            return None;
        }
        Some(StreamConstraints {
            audio: self.audio.constraint(),
            video: self.video.constraint(),
        })
    }
}

/// Per-track part of a stream request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "device_id", rename_all = "lowercase")]
pub enum TrackConstraint {
    /// Track omitted from the request
    Off,
    /// Platform default device
    Default,
    /// Exactly this device
    Exact(DeviceId),
}

/// Stream request passed to the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamConstraints {
    pub audio: TrackConstraint,
    pub video: TrackConstraint,
}

impl StreamConstraints {
    pub fn get(&self, kind: MediaKind) -> &TrackConstraint {
        match kind {
            MediaKind::Audio => &self.audio,
            MediaKind::Video => &self.video,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_selection_omits_track() {
        let selections = Selections::new(Selection::Disabled, Selection::Unset);
        let constraints = selections.constraints().unwrap();

        assert_eq!(constraints.audio, TrackConstraint::Off);
        assert_eq!(constraints.video, TrackConstraint::Default);
    }

    #[test]
    fn both_disabled_requests_nothing() {
        let selections = Selections::new(Selection::Disabled, Selection::Disabled);
        assert!(selections.constraints().is_none());
    }

    #[test]
    fn set_reports_change() {
        let mut selections = Selections::default();
        let mic = Selection::Device(DeviceId::new("mic-a"));

        assert!(selections.set(MediaKind::Audio, mic.clone()));
        assert!(!selections.set(MediaKind::Audio, mic.clone()));
        assert_eq!(selections.get(MediaKind::Audio), &mic);
        assert_eq!(selections.get(MediaKind::Video), &Selection::Unset);
    }

    #[test]
    fn selection_json_shape() {
        let json = serde_json::to_value(Selection::Device(DeviceId::new("cam-x"))).unwrap();
        assert_eq!(json, serde_json::json!({ "mode": "device", "device_id": "cam-x" }));

        let parsed: Selection = serde_json::from_str(r#"{"mode":"disabled"}"#).unwrap();
        assert_eq!(parsed, Selection::Disabled);
    }

    #[test]
    fn unset_reads_as_default_mode() {
        let json = serde_json::to_value(Selection::Unset).unwrap();
        assert_eq!(json, serde_json::json!({ "mode": "default" }));
        assert_eq!(json, serde_json::to_value(TrackConstraint::Default).unwrap());

        let parsed: Selection = serde_json::from_str(r#"{"mode":"default"}"#).unwrap();
        assert_eq!(parsed, Selection::Unset);

        let legacy: Selection = serde_json::from_str(r#"{"mode":"unset"}"#).unwrap();
        assert_eq!(legacy, Selection::Unset);
    }
}
