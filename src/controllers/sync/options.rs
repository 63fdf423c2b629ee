use crate::controllers::sync::channel::SyncChannel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SyncOptions {
    pub enable_camera: bool,
    pub enable_slice: bool,
    pub enable_intensity: bool,
    pub enable_correspondence_mapping: bool,
}

impl SyncOptions {
    #[must_use]
    pub fn allows(&self, channel: SyncChannel) -> bool {
        match channel {
            SyncChannel::Camera => self.enable_camera,
            SyncChannel::Slice => self.enable_slice,
            SyncChannel::Intensity => self.enable_intensity,
        }
    }

    /// Merges every field present in `patch`; returns whether anything changed.
    pub fn apply(&mut self, patch: &SyncOptionsPatch) -> bool {
        let before = *self;

        if let Some(value) = patch.enable_camera {
            self.enable_camera = value;
        }
        if let Some(value) = patch.enable_slice {
            self.enable_slice = value;
        }
        if let Some(value) = patch.enable_intensity {
            self.enable_intensity = value;
        }
        if let Some(value) = patch.enable_correspondence_mapping {
            self.enable_correspondence_mapping = value;
        }

        *self != before
    }
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            enable_camera: true,
            enable_slice: true,
            enable_intensity: true,
            enable_correspondence_mapping: true,
        }
    }
}

/// Partial update for [`SyncOptions`]; `None` leaves a field untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SyncOptionsPatch {
    pub enable_camera: Option<bool>,
    pub enable_slice: Option<bool>,
    pub enable_intensity: Option<bool>,
    pub enable_correspondence_mapping: Option<bool>,
}
