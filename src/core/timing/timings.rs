use crate::core::validation::intensity::MAX_INTENSITY_WINDOW;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SyncTimings {
    /// Delay before a link's anti-oscillation guard re-opens (one frame).
    pub guard_release: Duration,
    pub camera_heartbeat: Duration,
    pub intensity_heartbeat: Duration,
    pub wheel_debounce: Duration,
    pub max_intensity_window: f64,
}

impl SyncTimings {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.guard_release.is_zero()
            && !self.camera_heartbeat.is_zero()
            && !self.intensity_heartbeat.is_zero()
            && !self.wheel_debounce.is_zero()
            && self.max_intensity_window.is_finite()
            && self.max_intensity_window > 0.0
    }
}

impl Default for SyncTimings {
    fn default() -> Self {
        Self {
            guard_release: Duration::from_millis(16),
            camera_heartbeat: Duration::from_millis(50),
            intensity_heartbeat: Duration::from_millis(100),
            wheel_debounce: Duration::from_millis(10),
            max_intensity_window: MAX_INTENSITY_WINDOW,
        }
    }
}
