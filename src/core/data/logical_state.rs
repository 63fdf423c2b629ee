use log::warn;

/// Coarse per-surface view state shared by a sync group.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogicalState {
    pub zoom: f64,
    pub pan: [f64; 2],
}

impl LogicalState {
    pub const IDENTITY: Self = Self {
        zoom: 1.0,
        pan: [0.0, 0.0],
    };

    /// Applies every valid field of `patch`; returns whether anything changed.
    pub fn apply(&mut self, patch: &LogicalStatePatch) -> bool {
        let before = *self;

        if let Some(zoom) = patch.zoom {
            if zoom.is_finite() && zoom > 0.0 {
                self.zoom = zoom;
            } else {
                warn!("ignoring invalid zoom {zoom}");
            }
        }

        if let Some(pan) = patch.pan {
            if pan.iter().all(|component| component.is_finite()) {
                self.pan = pan;
            } else {
                warn!("ignoring non-finite pan {pan:?}");
            }
        }

        *self != before
    }
}

impl Default for LogicalState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogicalStatePatch {
    pub zoom: Option<f64>,
    pub pan: Option<[f64; 2]>,
}

impl LogicalStatePatch {
    #[must_use]
    pub fn zoom(zoom: f64) -> Self {
        Self {
            zoom: Some(zoom),
            pan: None,
        }
    }

    #[must_use]
    pub fn pan(pan: [f64; 2]) -> Self {
        Self {
            zoom: None,
            pan: Some(pan),
        }
    }

    #[must_use]
    pub fn full(state: LogicalState) -> Self {
        Self {
            zoom: Some(state.zoom),
            pan: Some(state.pan),
        }
    }
}
