/// Displayed signal bounds, the "window/level" of an image pane.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntensityRange {
    pub lower: f64,
    pub upper: f64,
}

impl IntensityRange {
    #[must_use]
    pub const fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Builds the range centred on `level` spanning `window`.
    #[must_use]
    pub fn from_window_level(window: f64, level: f64) -> Self {
        Self {
            lower: level - window / 2.0,
            upper: level + window / 2.0,
        }
    }

    #[must_use]
    pub fn window(&self) -> f64 {
        self.upper - self.lower
    }

    #[must_use]
    pub fn level(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }
}
