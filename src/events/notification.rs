use crate::events::input::InputEvent;

/// Everything a surface can tell its subscribers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceNotification {
    CameraChanged,
    IntensityChanged,
    /// The surface moved to a different frame of its stack, by any means.
    NewFrameLoaded,
    Input(InputEvent),
}

impl From<InputEvent> for SurfaceNotification {
    fn from(event: InputEvent) -> Self {
        Self::Input(event)
    }
}
