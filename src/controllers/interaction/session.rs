use crate::controllers::sync::channel::SyncChannel;
use crate::events::input::PointerButton;

/// Kind of continuous interaction; each kind runs its own heartbeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SessionKind {
    /// Pan, zoom, rotate.
    Camera,
    /// Window/level drag.
    Intensity,
}

impl SessionKind {
    /// Primary drag adjusts window/level; the other buttons move the camera.
    #[must_use]
    pub fn for_button(button: PointerButton) -> Self {
        match button {
            PointerButton::Primary => Self::Intensity,
            PointerButton::Secondary | PointerButton::Middle => Self::Camera,
        }
    }

    #[must_use]
    pub fn channel(self) -> SyncChannel {
        match self {
            Self::Camera => SyncChannel::Camera,
            Self::Intensity => SyncChannel::Intensity,
        }
    }
}
