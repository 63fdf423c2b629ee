#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    PageUp,
    PageDown,
    Other,
}

impl Key {
    /// Slice step requested by the key, if it navigates the stack.
    #[must_use]
    pub fn slice_delta(self) -> Option<i64> {
        match self {
            Self::ArrowUp | Self::PageUp => Some(-1),
            Self::ArrowDown | Self::PageDown => Some(1),
            Self::Other => None,
        }
    }
}

/// Raw input observed on a surface's native element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { button: PointerButton },
    PointerMove,
    PointerUp { button: PointerButton },
    PointerLeave,
    /// Positive `delta_y` scrolls towards the end of the stack.
    Wheel { delta_y: f64 },
    KeyDown(Key),
    TouchStart,
    TouchMove,
    TouchEnd,
}

impl InputEvent {
    /// Whether the event closes an interaction session.
    #[must_use]
    pub fn ends_session(self) -> bool {
        matches!(
            self,
            Self::PointerUp { .. } | Self::PointerLeave | Self::TouchEnd
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{InputEvent, Key, PointerButton};

    #[test]
    fn navigation_keys_step_one_slice() {
        assert_eq!(Key::ArrowUp.slice_delta(), Some(-1));
        assert_eq!(Key::PageUp.slice_delta(), Some(-1));
        assert_eq!(Key::ArrowDown.slice_delta(), Some(1));
        assert_eq!(Key::PageDown.slice_delta(), Some(1));
        assert_eq!(Key::Other.slice_delta(), None);
    }

    #[test]
    fn only_release_and_leave_end_sessions() {
        assert!(InputEvent::PointerUp { button: PointerButton::Primary }.ends_session());
        assert!(InputEvent::PointerLeave.ends_session());
        assert!(InputEvent::TouchEnd.ends_session());
        assert!(!InputEvent::PointerDown { button: PointerButton::Primary }.ends_session());
        assert!(!InputEvent::Wheel { delta_y: 1.0 }.ends_session());
        assert!(!InputEvent::KeyDown(Key::Other).ends_session());
    }
}
