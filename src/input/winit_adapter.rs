use crate::events::input::{InputEvent, Key, PointerButton};
use winit::event::{ElementState, MouseButton, MouseScrollDelta, TouchPhase, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Translates winit window events into the engine's [`InputEvent`]s.
///
/// Touch is tracked per finger: only the first finger down starts a gesture
/// and only the last one up ends it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WinitInputAdapter {
    touches: usize,
}

impl WinitInputAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn translate(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::MouseInput { state, button, .. } => Self::mouse_button(*button, *state),
            WindowEvent::CursorMoved { .. } => Some(InputEvent::PointerMove),
            WindowEvent::CursorLeft { .. } => Some(InputEvent::PointerLeave),
            WindowEvent::MouseWheel { delta, .. } => Self::wheel(*delta),
            WindowEvent::KeyboardInput { event, .. } => match event.physical_key {
                PhysicalKey::Code(code) => Self::key(code, event.state),
                PhysicalKey::Unidentified(_) => None,
            },
            WindowEvent::Touch(touch) => self.touch(touch.phase),
            _ => None,
        }
    }

    #[must_use]
    pub fn mouse_button(button: MouseButton, state: ElementState) -> Option<InputEvent> {
        let button = match button {
            MouseButton::Left => PointerButton::Primary,
            MouseButton::Right => PointerButton::Secondary,
            MouseButton::Middle => PointerButton::Middle,
            _ => return None,
        };

        Some(match state {
            ElementState::Pressed => InputEvent::PointerDown { button },
            ElementState::Released => InputEvent::PointerUp { button },
        })
    }

    /// winit reports scrolling up as positive; the engine steps forward on
    /// positive deltas, so the sign is flipped.
    #[must_use]
    pub fn wheel(delta: MouseScrollDelta) -> Option<InputEvent> {
        let delta_y = match delta {
            MouseScrollDelta::LineDelta(_, y) => f64::from(y),
            MouseScrollDelta::PixelDelta(position) => position.y,
        };

        (delta_y != 0.0).then_some(InputEvent::Wheel { delta_y: -delta_y })
    }

    #[must_use]
    pub fn key(code: KeyCode, state: ElementState) -> Option<InputEvent> {
        if state != ElementState::Pressed {
            return None;
        }

        let key = match code {
            KeyCode::ArrowUp => Key::ArrowUp,
            KeyCode::ArrowDown => Key::ArrowDown,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            _ => Key::Other,
        };

        Some(InputEvent::KeyDown(key))
    }

    pub fn touch(&mut self, phase: TouchPhase) -> Option<InputEvent> {
        match phase {
            TouchPhase::Started => {
                self.touches += 1;
                (self.touches == 1).then_some(InputEvent::TouchStart)
            }
            TouchPhase::Moved => (self.touches > 0).then_some(InputEvent::TouchMove),
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if self.touches == 0 {
                    return None;
                }
                self.touches -= 1;
                (self.touches == 0).then_some(InputEvent::TouchEnd)
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::WinitInputAdapter;
    use crate::events::input::{InputEvent, Key, PointerButton};
    use winit::dpi::PhysicalPosition;
    use winit::event::{ElementState, MouseButton, MouseScrollDelta, TouchPhase};
    use winit::keyboard::KeyCode;

    #[test]
    fn mouse_buttons_map_to_pointer_buttons() {
        assert_eq!(
            WinitInputAdapter::mouse_button(MouseButton::Left, ElementState::Pressed),
            Some(InputEvent::PointerDown {
                button: PointerButton::Primary
            })
        );
        assert_eq!(
            WinitInputAdapter::mouse_button(MouseButton::Right, ElementState::Released),
            Some(InputEvent::PointerUp {
                button: PointerButton::Secondary
            })
        );
        assert_eq!(
            WinitInputAdapter::mouse_button(MouseButton::Middle, ElementState::Pressed),
            Some(InputEvent::PointerDown {
                button: PointerButton::Middle
            })
        );
        assert_eq!(
            WinitInputAdapter::mouse_button(MouseButton::Back, ElementState::Pressed),
            None
        );
    }

    #[test]
    fn wheel_sign_is_flipped() {
        assert_eq!(
            WinitInputAdapter::wheel(MouseScrollDelta::LineDelta(0.0, -1.0)),
            Some(InputEvent::Wheel { delta_y: 1.0 })
        );
        assert_eq!(
            WinitInputAdapter::wheel(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 24.0))),
            Some(InputEvent::Wheel { delta_y: -24.0 })
        );
        assert_eq!(
            WinitInputAdapter::wheel(MouseScrollDelta::LineDelta(3.0, 0.0)),
            None
        );
    }

    #[test]
    fn only_key_presses_are_reported() {
        assert_eq!(
            WinitInputAdapter::key(KeyCode::PageDown, ElementState::Pressed),
            Some(InputEvent::KeyDown(Key::PageDown))
        );
        assert_eq!(
            WinitInputAdapter::key(KeyCode::KeyW, ElementState::Pressed),
            Some(InputEvent::KeyDown(Key::Other))
        );
        assert_eq!(
            WinitInputAdapter::key(KeyCode::ArrowUp, ElementState::Released),
            None
        );
    }

    #[test]
    fn multi_finger_touch_is_one_gesture() {
        let mut adapter = WinitInputAdapter::new();

        assert_eq!(adapter.touch(TouchPhase::Started), Some(InputEvent::TouchStart));
        assert_eq!(adapter.touch(TouchPhase::Started), None);
        assert_eq!(adapter.touch(TouchPhase::Moved), Some(InputEvent::TouchMove));
        assert_eq!(adapter.touch(TouchPhase::Ended), None);
        assert_eq!(adapter.touch(TouchPhase::Cancelled), Some(InputEvent::TouchEnd));
        assert_eq!(adapter.touch(TouchPhase::Ended), None);
        assert_eq!(adapter.touch(TouchPhase::Moved), None);
    }

    #[test]
    fn reset_forgets_active_touches() {
        let mut adapter = WinitInputAdapter::new();
        adapter.touch(TouchPhase::Started);

        adapter.reset();

        assert_eq!(adapter.touch(TouchPhase::Ended), None);
        assert_eq!(adapter, WinitInputAdapter::default());
    }
}
