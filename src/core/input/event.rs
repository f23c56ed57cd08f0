//=========================================================================
// Input Event Types
//
// Platform-independent representation of the keyboard and mouse input
// the play mode reacts to.
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    Mode::handle_event()
//         ↓
//    ButtonTracker (held / press counts)
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use serde::{Deserialize, Serialize};

//=== MouseButton =========================================================

/// Physical mouse button identifier.
///
/// The `Other` variant covers side buttons and anything non-standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other,
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced, so
/// `KeyW` stays the "forward" key on an AZERTY layout too. Serialized by
/// variant name (`"KeyW"`) in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------
    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,

    /// Key reported by the platform that has no variant here.
    Unidentified,
}

//=== InputEvent ==========================================================

/// Input event as delivered to [`Mode::handle_event`](crate::core::Mode::handle_event).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Key pressed. `repeat` is set for OS auto-repeat presses, which
    /// count as presses like the first one.
    KeyDown { key: KeyCode, repeat: bool },

    /// Key released.
    KeyUp { key: KeyCode },

    /// Mouse button pressed.
    MouseButtonDown(MouseButton),

    /// Mouse button released.
    MouseButtonUp(MouseButton),

    /// Relative mouse motion in pixels (raw device delta, +y is down).
    MouseMoved { dx: f32, dy: f32 },

    /// Anything the platform layer could not classify.
    Unidentified,
}

impl InputEvent {
    /// Plain key press without auto-repeat.
    pub fn key_down(key: KeyCode) -> Self {
        Self::KeyDown { key, repeat: false }
    }

    pub fn key_up(key: KeyCode) -> Self {
        Self::KeyUp { key }
    }

    /// The key carried by a keyboard event.
    pub fn key(&self) -> Option<KeyCode> {
        match *self {
            Self::KeyDown { key, .. } | Self::KeyUp { key } => Some(key),
            _ => None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_constructors_set_payload() {
        assert_eq!(
            InputEvent::key_down(KeyCode::KeyW),
            InputEvent::KeyDown { key: KeyCode::KeyW, repeat: false }
        );
        assert_eq!(InputEvent::key_up(KeyCode::KeyW), InputEvent::KeyUp { key: KeyCode::KeyW });
    }

    #[test]
    fn key_accessor_only_for_keyboard_events() {
        assert_eq!(InputEvent::key_down(KeyCode::KeyM).key(), Some(KeyCode::KeyM));
        assert_eq!(InputEvent::key_up(KeyCode::Escape).key(), Some(KeyCode::Escape));
        assert_eq!(InputEvent::MouseButtonDown(MouseButton::Left).key(), None);
        assert_eq!(InputEvent::MouseMoved { dx: 1.0, dy: 2.0 }.key(), None);
        assert_eq!(InputEvent::Unidentified.key(), None);
    }

    #[test]
    fn key_code_serializes_by_variant_name() {
        let json = serde_json::to_string(&KeyCode::KeyW).unwrap();
        assert_eq!(json, "\"KeyW\"");

        let key: KeyCode = serde_json::from_str("\"Escape\"").unwrap();
        assert_eq!(key, KeyCode::Escape);
    }
}
