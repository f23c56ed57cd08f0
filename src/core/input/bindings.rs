//=========================================================================
// Key Bindings
//=========================================================================
//
// Maps physical keys to logical controls.
//
// Architecture:
//   KeyBindings (config) ──key_map()──> KeyMap: HashMap<KeyCode, Binding>
//
// Every control is a pair of keys (negative / positive). Holding exactly
// one of them drives the control in that direction.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::event::KeyCode;

//=== Control =============================================================

/// Logical two-key control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    /// Camera left (negative) / right (positive).
    CameraStrafe,
    /// Camera backward (negative) / forward (positive).
    CameraAdvance,
    /// Root joint, primary axis: counter-clockwise / clockwise.
    RootSwing,
    /// Root joint, secondary axis: counter-clockwise / clockwise.
    RootTilt,
    /// Branch joint: counter-clockwise / clockwise.
    BranchSwing,
}

impl Control {
    pub const ALL: [Control; 5] = [
        Control::CameraStrafe,
        Control::CameraAdvance,
        Control::RootSwing,
        Control::RootTilt,
        Control::BranchSwing,
    ];

    /// Whether the press counters of this control are zeroed at the end of
    /// every update.
    ///
    /// Only the camera controls are reset; joint controls keep counting for
    /// the whole session.
    pub const fn resets_each_frame(self) -> bool {
        matches!(self, Control::CameraStrafe | Control::CameraAdvance)
    }

    /// Whether a key-down of this control is reported as handled.
    ///
    /// Joint key-downs are tracked but passed on; every key-up is handled.
    pub const fn consumes_key_down(self) -> bool {
        matches!(self, Control::CameraStrafe | Control::CameraAdvance)
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Control::CameraStrafe => 0,
            Control::CameraAdvance => 1,
            Control::RootSwing => 2,
            Control::RootTilt => 3,
            Control::BranchSwing => 4,
        }
    }
}

//=== Sign ================================================================

/// Direction within a [`Control`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Negative,
    Positive,
}

impl Sign {
    pub(crate) const fn index(self) -> usize {
        match self {
            Sign::Negative => 0,
            Sign::Positive => 1,
        }
    }
}

//=== AxisBinding =========================================================

/// The two keys driving one control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisBinding {
    pub negative: KeyCode,
    pub positive: KeyCode,
}

impl AxisBinding {
    pub const fn new(negative: KeyCode, positive: KeyCode) -> Self {
        Self { negative, positive }
    }
}

//=== Binding =============================================================

/// What a bound key does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Button(Control, Sign),
    ReleaseMouse,
}

//=== BindingError ========================================================

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BindingError {
    #[error("key {key:?} is bound to both {first:?} and {second:?}")]
    DuplicateKey {
        key: KeyCode,
        first: Binding,
        second: Binding,
    },

    #[error("key {0:?} cannot be bound")]
    Unbindable(KeyCode),
}

//=== KeyBindings =========================================================

/// Key layout for the play mode.
///
/// Defaults: WASD moves the camera, N/M turns the root joint about its
/// primary axis, J/K about its secondary axis, I/O turns the branch joint
/// and Escape releases the mouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub camera_strafe: AxisBinding,
    pub camera_advance: AxisBinding,
    pub root_swing: AxisBinding,
    pub root_tilt: AxisBinding,
    pub branch_swing: AxisBinding,
    pub release_mouse: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            camera_strafe: AxisBinding::new(KeyCode::KeyA, KeyCode::KeyD),
            camera_advance: AxisBinding::new(KeyCode::KeyS, KeyCode::KeyW),
            root_swing: AxisBinding::new(KeyCode::KeyN, KeyCode::KeyM),
            root_tilt: AxisBinding::new(KeyCode::KeyJ, KeyCode::KeyK),
            branch_swing: AxisBinding::new(KeyCode::KeyI, KeyCode::KeyO),
            release_mouse: KeyCode::Escape,
        }
    }
}

impl KeyBindings {
    /// Returns the key pair bound to `control`.
    pub fn axis(&self, control: Control) -> AxisBinding {
        match control {
            Control::CameraStrafe => self.camera_strafe,
            Control::CameraAdvance => self.camera_advance,
            Control::RootSwing => self.root_swing,
            Control::RootTilt => self.root_tilt,
            Control::BranchSwing => self.branch_swing,
        }
    }

    /// Rebinds `control` to a new key pair.
    pub fn set_axis(&mut self, control: Control, binding: AxisBinding) {
        let slot = match control {
            Control::CameraStrafe => &mut self.camera_strafe,
            Control::CameraAdvance => &mut self.camera_advance,
            Control::RootSwing => &mut self.root_swing,
            Control::RootTilt => &mut self.root_tilt,
            Control::BranchSwing => &mut self.branch_swing,
        };
        *slot = binding;
    }

    /// Builds the key lookup table.
    ///
    /// # Errors
    ///
    /// Fails if a key is used twice or if `Unidentified` is bound.
    pub fn key_map(&self) -> Result<KeyMap, BindingError> {
        let mut keys = HashMap::with_capacity(Control::ALL.len() * 2 + 1);

        let entries = Control::ALL
            .iter()
            .flat_map(|&control| {
                let axis = self.axis(control);
                [
                    (axis.negative, Binding::Button(control, Sign::Negative)),
                    (axis.positive, Binding::Button(control, Sign::Positive)),
                ]
            })
            .chain(std::iter::once((self.release_mouse, Binding::ReleaseMouse)));

        for (key, binding) in entries {
            if key == KeyCode::Unidentified {
                return Err(BindingError::Unbindable(key));
            }
            if let Some(&first) = keys.get(&key) {
                return Err(BindingError::DuplicateKey { key, first, second: binding });
            }
            keys.insert(key, binding);
        }

        Ok(KeyMap { keys })
    }
}

//=== KeyMap ==============================================================

/// Validated key → binding lookup built from [`KeyBindings`].
#[derive(Debug, Clone)]
pub struct KeyMap {
    keys: HashMap<KeyCode, Binding>,
}

impl KeyMap {
    pub fn resolve(&self, key: KeyCode) -> Option<Binding> {
        self.keys.get(&key).copied()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
