//=========================================================================
// Play Mode Configuration
//=========================================================================
//
// Tunables of the play mode, loadable from JSON. Every field has a
// default, so a config file only names what it changes:
//
//   { "rotation_speed": 7.5, "mouse_look": true }
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fs;
use std::path::Path;

use glam::Vec4;
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::controls::JointControl;
use crate::core::input::{BindingError, KeyBindings, KeyMap};
use crate::core::render::DirectionalLight;

//=== GoalPlacement =======================================================

/// Where the goal marker's recorded position comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalPlacement {
    /// Use the position the scene gives the goal transform.
    #[default]
    SceneTransform,

    /// Move the goal to a uniformly random point on the sphere of radius
    /// `max_radius` around its parent origin.
    RandomOnSphere,
}

//=== ConfigError =========================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("config is invalid at {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Binding(#[from] BindingError),

    #[error("speed bounds are inverted: min_speed {min} > max_speed {max}")]
    SpeedBounds { min: f32, max: f32 },

    #[error("rotation_speed {speed} is outside [{min}, {max}]")]
    SpeedOutOfRange { speed: f32, min: f32, max: f32 },

    #[error("{field} must be a finite, non-negative number (got {value})")]
    InvalidValue { field: &'static str, value: f32 },

    #[error("joint control {index} has a zero-length axis")]
    ZeroAxis { index: usize },

    #[error("joint control {index} uses camera control {control:?}")]
    CameraControlOnJoint {
        index: usize,
        control: crate::core::input::Control,
    },
}

//=== PlayModeConfig ======================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayModeConfig {
    pub bindings: KeyBindings,

    /// Multiplier applied to speed-scaled joint controls.
    pub rotation_speed: f32,
    pub min_speed: f32,
    pub max_speed: f32,

    /// Radius of the sphere used by [`GoalPlacement::RandomOnSphere`].
    pub max_radius: f32,

    /// Camera movement in units per second.
    pub camera_speed: f32,

    /// Which control turns which joint. Applied in order every update.
    pub joint_controls: Vec<JointControl>,

    /// Seconds between diagnostic snapshots; `0` turns them off.
    pub diagnostics_interval: f32,

    pub goal_placement: GoalPlacement,

    /// Capture the cursor on click and turn the camera with the mouse.
    pub mouse_look: bool,

    /// Draw the control summary in the overlay.
    pub show_help: bool,

    pub clear_color: Vec4,
    pub light: DirectionalLight,
}

impl Default for PlayModeConfig {
    fn default() -> Self {
        Self {
            bindings: KeyBindings::default(),
            rotation_speed: 5.0,
            min_speed: 1.0,
            max_speed: 10.0,
            max_radius: 32.0,
            camera_speed: 30.0,
            joint_controls: JointControl::defaults(),
            diagnostics_interval: 1.0,
            goal_placement: GoalPlacement::SceneTransform,
            mouse_look: false,
            show_help: false,
            clear_color: Vec4::new(0.5, 0.5, 0.5, 1.0),
            light: DirectionalLight::default(),
        }
    }
}

impl PlayModeConfig {
    //--- Loading ----------------------------------------------------------

    /// Reads a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        info!("Loaded play mode config {}", path.display());
        Ok(config)
    }

    /// Parses a JSON config. Missing fields take their defaults.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let mut deserializer = serde_json::Deserializer::from_str(text);
        serde_path_to_error::deserialize(&mut deserializer).map_err(|error| ConfigError::Parse {
            path: error.path().to_string(),
            source: error.into_inner(),
        })
    }

    //--- Validation -------------------------------------------------------

    /// Checks value ranges and builds the key lookup table.
    pub fn validate(&self) -> Result<KeyMap, ConfigError> {
        for (field, value) in [
            ("min_speed", self.min_speed),
            ("max_speed", self.max_speed),
            ("rotation_speed", self.rotation_speed),
            ("max_radius", self.max_radius),
            ("camera_speed", self.camera_speed),
            ("diagnostics_interval", self.diagnostics_interval),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }

        if self.min_speed > self.max_speed {
            return Err(ConfigError::SpeedBounds { min: self.min_speed, max: self.max_speed });
        }
        if !(self.min_speed..=self.max_speed).contains(&self.rotation_speed) {
            return Err(ConfigError::SpeedOutOfRange {
                speed: self.rotation_speed,
                min: self.min_speed,
                max: self.max_speed,
            });
        }

        for (index, joint_control) in self.joint_controls.iter().enumerate() {
            if joint_control.control.resets_each_frame() {
                return Err(ConfigError::CameraControlOnJoint {
                    index,
                    control: joint_control.control,
                });
            }
            if joint_control.axis.length_squared() <= f32::EPSILON {
                return Err(ConfigError::ZeroAxis { index });
            }
        }

        Ok(self.bindings.key_map()?)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
