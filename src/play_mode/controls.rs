//=========================================================================
// Joint Controls
//=========================================================================
//
// Table of which control turns which joint, about which axis, how fast.
//
//   control      joint    axis  rate
//   RootSwing    Root     +Z    10° per extent   (extent = elapsed × speed × π)
//   RootTilt     Root     +Y    20° per second
//   BranchSwing  Branch   +Y    20° per second
//
// Increments are right-multiplied onto the joint's current rotation, so
// they accumulate over the session and are applied in table order.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::f32::consts::PI;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use crate::core::input::Control;

//=== Joint ===============================================================

/// Arm joint that a control can turn. The head is only moved through the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Joint {
    Root,
    Branch,
}

//=== RotationRate ========================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum RotationRate {
    /// `degrees_per_extent × extent` degrees per update, scaled by the
    /// mode's rotation speed.
    SpeedScaled { degrees_per_extent: f32 },

    /// `degrees_per_second × elapsed` degrees per update.
    Fixed { degrees_per_second: f32 },
}

impl RotationRate {
    /// Degrees turned over `elapsed` seconds.
    pub fn degrees(self, elapsed: f32, rotation_speed: f32) -> f32 {
        match self {
            RotationRate::SpeedScaled { degrees_per_extent } => {
                degrees_per_extent * extent(elapsed, rotation_speed)
            }
            RotationRate::Fixed { degrees_per_second } => degrees_per_second * elapsed,
        }
    }
}

/// Speed-scaled rotation unit: `elapsed × rotation_speed × π`.
pub fn extent(elapsed: f32, rotation_speed: f32) -> f32 {
    elapsed * rotation_speed * PI
}

//=== JointControl ========================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointControl {
    pub control: Control,
    pub joint: Joint,
    /// Rotation axis in the joint's local frame. Normalized on use.
    pub axis: Vec3,
    pub rate: RotationRate,
}

impl JointControl {
    /// The default table (see module header).
    pub fn defaults() -> Vec<JointControl> {
        vec![
            JointControl {
                control: Control::RootSwing,
                joint: Joint::Root,
                axis: Vec3::Z,
                rate: RotationRate::SpeedScaled { degrees_per_extent: 10.0 },
            },
            JointControl {
                control: Control::RootTilt,
                joint: Joint::Root,
                axis: Vec3::Y,
                rate: RotationRate::Fixed { degrees_per_second: 20.0 },
            },
            JointControl {
                control: Control::BranchSwing,
                joint: Joint::Branch,
                axis: Vec3::Y,
                rate: RotationRate::Fixed { degrees_per_second: 20.0 },
            },
        ]
    }

    /// Rotation to right-multiply onto the joint for one update, or `None`
    /// when `direction` is zero.
    ///
    /// `direction` is the control's axis value: `+1`, `-1` or `0`.
    pub fn increment(&self, direction: f32, elapsed: f32, rotation_speed: f32) -> Option<Quat> {
        if direction == 0.0 {
            return None;
        }
        let degrees = direction * self.rate.degrees(elapsed, rotation_speed);
        Some(Quat::from_axis_angle(self.axis.normalize(), degrees.to_radians()))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
