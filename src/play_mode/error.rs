//=========================================================================
// Play Mode Errors
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::config::ConfigError;

//=== ArmRole =============================================================

/// Named transform the play mode needs from its scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArmRole {
    Goal,
    HandleRoot,
    HandleBranch,
    Head,
}

impl ArmRole {
    /// Lookup order during construction.
    pub const ALL: [ArmRole; 4] = [
        ArmRole::Goal,
        ArmRole::HandleRoot,
        ArmRole::HandleBranch,
        ArmRole::Head,
    ];

    /// Transform name searched for in the scene.
    pub const fn name(self) -> &'static str {
        match self {
            ArmRole::Goal => "Goal",
            ArmRole::HandleRoot => "HandleRoot",
            ArmRole::HandleBranch => "HandleBranch",
            ArmRole::Head => "Head",
        }
    }

    /// Human-readable label used in error messages.
    pub const fn label(self) -> &'static str {
        match self {
            ArmRole::Goal => "Goal",
            ArmRole::HandleRoot => "Handle root",
            ArmRole::HandleBranch => "Handle branch",
            ArmRole::Head => "Handle head",
        }
    }
}

impl fmt::Display for ArmRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

//=== PlayModeError =======================================================

#[derive(Debug, Error)]
pub enum PlayModeError {
    #[error("{0} not found.")]
    MissingTransform(ArmRole),

    #[error("Expecting scene to have exactly one camera, but it has {found}")]
    CameraCount { found: usize },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
