//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use reaching_arm::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder};
pub use crate::platform::PlatformError;

// Frame loop
pub use crate::core::mode::Mode;
pub use glam::UVec2;

// Input system
pub use crate::core::input::{Control, InputEvent, KeyBindings, KeyCode, MouseButton};

// Scene and rendering
pub use crate::core::render::{RecordingRenderer, Renderer, TraceRenderer};
pub use crate::core::scene::{Scene, SceneError};

// Diagnostics
pub use crate::core::diagnostics::ArmSnapshot;

// Play mode
pub use crate::play_mode::{PlayMode, PlayModeConfig, PlayModeError};
