//=========================================================================
// Core Systems
//
// Platform-independent building blocks of the demo:
// - `input`: key codes, bindings and button tracking
// - `scene`: scene graph addressed through index handles
// - `render`: renderer boundary used by draw steps
// - `diagnostics`: rate-limited state reporting
// - `mode`: the frame-loop contract a screen implements
//
//=========================================================================

//=== Public Modules ======================================================

pub mod diagnostics;
pub mod input;
pub mod mode;
pub mod render;
pub mod scene;

//=== Public API ==========================================================

pub use diagnostics::{ArmSnapshot, Diagnostics};
pub use mode::Mode;
