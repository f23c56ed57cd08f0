//=========================================================================
// Input
//
// Everything the play mode knows about the keyboard and mouse:
// - `event`: platform-independent input events and key codes
// - `bindings`: configurable key → control mapping
// - `button`: held state and press counters per control direction
//
//=========================================================================

//=== Submodules ==========================================================

pub mod bindings;
pub mod button;
pub mod event;

//=== Public API ==========================================================

pub use bindings::{AxisBinding, Binding, BindingError, Control, KeyBindings, KeyMap, Sign};
pub use button::{Button, ButtonTracker};
pub use event::{InputEvent, KeyCode, MouseButton};
