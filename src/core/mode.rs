//=========================================================================
// Mode Trait
//=========================================================================
//
// One interchangeable screen of the application, driven by the platform
// frame loop:
//
//   handle_event()  once per platform event
//   update()        once per frame, with elapsed seconds
//   draw()          once per frame, after update()
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::UVec2;

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;
use crate::core::render::Renderer;

//=== Mode ================================================================

/// Behavior of one application screen.
///
/// # Minimal Implementation
///
/// ```rust
/// # use reaching_arm::prelude::*;
/// struct Idle;
///
/// impl Mode for Idle {
///     fn handle_event(&mut self, _event: &InputEvent, _window_size: UVec2) -> bool {
///         false
///     }
///     fn update(&mut self, _elapsed: f32) {}
///     fn draw(&mut self, _drawable_size: UVec2, _renderer: &mut dyn Renderer) {}
/// }
/// ```
pub trait Mode {
    /// Handles one input event. Returns `true` when the event was consumed.
    fn handle_event(&mut self, event: &InputEvent, window_size: UVec2) -> bool;

    /// Advances the mode by `elapsed` seconds.
    fn update(&mut self, elapsed: f32);

    /// Draws the current frame into a surface of `drawable_size` pixels.
    fn draw(&mut self, drawable_size: UVec2, renderer: &mut dyn Renderer);

    /// Pending cursor capture request: `Some(true)` to grab, `Some(false)`
    /// to release, `None` for no change. Polled after every event.
    fn take_mouse_grab_request(&mut self) -> Option<bool> {
        None
    }

    /// Called when the window loses keyboard focus.
    fn focus_lost(&mut self) {}
}
