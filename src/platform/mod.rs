//=========================================================================
// Platform Subsystem
//
// Drives a Mode from the Winit event loop on the main thread.
//
// Architecture:
// ```text
//  Winit Event Loop
//   ├─ WindowEvent::KeyboardInput ─┐
//   ├─ WindowEvent::MouseInput ────┼─> input_processor ─> Mode::handle_event()
//   ├─ DeviceEvent::MouseMotion ───┘                        │
//   │                                     take_mouse_grab_request() ─> cursor grab
//   ├─ WindowEvent::Focused(false) ─> Mode::focus_lost()
//   └─ WindowEvent::RedrawRequested (frame boundary)
//        ├─ elapsed = now - last frame
//        ├─ Mode::update(elapsed)
//        ├─ Mode::draw(drawable size, renderer)
//        └─ request_redraw()
// ```
//
// Events reach the mode as they arrive, so update() sees every key change
// since the previous frame. Winit requires the main thread on macOS/iOS,
// so this runs on the thread that called `Engine::run()`.
//
//=========================================================================

//=== Submodules ==========================================================

mod input_processor;

//=== External Crates =====================================================

use std::time::Instant;

use glam::UVec2;
use log::*;
use thiserror::Error;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    window::{CursorGrabMode, Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::input::InputEvent;
use crate::core::mode::Mode;
use crate::core::render::Renderer;

//=== PlatformError =======================================================

/// Platform initialization and runtime errors. Both are fatal.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("Event loop creation failed: {0}")]
    EventLoopCreation(#[source] winit::error::EventLoopError),

    #[error("Event loop error: {0}")]
    EventLoopExecution(#[source] winit::error::EventLoopError),
}

//=== WindowSettings ======================================================

/// Window options applied when the window is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WindowSettings {
    pub title: String,
    /// Logical inner size in points.
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Reaching Arm".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

//=== Platform ============================================================

/// Window owner and frame loop for one [`Mode`].
///
/// # Lifecycle
///
/// 1. `Platform::new(settings, mode, renderer)`
/// 2. `platform.run()` blocks on the event loop
/// 3. Winit creates the window through `resumed()`
/// 4. Closing the window exits the loop and `run()` returns
///
/// Not Send/Sync; it must stay on the main thread.
pub(crate) struct Platform {
    settings: WindowSettings,

    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,

    mode: Box<dyn Mode>,
    renderer: Box<dyn Renderer>,

    /// Start of the previous frame; None before the first frame.
    last_frame: Option<Instant>,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    pub fn new(settings: WindowSettings, mode: Box<dyn Mode>, renderer: Box<dyn Renderer>) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            settings,
            window: None,
            mode,
            renderer,
            last_frame: None,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until the window is closed.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// fails while running.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS Winit requirement).
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;
        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Internal Helpers -------------------------------------------------

    fn window_size(&self) -> UVec2 {
        self.window
            .as_ref()
            .map(|window| {
                let size = window.inner_size();
                UVec2::new(size.width, size.height)
            })
            .unwrap_or(UVec2::ZERO)
    }

    /// Hands one event to the mode and applies any cursor request it made.
    fn dispatch(&mut self, event: InputEvent) {
        let consumed = self.mode.handle_event(&event, self.window_size());
        trace!(target: "platform::input", "{:?} (consumed: {})", event, consumed);
        self.apply_grab_request();
    }

    fn apply_grab_request(&mut self) {
        let Some(grab) = self.mode.take_mouse_grab_request() else {
            return;
        };
        let Some(window) = &self.window else {
            return;
        };

        let result = if grab {
            window
                .set_cursor_grab(CursorGrabMode::Confined)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked))
        } else {
            window.set_cursor_grab(CursorGrabMode::None)
        };
        if let Err(e) = result {
            warn!(target: "platform", "Cursor grab change to {} failed: {}", grab, e);
        }
        window.set_cursor_visible(!grab);
        debug!(target: "platform", "Cursor {}", if grab { "grabbed" } else { "released" });
    }

    /// One update/draw step. Elapsed time is zero for the first frame.
    fn frame(&mut self) {
        let now = Instant::now();
        let elapsed = self
            .last_frame
            .map_or(0.0, |last| now.duration_since(last).as_secs_f32());
        self.last_frame = Some(now);

        self.mode.update(elapsed);
        let drawable_size = self.window_size();
        self.mode.draw(drawable_size, self.renderer.as_mut());

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Called when app becomes active (startup or mobile resume).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.settings.title.clone())
            .with_inner_size(LogicalSize::new(self.settings.width, self.settings.height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);
                self.last_frame = None;
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                match input_processor::key_event(key_event.physical_key, key_event.state, key_event.repeat) {
                    Some(event) => self.dispatch(event),
                    None => trace!(target: "platform::input", "Unmapped key ignored"),
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                self.dispatch(input_processor::mouse_button(button, state));
            }

            WindowEvent::Focused(false) => {
                debug!(target: "platform", "Focus lost");
                self.mode.focus_lost();
                self.apply_grab_request();
            }

            WindowEvent::Resized(size) => {
                trace!(target: "platform", "Resized to {}x{}", size.width, size.height);
            }

            WindowEvent::RedrawRequested => self.frame(),

            _ => {}
        }
    }

    /// Raw mouse motion keeps arriving while the cursor is grabbed.
    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.dispatch(input_processor::mouse_motion(delta));
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
