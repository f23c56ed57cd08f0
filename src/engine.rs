//=========================================================================
// Engine
//
// Application entry point: wires one Mode and one Renderer to a window.
//
// Architecture:
// ```text
//     EngineBuilder  ──build(mode, renderer)──>  Engine  ──run()──>  Platform
//         │                                                   │
//         ├─ with_title()                                     └─ blocks until
//         └─ with_window_size()                                  window closes
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use crate::core::mode::Mode;
use crate::core::render::Renderer;
use crate::platform::{Platform, PlatformError, WindowSettings};

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **Title**: "Reaching Arm"
/// - **Window size**: 1280x720 logical points
///
/// # Examples
///
/// ```no_run
/// use reaching_arm::prelude::*;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let scene = Scene::load("assets/arm.scene.json")?;
/// let mode = PlayMode::new(scene, PlayModeConfig::default())?;
///
/// EngineBuilder::new()
///     .with_title("Arm")
///     .with_window_size(1024, 768)
///     .build(Box::new(mode), Box::new(TraceRenderer::new()))
///     .run()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct EngineBuilder {
    settings: WindowSettings,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            settings: WindowSettings::default(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.settings.title = title.into();
        self
    }

    /// Sets the initial inner size of the window in logical points.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be positive, got {}x{}", width, height);
        self.settings.width = width;
        self.settings.height = height;
        self
    }

    /// Consumes the builder and produces an [`Engine`] driving `mode`.
    pub fn build(self, mode: Box<dyn Mode>, renderer: Box<dyn Renderer>) -> Engine {
        info!(
            "Building engine ('{}', {}x{})",
            self.settings.title, self.settings.width, self.settings.height
        );
        Engine {
            settings: self.settings,
            mode,
            renderer,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Configured application, ready to run. Create via [`EngineBuilder`].
pub struct Engine {
    settings: WindowSettings,
    mode: Box<dyn Mode>,
    renderer: Box<dyn Renderer>,
}

impl Engine {
    /// Opens the window and runs the frame loop on the calling thread until
    /// the window is closed.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// fails while running.
    pub fn run(self) -> Result<(), PlatformError> {
        info!("Starting engine runtime");

        let platform = Platform::new(self.settings, self.mode, self.renderer);
        platform.run()?;

        info!("Engine shutdown complete");
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
