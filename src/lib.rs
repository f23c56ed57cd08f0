//=========================================================================
// Reaching Arm Library Root
//
// A keyboard-driven jointed arm over a small scene graph.
//
// Responsibilities:
// - Expose the frame-loop contract (`core::Mode`) and its building blocks
// - Provide the arm play mode (`play_mode::PlayMode`)
// - Keep window and OS integration (`platform`) private behind `Engine`
//
// Typical usage:
// ```no_run
// use reaching_arm::prelude::*;
//
// let scene = Scene::load("assets/arm.scene.json")?;
// let mode = PlayMode::new(scene, PlayModeConfig::default())?;
// EngineBuilder::new()
//     .build(Box::new(mode), Box::new(TraceRenderer::new()))
//     .run()?;
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the platform-independent systems (input, scene, render
// interface, diagnostics). `play_mode` is the arm itself.
//
pub mod core;
pub mod play_mode;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the Winit event loop and window and is not part of the
// public API surface. `engine` is the facade over it.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
pub use platform::PlatformError;
