//=========================================================================
// Render Interface
//=========================================================================
//
// The boundary between a mode's draw step and the graphics backend.
//
// Architecture:
// ```text
//   Mode::draw()
//     ├─ set_light()        lit-color program uniforms
//     ├─ clear()            color + depth
//     ├─ set_depth_test()
//     ├─ check_errors()
//     ├─ draw_scene()       full traversal, backend-owned
//     └─ draw_overlay()     screen-space lines / text
// ```
//
// Backends own meshes, pipelines and error reporting. Two backends live
// here: `RecordingRenderer` (keeps every call) and `TraceRenderer` (logs
// every call).
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{Mat4, Vec3, Vec4};
use log::trace;
use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use crate::core::scene::{CameraId, Scene};

//=== Light ===============================================================

/// Single directional light fed to the lit-color program.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectionalLight {
    /// Direction the light travels in, world space.
    pub direction: Vec3,
    pub energy: Vec3,
}

impl DirectionalLight {
    /// Light type id of a directional light in the lit-color program.
    pub const PROGRAM_TYPE: i32 = 1;
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            direction: Vec3::new(0.0, 0.0, -1.0),
            energy: Vec3::new(1.0, 1.0, 0.95),
        }
    }
}

//=== DepthTest ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthTest {
    /// Depth testing on, passing fragments closer than the stored depth.
    Less,
    Disabled,
}

//=== Overlay =============================================================

/// A line of text drawn in overlay space.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayText {
    pub text: String,
    /// Baseline start of the first glyph.
    pub anchor: Vec3,
    /// Glyph advance direction scaled by glyph height.
    pub x_axis: Vec3,
    /// Glyph up direction scaled by glyph height.
    pub y_axis: Vec3,
    /// RGBA, 0-255 per channel.
    pub color: [u8; 4],
}

/// Screen-space line drawing context, built after the scene is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    /// Maps overlay space (x in `[-aspect, aspect]`, y in `[-1, 1]`) to clip
    /// space.
    pub projection: Mat4,
    pub texts: Vec<OverlayText>,
}

impl Overlay {
    /// Empty overlay with the aspect-correcting projection.
    pub fn new(aspect: f32) -> Self {
        Self {
            projection: Mat4::from_scale(Vec3::new(1.0 / aspect, 1.0, 1.0)),
            texts: Vec::new(),
        }
    }

    pub fn draw_text(&mut self, text: OverlayText) {
        self.texts.push(text);
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

//=== Renderer Trait ======================================================

/// Graphics backend driven by [`Mode::draw`](crate::core::Mode::draw).
pub trait Renderer {
    /// Sets the light uniforms of the lit-color program. `light_type` is the
    /// program's light type id (see [`DirectionalLight::PROGRAM_TYPE`]).
    fn set_light(&mut self, light_type: i32, light: &DirectionalLight);

    /// Clears the color and depth buffers.
    fn clear(&mut self, color: Vec4, depth: f32);

    fn set_depth_test(&mut self, test: DepthTest);

    /// Reports (and drains) backend errors produced since the last check.
    fn check_errors(&mut self, stage: &str);

    /// Draws every drawable of `scene` as seen from `camera`.
    fn draw_scene(&mut self, scene: &Scene, camera: CameraId);

    fn draw_overlay(&mut self, overlay: &Overlay);
}

//=== RecordingRenderer ===================================================

/// One recorded [`Renderer`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    SetLight { light_type: i32, light: DirectionalLight },
    Clear { color: Vec4, depth: f32 },
    SetDepthTest(DepthTest),
    CheckErrors(String),
    DrawScene {
        camera: CameraId,
        /// Camera aspect at the time of the call.
        aspect: f32,
        drawables: usize,
    },
    DrawOverlay(Overlay),
}

/// Backend that records every call, for tests and headless runs.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    commands: Vec<RenderCommand>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Returns and clears the recorded calls.
    pub fn take(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Renderer for RecordingRenderer {
    fn set_light(&mut self, light_type: i32, light: &DirectionalLight) {
        self.commands.push(RenderCommand::SetLight { light_type, light: *light });
    }

    fn clear(&mut self, color: Vec4, depth: f32) {
        self.commands.push(RenderCommand::Clear { color, depth });
    }

    fn set_depth_test(&mut self, test: DepthTest) {
        self.commands.push(RenderCommand::SetDepthTest(test));
    }

    fn check_errors(&mut self, stage: &str) {
        self.commands.push(RenderCommand::CheckErrors(stage.to_string()));
    }

    fn draw_scene(&mut self, scene: &Scene, camera: CameraId) {
        self.commands.push(RenderCommand::DrawScene {
            camera,
            aspect: scene.camera(camera).aspect,
            drawables: scene.drawables().len(),
        });
    }

    fn draw_overlay(&mut self, overlay: &Overlay) {
        self.commands.push(RenderCommand::DrawOverlay(overlay.clone()));
    }
}

//=== TraceRenderer =======================================================

/// Backend that logs each call at trace level and draws nothing.
#[derive(Debug, Default)]
pub struct TraceRenderer {
    frames: u64,
}

impl TraceRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of scene draws seen so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for TraceRenderer {
    fn set_light(&mut self, light_type: i32, light: &DirectionalLight) {
        trace!(
            target: "render",
            "light type={} dir={:?} energy={:?}",
            light_type,
            light.direction,
            light.energy
        );
    }

    fn clear(&mut self, color: Vec4, depth: f32) {
        trace!(target: "render", "clear color={:?} depth={}", color, depth);
    }

    fn set_depth_test(&mut self, test: DepthTest) {
        trace!(target: "render", "depth test {:?}", test);
    }

    fn check_errors(&mut self, stage: &str) {
        trace!(target: "render", "no backend errors ({})", stage);
    }

    fn draw_scene(&mut self, scene: &Scene, camera: CameraId) {
        self.frames += 1;
        let view = scene.make_world_to_camera(camera);
        let projection = scene.camera(camera).make_projection();
        for drawable in scene.drawables() {
            let clip = projection * view * scene.make_local_to_world(drawable.transform);
            trace!(
                target: "render",
                "frame {} draw '{}' at clip {:?}",
                self.frames,
                drawable.mesh,
                clip.w_axis
            );
        }
    }

    fn draw_overlay(&mut self, overlay: &Overlay) {
        for text in &overlay.texts {
            trace!(target: "render", "overlay text '{}' at {:?}", text.text, text.anchor);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
