//=========================================================================
// Play Mode
//=========================================================================
//
// Keyboard-driven jointed arm over a loaded scene.
//
// Architecture:
// ```text
//   InputEvent ──handle_event()──> ButtonTracker
//                                      │
//   update(elapsed) ───────────────────┤
//     ├─ joint controls ──> HandleRoot / HandleBranch rotation
//     ├─ camera controls ─> camera position
//     ├─ Diagnostics::record(head, goal)
//     └─ ButtonTracker::end_frame()
//
//   draw(size, renderer) ──> light, clear, scene, overlay
// ```
//
// The head joint is never driven directly; it follows the chain
// HandleRoot → HandleBranch → Head.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod config;
pub mod controls;
pub mod error;
pub mod goal;

//=== Public API ==========================================================

pub use config::{ConfigError, GoalPlacement, PlayModeConfig};
pub use controls::{extent, Joint, JointControl, RotationRate};
pub use error::{ArmRole, PlayModeError};

//=== External Dependencies ===============================================

use crossbeam_channel::Receiver;
use glam::{Quat, UVec2, Vec2, Vec3};
use log::{debug, info, trace, warn};
use rand::Rng;

//=== Internal Dependencies ===============================================

use crate::core::diagnostics::{ArmSnapshot, Diagnostics};
use crate::core::input::{Binding, ButtonTracker, Control, InputEvent, KeyCode, KeyMap};
use crate::core::mode::Mode;
use crate::core::render::{DepthTest, DirectionalLight, Overlay, OverlayText, Renderer};
use crate::core::scene::{CameraId, Scene, TransformId};

//=== Constants ===========================================================

/// Help text glyph height in overlay units.
const HELP_HEIGHT: f32 = 0.09;

//=== PlayMode ============================================================

pub struct PlayMode {
    scene: Scene,
    config: PlayModeConfig,
    key_map: KeyMap,
    buttons: ButtonTracker,
    rotation_speed: f32,

    goal: TransformId,
    handle_root: TransformId,
    handle_branch: TransformId,
    handle_head: TransformId,
    camera: CameraId,
    goal_position: Vec3,

    mouse_captured: bool,
    grab_request: Option<bool>,
    diagnostics: Diagnostics,
}

impl PlayMode {
    //--- Construction -----------------------------------------------------

    /// Builds the mode over `scene`, seeding any random placement from the
    /// thread RNG.
    ///
    /// # Errors
    ///
    /// - [`PlayModeError::Config`] if `config` fails validation
    /// - [`PlayModeError::MissingTransform`] for the first of Goal,
    ///   HandleRoot, HandleBranch, Head the scene lacks
    /// - [`PlayModeError::CameraCount`] unless the scene has exactly one
    ///   camera
    pub fn new(scene: Scene, config: PlayModeConfig) -> Result<Self, PlayModeError> {
        Self::with_rng(scene, config, &mut rand::thread_rng())
    }

    /// Same as [`PlayMode::new`] with an explicit random source.
    pub fn with_rng<R: Rng + ?Sized>(
        mut scene: Scene,
        config: PlayModeConfig,
        rng: &mut R,
    ) -> Result<Self, PlayModeError> {
        let key_map = config.validate()?;

        let find = |role: ArmRole| {
            scene
                .find_transform(role.name())
                .ok_or(PlayModeError::MissingTransform(role))
        };
        let goal = find(ArmRole::Goal)?;
        let handle_root = find(ArmRole::HandleRoot)?;
        let handle_branch = find(ArmRole::HandleBranch)?;
        let handle_head = find(ArmRole::Head)?;

        let found = scene.cameras().len();
        let camera = match (found, scene.camera_ids().next()) {
            (1, Some(camera)) => camera,
            _ => return Err(PlayModeError::CameraCount { found }),
        };

        let goal_position = match config.goal_placement {
            GoalPlacement::SceneTransform => scene.transform(goal).position,
            GoalPlacement::RandomOnSphere => {
                let position = goal::random_on_sphere(rng, config.max_radius);
                scene.transform_mut(goal).position = position;
                position
            }
        };
        info!(
            "Goal position: {:.3}, {:.3}, {:.3}",
            goal_position.x, goal_position.y, goal_position.z
        );

        Ok(Self {
            rotation_speed: config.rotation_speed,
            diagnostics: Diagnostics::new(config.diagnostics_interval),
            scene,
            config,
            key_map,
            buttons: ButtonTracker::new(),
            goal,
            handle_root,
            handle_branch,
            handle_head,
            camera,
            goal_position,
            mouse_captured: false,
            grab_request: None,
        })
    }

    //--- Accessors --------------------------------------------------------

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn config(&self) -> &PlayModeConfig {
        &self.config
    }

    pub fn buttons(&self) -> &ButtonTracker {
        &self.buttons
    }

    pub fn camera(&self) -> CameraId {
        self.camera
    }

    /// Transform bound to `role`.
    pub fn transform_id(&self, role: ArmRole) -> TransformId {
        match role {
            ArmRole::Goal => self.goal,
            ArmRole::HandleRoot => self.handle_root,
            ArmRole::HandleBranch => self.handle_branch,
            ArmRole::Head => self.handle_head,
        }
    }

    /// Goal position recorded at construction.
    pub fn goal_position(&self) -> Vec3 {
        self.goal_position
    }

    pub fn is_mouse_captured(&self) -> bool {
        self.mouse_captured
    }

    pub fn rotation_speed(&self) -> f32 {
        self.rotation_speed
    }

    /// Sets the multiplier of speed-scaled joint controls, clamped to
    /// `[min_speed, max_speed]`. Non-finite values are ignored.
    pub fn set_rotation_speed(&mut self, speed: f32) {
        if !speed.is_finite() {
            warn!("Ignoring non-finite rotation speed {}", speed);
            return;
        }
        self.rotation_speed = speed.clamp(self.config.min_speed, self.config.max_speed);
        debug!("Rotation speed set to {}", self.rotation_speed);
    }

    //--- Diagnostics ------------------------------------------------------

    /// Channel receiving the rate-limited head/goal snapshots.
    pub fn subscribe_diagnostics(&mut self) -> Receiver<ArmSnapshot> {
        self.diagnostics.subscribe()
    }

    /// Head and goal world positions right now.
    pub fn snapshot(&self) -> ArmSnapshot {
        ArmSnapshot {
            head: self.scene.world_position(self.handle_head),
            goal: self.scene.world_position(self.goal),
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn capture_mouse(&mut self) {
        self.mouse_captured = true;
        self.grab_request = Some(true);
        debug!("Mouse captured");
    }

    fn release_mouse(&mut self) {
        if self.mouse_captured {
            self.mouse_captured = false;
            self.grab_request = Some(false);
            debug!("Mouse released");
        }
    }

    /// Turns the camera by relative mouse motion, in window heights.
    fn look(&mut self, dx: f32, dy: f32, window_size: UVec2) {
        if window_size.y == 0 {
            return;
        }
        let height = window_size.y as f32;
        let motion = Vec2::new(dx / height, -dy / height);

        let camera = self.scene.camera(self.camera);
        let (fovy, id) = (camera.fovy, camera.transform);
        let transform = self.scene.transform_mut(id);
        transform.rotation = (transform.rotation
            * Quat::from_axis_angle(Vec3::Y, -motion.x * fovy)
            * Quat::from_axis_angle(Vec3::X, motion.y * fovy))
        .normalize();
    }

    fn apply_joint_controls(&mut self, elapsed: f32) {
        for joint_control in &self.config.joint_controls {
            let direction = self.buttons.axis(joint_control.control);
            let Some(delta) = joint_control.increment(direction, elapsed, self.rotation_speed)
            else {
                continue;
            };
            let id = match joint_control.joint {
                Joint::Root => self.handle_root,
                Joint::Branch => self.handle_branch,
            };
            let transform = self.scene.transform_mut(id);
            transform.rotation = transform.rotation * delta;
        }
    }

    fn move_camera(&mut self, elapsed: f32) {
        let movement = Vec2::new(
            self.buttons.axis(Control::CameraStrafe),
            self.buttons.axis(Control::CameraAdvance),
        );
        if movement == Vec2::ZERO {
            return;
        }
        let movement = movement.normalize() * self.config.camera_speed * elapsed;

        let id = self.scene.camera(self.camera).transform;
        let transform = self.scene.transform_mut(id);
        let frame = transform.make_local_to_parent();
        let right = frame.x_axis.truncate();
        let forward = -frame.z_axis.truncate();
        transform.position += movement.x * right + movement.y * forward;
    }

    fn draw_help(&self, overlay: &mut Overlay, aspect: f32, drawable_height: u32) {
        let text = self.help_text();
        let anchor = Vec3::new(-aspect + 0.1 * HELP_HEIGHT, -1.0 + 0.1 * HELP_HEIGHT, 0.0);
        let ofs = 2.0 / drawable_height.max(1) as f32;
        let x_axis = Vec3::new(HELP_HEIGHT, 0.0, 0.0);
        let y_axis = Vec3::new(0.0, HELP_HEIGHT, 0.0);

        overlay.draw_text(OverlayText {
            text: text.clone(),
            anchor,
            x_axis,
            y_axis,
            color: [0x00, 0x00, 0x00, 0x00],
        });
        overlay.draw_text(OverlayText {
            text,
            anchor: anchor + Vec3::new(ofs, ofs, 0.0),
            x_axis,
            y_axis,
            color: [0xff, 0xff, 0xff, 0x00],
        });
    }

    fn help_text(&self) -> String {
        let bindings = &self.config.bindings;
        let pair = |control: Control| {
            let axis = bindings.axis(control);
            format!("{}/{}", key_label(axis.negative), key_label(axis.positive))
        };
        let strafe = bindings.axis(Control::CameraStrafe);
        let advance = bindings.axis(Control::CameraAdvance);

        let mut text = format!(
            "{}{}{}{} moves camera; {} {} turn root; {} turns branch",
            key_label(advance.positive),
            key_label(strafe.negative),
            key_label(advance.negative),
            key_label(strafe.positive),
            pair(Control::RootSwing),
            pair(Control::RootTilt),
            pair(Control::BranchSwing),
        );
        if self.config.mouse_look {
            text.push_str(&format!(
                "; mouse looks; {} ungrabs mouse",
                key_label(bindings.release_mouse).to_lowercase()
            ));
        }
        text
    }
}

/// Short key name for on-screen text: `KeyW` → `W`, `Digit1` → `1`.
fn key_label(key: KeyCode) -> String {
    let name = format!("{:?}", key);
    match name.strip_prefix("Key").or_else(|| name.strip_prefix("Digit")) {
        Some(short) => short.to_string(),
        None => name,
    }
}

//=== Mode Implementation =================================================

impl Mode for PlayMode {
    fn handle_event(&mut self, event: &InputEvent, window_size: UVec2) -> bool {
        trace!(target: "play_mode", "event {:?}", event);
        match *event {
            InputEvent::KeyDown { key, .. } => match self.key_map.resolve(key) {
                Some(Binding::Button(control, sign)) => {
                    self.buttons.press(control, sign);
                    control.consumes_key_down()
                }
                Some(Binding::ReleaseMouse) => {
                    self.release_mouse();
                    true
                }
                None => false,
            },
            InputEvent::KeyUp { key } => match self.key_map.resolve(key) {
                Some(Binding::Button(control, sign)) => {
                    self.buttons.release(control, sign);
                    true
                }
                _ => false,
            },
            InputEvent::MouseButtonDown(_) => {
                if self.mouse_captured {
                    return false;
                }
                if self.config.mouse_look {
                    self.capture_mouse();
                }
                true
            }
            InputEvent::MouseMoved { dx, dy } => {
                if !self.mouse_captured {
                    return false;
                }
                self.look(dx, dy, window_size);
                true
            }
            InputEvent::MouseButtonUp(_) | InputEvent::Unidentified => false,
        }
    }

    fn update(&mut self, elapsed: f32) {
        let elapsed = if elapsed.is_finite() { elapsed.max(0.0) } else { 0.0 };

        self.apply_joint_controls(elapsed);
        self.move_camera(elapsed);

        let scene = &self.scene;
        let (head, goal) = (self.handle_head, self.goal);
        self.diagnostics.record(elapsed, || ArmSnapshot {
            head: scene.world_position(head),
            goal: scene.world_position(goal),
        });

        self.buttons.end_frame();
    }

    fn draw(&mut self, drawable_size: UVec2, renderer: &mut dyn Renderer) {
        if drawable_size.x > 0 && drawable_size.y > 0 {
            self.scene.camera_mut(self.camera).aspect =
                drawable_size.x as f32 / drawable_size.y as f32;
        }
        let aspect = self.scene.camera(self.camera).aspect;

        renderer.set_light(DirectionalLight::PROGRAM_TYPE, &self.config.light);
        renderer.clear(self.config.clear_color, 1.0);
        renderer.set_depth_test(DepthTest::Less);
        renderer.check_errors("setup");
        renderer.draw_scene(&self.scene, self.camera);

        renderer.set_depth_test(DepthTest::Disabled);
        let mut overlay = Overlay::new(aspect);
        if self.config.show_help {
            self.draw_help(&mut overlay, aspect, drawable_size.y);
        }
        renderer.draw_overlay(&overlay);
    }

    fn take_mouse_grab_request(&mut self) -> Option<bool> {
        self.grab_request.take()
    }

    fn focus_lost(&mut self) {
        self.buttons.release_all();
        self.release_mouse();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{MouseButton, Sign};
    use crate::core::render::{RecordingRenderer, RenderCommand};
    use crate::core::scene::{Camera, Transform};
    use glam::Vec4;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const WINDOW: UVec2 = UVec2::new(800, 400);
    const EPS: f32 = 1e-4;

    //=====================================================================
    // Helpers
    //=====================================================================

    /// Root at the origin, branch 4 up, head 4 along +Y from the branch;
    /// goal at (6, 3, 5); one camera with identity rotation.
    fn arm_scene() -> Scene {
        let mut scene = Scene::new();
        let root = scene.add_transform(Transform::new("HandleRoot")).unwrap();
        let branch = scene
            .add_transform(
                Transform::new("HandleBranch")
                    .with_parent(root)
                    .with_position(Vec3::new(0.0, 0.0, 4.0)),
            )
            .unwrap();
        scene
            .add_transform(
                Transform::new("Head")
                    .with_parent(branch)
                    .with_position(Vec3::new(0.0, 4.0, 0.0)),
            )
            .unwrap();
        scene
            .add_transform(Transform::new("Goal").with_position(Vec3::new(6.0, 3.0, 5.0)))
            .unwrap();
        let eye = scene
            .add_transform(Transform::new("Camera").with_position(Vec3::new(0.0, -24.0, 6.0)))
            .unwrap();
        scene.add_camera(Camera::new(eye)).unwrap();
        scene
    }

    fn play_mode() -> PlayMode {
        PlayMode::new(arm_scene(), PlayModeConfig::default()).unwrap()
    }

    fn play_mode_with(config: PlayModeConfig) -> PlayMode {
        PlayMode::new(arm_scene(), config).unwrap()
    }

    fn key_down(mode: &mut PlayMode, key: KeyCode) -> bool {
        mode.handle_event(&InputEvent::key_down(key), WINDOW)
    }

    fn key_up(mode: &mut PlayMode, key: KeyCode) -> bool {
        mode.handle_event(&InputEvent::key_up(key), WINDOW)
    }

    fn rotation(mode: &PlayMode, role: ArmRole) -> Quat {
        mode.scene().transform(mode.transform_id(role)).rotation
    }

    fn camera_position(mode: &PlayMode) -> Vec3 {
        let camera = mode.scene().camera(mode.camera());
        mode.scene().transform(camera.transform).position
    }

    fn camera_rotation(mode: &PlayMode) -> Quat {
        let camera = mode.scene().camera(mode.camera());
        mode.scene().transform(camera.transform).rotation
    }

    fn root_swing(elapsed: f32, speed: f32) -> Quat {
        Quat::from_rotation_z((10.0 * extent(elapsed, speed)).to_radians())
    }

    //=====================================================================
    // Construction
    //=====================================================================

    #[test]
    fn each_missing_role_has_its_own_error() {
        for missing in ArmRole::ALL {
            let mut scene = Scene::new();
            for role in ArmRole::ALL {
                if role != missing {
                    scene.add_transform(Transform::new(role.name())).unwrap();
                }
            }
            let eye = scene.add_transform(Transform::new("Camera")).unwrap();
            scene.add_camera(Camera::new(eye)).unwrap();

            match PlayMode::new(scene, PlayModeConfig::default()) {
                Err(PlayModeError::MissingTransform(role)) => assert_eq!(role, missing),
                other => panic!("expected missing {:?}, got {:?}", missing, other.err()),
            }
        }
    }

    #[test]
    fn goal_is_reported_first() {
        let mut scene = Scene::new();
        let eye = scene.add_transform(Transform::new("Camera")).unwrap();
        scene.add_camera(Camera::new(eye)).unwrap();

        let err = PlayMode::new(scene, PlayModeConfig::default()).err().unwrap();
        assert_eq!(err.to_string(), "Goal not found.");
    }

    #[test]
    fn requires_exactly_one_camera() {
        let mut scene = arm_scene();
        let eye = scene.add_transform(Transform::new("Second")).unwrap();
        scene.add_camera(Camera::new(eye)).unwrap();
        assert!(matches!(
            PlayMode::new(scene, PlayModeConfig::default()),
            Err(PlayModeError::CameraCount { found: 2 })
        ));

        let mut scene = Scene::new();
        for role in ArmRole::ALL {
            scene.add_transform(Transform::new(role.name())).unwrap();
        }
        assert!(matches!(
            PlayMode::new(scene, PlayModeConfig::default()),
            Err(PlayModeError::CameraCount { found: 0 })
        ));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = PlayModeConfig { rotation_speed: 0.5, ..Default::default() };
        assert!(matches!(
            PlayMode::new(arm_scene(), config),
            Err(PlayModeError::Config(ConfigError::SpeedOutOfRange { .. }))
        ));
    }

    #[test]
    fn goal_position_comes_from_scene_by_default() {
        let mode = play_mode();
        assert_eq!(mode.goal_position(), Vec3::new(6.0, 3.0, 5.0));
        assert_eq!(mode.rotation_speed(), 5.0);
    }

    #[test]
    fn random_goal_lies_on_max_radius_sphere() {
        let config = PlayModeConfig {
            goal_placement: GoalPlacement::RandomOnSphere,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        let mode = PlayMode::with_rng(arm_scene(), config, &mut rng).unwrap();

        assert!((mode.goal_position().length() - 32.0).abs() < 1e-3);
        let goal = mode.transform_id(ArmRole::Goal);
        assert_eq!(mode.scene().transform(goal).position, mode.goal_position());
    }

    //=====================================================================
    // Event Handling
    //=====================================================================

    #[test]
    fn camera_keys_are_consumed() {
        let mut mode = play_mode();

        for key in [KeyCode::KeyW, KeyCode::KeyA, KeyCode::KeyS, KeyCode::KeyD] {
            assert!(key_down(&mut mode, key), "{:?} down", key);
            assert!(key_up(&mut mode, key), "{:?} up", key);
        }

        assert!(!key_down(&mut mode, KeyCode::KeyQ));
        assert!(!key_up(&mut mode, KeyCode::KeyQ));
    }

    #[test]
    fn joint_key_downs_pass_through_but_are_tracked() {
        let mut mode = play_mode();

        for key in [
            KeyCode::KeyM,
            KeyCode::KeyN,
            KeyCode::KeyJ,
            KeyCode::KeyK,
            KeyCode::KeyI,
            KeyCode::KeyO,
        ] {
            assert!(!key_down(&mut mode, key), "{:?} down", key);
        }
        assert!(mode.buttons().is_pressed(Control::RootSwing, Sign::Positive));
        assert!(mode.buttons().is_pressed(Control::BranchSwing, Sign::Negative));

        for key in [
            KeyCode::KeyM,
            KeyCode::KeyN,
            KeyCode::KeyJ,
            KeyCode::KeyK,
            KeyCode::KeyI,
            KeyCode::KeyO,
        ] {
            assert!(key_up(&mut mode, key), "{:?} up", key);
        }
        assert!(!mode.buttons().is_pressed(Control::RootSwing, Sign::Positive));
    }

    #[test]
    fn escape_down_is_consumed_but_not_its_release() {
        let mut mode = play_mode();
        assert!(key_down(&mut mode, KeyCode::Escape));
        assert!(!key_up(&mut mode, KeyCode::Escape));
        assert_eq!(mode.take_mouse_grab_request(), None);
    }

    #[test]
    fn mouse_events_without_mouse_look() {
        let mut mode = play_mode();

        assert!(mode.handle_event(&InputEvent::MouseButtonDown(MouseButton::Left), WINDOW));
        assert!(!mode.is_mouse_captured());
        assert_eq!(mode.take_mouse_grab_request(), None);

        assert!(!mode.handle_event(&InputEvent::MouseMoved { dx: 5.0, dy: 5.0 }, WINDOW));
        assert!(!mode.handle_event(&InputEvent::MouseButtonUp(MouseButton::Left), WINDOW));
        assert!(!mode.handle_event(&InputEvent::Unidentified, WINDOW));
        assert_eq!(camera_rotation(&mode), Quat::IDENTITY);
    }

    #[test]
    fn repeated_key_downs_count_as_presses() {
        let mut mode = play_mode();
        key_down(&mut mode, KeyCode::KeyK);
        mode.handle_event(&InputEvent::KeyDown { key: KeyCode::KeyK, repeat: true }, WINDOW);
        assert_eq!(mode.buttons().button(Control::RootTilt, Sign::Positive).downs, 2);
    }

    //=====================================================================
    // Mouse Look
    //=====================================================================

    #[test]
    fn mouse_look_captures_turns_and_releases() {
        let mut mode = play_mode_with(PlayModeConfig { mouse_look: true, ..Default::default() });

        assert!(mode.handle_event(&InputEvent::MouseButtonDown(MouseButton::Left), WINDOW));
        assert!(mode.is_mouse_captured());
        assert_eq!(mode.take_mouse_grab_request(), Some(true));
        assert_eq!(mode.take_mouse_grab_request(), None);

        // Already captured: clicks pass through.
        assert!(!mode.handle_event(&InputEvent::MouseButtonDown(MouseButton::Left), WINDOW));

        assert!(mode.handle_event(&InputEvent::MouseMoved { dx: 40.0, dy: 0.0 }, WINDOW));
        let fovy = mode.scene().camera(mode.camera()).fovy;
        let expected = Quat::from_axis_angle(Vec3::Y, -0.1 * fovy);
        assert!(camera_rotation(&mode).abs_diff_eq(expected, EPS));

        assert!(key_down(&mut mode, KeyCode::Escape));
        assert!(!mode.is_mouse_captured());
        assert_eq!(mode.take_mouse_grab_request(), Some(false));
        assert!(!mode.handle_event(&InputEvent::MouseMoved { dx: 40.0, dy: 0.0 }, WINDOW));
    }

    #[test]
    fn vertical_motion_pitches_about_local_x() {
        let mut mode = play_mode_with(PlayModeConfig { mouse_look: true, ..Default::default() });
        mode.handle_event(&InputEvent::MouseButtonDown(MouseButton::Left), WINDOW);

        // +dy is down on screen, which pitches the camera down.
        mode.handle_event(&InputEvent::MouseMoved { dx: 0.0, dy: 20.0 }, WINDOW);
        let fovy = mode.scene().camera(mode.camera()).fovy;
        let expected = Quat::from_axis_angle(Vec3::X, -0.05 * fovy);
        assert!(camera_rotation(&mode).abs_diff_eq(expected, EPS));
        assert!(camera_rotation(&mode).is_normalized());
    }

    //=====================================================================
    // Joint Rotation
    //=====================================================================

    #[test]
    fn clockwise_root_for_one_second_at_speed_five() {
        let mut mode = play_mode();
        key_down(&mut mode, KeyCode::KeyM);
        mode.update(1.0);

        let expected = Quat::from_xyzw(0.0, 0.0, 0.980_063, 0.198_687);
        assert!(
            rotation(&mode, ArmRole::HandleRoot).abs_diff_eq(expected, EPS),
            "{:?}",
            rotation(&mode, ArmRole::HandleRoot)
        );
    }

    #[test]
    fn both_or_neither_key_leaves_joint_alone() {
        let mut mode = play_mode();
        mode.update(1.0);
        assert_eq!(rotation(&mode, ArmRole::HandleRoot), Quat::IDENTITY);

        key_down(&mut mode, KeyCode::KeyN);
        key_down(&mut mode, KeyCode::KeyM);
        mode.update(1.0);
        assert_eq!(rotation(&mode, ArmRole::HandleRoot), Quat::IDENTITY);

        key_up(&mut mode, KeyCode::KeyM);
        mode.update(0.5);
        assert!(rotation(&mode, ArmRole::HandleRoot).abs_diff_eq(root_swing(0.5, 5.0).inverse(), EPS));
    }

    #[test]
    fn secondary_root_axis_ignores_rotation_speed() {
        let mut slow = play_mode();
        slow.set_rotation_speed(1.0);
        let mut fast = play_mode();
        fast.set_rotation_speed(10.0);

        for mode in [&mut slow, &mut fast] {
            key_down(mode, KeyCode::KeyK);
            mode.update(0.5);
        }

        let expected = Quat::from_rotation_y(10f32.to_radians());
        assert!(rotation(&slow, ArmRole::HandleRoot).abs_diff_eq(expected, EPS));
        assert!(rotation(&fast, ArmRole::HandleRoot).abs_diff_eq(expected, EPS));
    }

    #[test]
    fn branch_turns_about_y() {
        let mut mode = play_mode();
        key_down(&mut mode, KeyCode::KeyO);
        mode.update(0.5);
        assert!(rotation(&mode, ArmRole::HandleBranch)
            .abs_diff_eq(Quat::from_rotation_y(10f32.to_radians()), EPS));

        key_up(&mut mode, KeyCode::KeyO);
        key_down(&mut mode, KeyCode::KeyI);
        mode.update(0.5);
        assert!(rotation(&mode, ArmRole::HandleBranch).abs_diff_eq(Quat::IDENTITY, EPS));
        assert_eq!(rotation(&mode, ArmRole::HandleRoot), Quat::IDENTITY);
    }

    #[test]
    fn scripted_sequence_composes_in_order() {
        let mut mode = play_mode();

        key_down(&mut mode, KeyCode::KeyM);
        mode.update(0.1);
        key_up(&mut mode, KeyCode::KeyM);

        key_down(&mut mode, KeyCode::KeyK);
        mode.update(0.2);
        key_up(&mut mode, KeyCode::KeyK);

        key_down(&mut mode, KeyCode::KeyN);
        mode.update(0.3);
        key_up(&mut mode, KeyCode::KeyN);

        let q1 = root_swing(0.1, 5.0);
        let q2 = Quat::from_rotation_y(4f32.to_radians());
        let q3 = root_swing(0.3, 5.0).inverse();

        let actual = rotation(&mode, ArmRole::HandleRoot);
        assert!(actual.abs_diff_eq(q1 * q2 * q3, EPS));
        assert!(!actual.abs_diff_eq(q3 * q2 * q1, 1e-3));
    }

    #[test]
    fn head_follows_the_chain() {
        let mut mode = play_mode();
        key_down(&mut mode, KeyCode::KeyK);
        mode.update(4.5); // 90° about the root's Y

        let head = mode.scene().world_position(mode.transform_id(ArmRole::Head));
        assert!(head.abs_diff_eq(Vec3::new(4.0, 4.0, 0.0), EPS), "{:?}", head);
        assert_eq!(rotation(&mode, ArmRole::Head), Quat::IDENTITY);
    }

    #[test]
    fn invalid_elapsed_is_treated_as_zero() {
        let mut mode = play_mode();
        key_down(&mut mode, KeyCode::KeyM);
        key_down(&mut mode, KeyCode::KeyW);
        mode.update(-1.0);
        mode.update(f32::NAN);

        assert!(rotation(&mode, ArmRole::HandleRoot).abs_diff_eq(Quat::IDENTITY, EPS));
        assert_eq!(camera_position(&mode), Vec3::new(0.0, -24.0, 6.0));
    }

    //=====================================================================
    // Rotation Speed
    //=====================================================================

    #[test]
    fn rotation_speed_is_clamped() {
        let mut mode = play_mode();

        mode.set_rotation_speed(50.0);
        assert_eq!(mode.rotation_speed(), 10.0);
        mode.set_rotation_speed(0.0);
        assert_eq!(mode.rotation_speed(), 1.0);
        mode.set_rotation_speed(f32::NAN);
        assert_eq!(mode.rotation_speed(), 1.0);
    }

    //=====================================================================
    // Camera Movement
    //=====================================================================

    #[test]
    fn forward_moves_along_negative_local_z() {
        let mut mode = play_mode();
        key_down(&mut mode, KeyCode::KeyW);
        mode.update(0.5);
        assert!(camera_position(&mode).abs_diff_eq(Vec3::new(0.0, -24.0, -9.0), EPS));
    }

    #[test]
    fn diagonal_displacement_matches_axis_aligned() {
        let start = Vec3::new(0.0, -24.0, 6.0);

        let mut straight = play_mode();
        key_down(&mut straight, KeyCode::KeyD);
        straight.update(0.5);

        let mut diagonal = play_mode();
        key_down(&mut diagonal, KeyCode::KeyD);
        key_down(&mut diagonal, KeyCode::KeyW);
        diagonal.update(0.5);

        let straight_len = (camera_position(&straight) - start).length();
        let diagonal_len = (camera_position(&diagonal) - start).length();
        assert!((straight_len - 15.0).abs() < EPS);
        assert!((diagonal_len - straight_len).abs() < EPS);
    }

    #[test]
    fn movement_respects_camera_orientation() {
        let mut scene = arm_scene();
        let id = scene.find_transform("Camera").unwrap();
        scene.transform_mut(id).rotation = Quat::from_rotation_x(std::f32::consts::FRAC_PI_2);
        let mut mode = PlayMode::new(scene, PlayModeConfig::default()).unwrap();

        // Pitched up 90°: local -Z points along world +Y.
        key_down(&mut mode, KeyCode::KeyW);
        mode.update(0.1);
        assert!(camera_position(&mode).abs_diff_eq(Vec3::new(0.0, -21.0, 6.0), EPS));
    }

    #[test]
    fn camera_counters_reset_but_joint_counters_do_not() {
        let mut mode = play_mode();
        key_down(&mut mode, KeyCode::KeyW);
        key_down(&mut mode, KeyCode::KeyM);
        mode.update(0.016);

        let forward = mode.buttons().button(Control::CameraAdvance, Sign::Positive);
        assert_eq!(forward.downs, 0);
        assert!(forward.pressed);

        let swing = mode.buttons().button(Control::RootSwing, Sign::Positive);
        assert_eq!(swing.downs, 1);
    }

    //=====================================================================
    // Focus
    //=====================================================================

    #[test]
    fn focus_loss_releases_keys_and_mouse() {
        let mut mode = play_mode_with(PlayModeConfig { mouse_look: true, ..Default::default() });
        mode.handle_event(&InputEvent::MouseButtonDown(MouseButton::Left), WINDOW);
        mode.take_mouse_grab_request();
        key_down(&mut mode, KeyCode::KeyM);

        mode.focus_lost();
        mode.update(1.0);

        assert_eq!(rotation(&mode, ArmRole::HandleRoot), Quat::IDENTITY);
        assert!(!mode.is_mouse_captured());
        assert_eq!(mode.take_mouse_grab_request(), Some(false));
    }

    //=====================================================================
    // Diagnostics
    //=====================================================================

    #[test]
    fn update_publishes_world_positions() {
        let mut mode = play_mode();
        let rx = mode.subscribe_diagnostics();

        mode.update(0.016);

        let snapshot = rx.try_recv().unwrap();
        assert!(snapshot.head.abs_diff_eq(Vec3::new(0.0, 4.0, 4.0), EPS));
        assert!(snapshot.goal.abs_diff_eq(Vec3::new(6.0, 3.0, 5.0), EPS));
        assert_eq!(snapshot, mode.snapshot());

        // The head is nested, so its parent-local position is not what is published.
        let head_local = mode.scene().transform(mode.transform_id(ArmRole::Head)).position;
        assert!(head_local.abs_diff_eq(Vec3::new(0.0, 4.0, 0.0), EPS));
        assert!(!snapshot.head.abs_diff_eq(head_local, EPS));

        mode.update(0.016);
        assert!(rx.try_recv().is_err());
    }

    //=====================================================================
    // Drawing
    //=====================================================================

    #[test]
    fn draw_issues_setup_scene_then_overlay() {
        let mut mode = play_mode();
        let mut renderer = RecordingRenderer::new();

        mode.draw(UVec2::new(800, 400), &mut renderer);

        assert_eq!(
            renderer.take(),
            vec![
                RenderCommand::SetLight {
                    light_type: DirectionalLight::PROGRAM_TYPE,
                    light: DirectionalLight::default(),
                },
                RenderCommand::Clear { color: Vec4::new(0.5, 0.5, 0.5, 1.0), depth: 1.0 },
                RenderCommand::SetDepthTest(DepthTest::Less),
                RenderCommand::CheckErrors("setup".to_string()),
                RenderCommand::DrawScene { camera: mode.camera(), aspect: 2.0, drawables: 0 },
                RenderCommand::SetDepthTest(DepthTest::Disabled),
                RenderCommand::DrawOverlay(Overlay::new(2.0)),
            ]
        );
    }

    #[test]
    fn zero_height_keeps_previous_aspect() {
        let mut mode = play_mode();
        let mut renderer = RecordingRenderer::new();

        mode.draw(UVec2::new(800, 400), &mut renderer);
        mode.draw(UVec2::new(800, 0), &mut renderer);

        assert_eq!(mode.scene().camera(mode.camera()).aspect, 2.0);
    }

    #[test]
    fn help_overlay_draws_shadowed_text() {
        let mut mode = play_mode_with(PlayModeConfig { show_help: true, ..Default::default() });
        let mut renderer = RecordingRenderer::new();

        mode.draw(UVec2::new(800, 400), &mut renderer);

        let overlay = renderer
            .commands()
            .iter()
            .find_map(|command| match command {
                RenderCommand::DrawOverlay(overlay) => Some(overlay.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(overlay.texts.len(), 2);

        let (shadow, text) = (&overlay.texts[0], &overlay.texts[1]);
        assert!(shadow.anchor.abs_diff_eq(Vec3::new(-2.0 + 0.009, -1.0 + 0.009, 0.0), 1e-6));
        assert!(text.anchor.abs_diff_eq(shadow.anchor + Vec3::new(0.005, 0.005, 0.0), 1e-6));
        assert_eq!(shadow.color, [0, 0, 0, 0]);
        assert_eq!(text.color, [255, 255, 255, 0]);
        assert_eq!(shadow.x_axis, Vec3::new(HELP_HEIGHT, 0.0, 0.0));
        assert!(text.text.starts_with("WASD moves camera"));
    }

    #[test]
    fn key_labels_drop_prefixes() {
        assert_eq!(key_label(KeyCode::KeyW), "W");
        assert_eq!(key_label(KeyCode::Digit3), "3");
        assert_eq!(key_label(KeyCode::Escape), "Escape");
    }
}
