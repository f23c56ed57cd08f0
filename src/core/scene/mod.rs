//=========================================================================
// Scene Graph
//=========================================================================
//
// Transforms, cameras, drawables and lights of the loaded scene.
//
// Architecture:
//   Scene
//     ├─ transforms: Vec<Transform>   (parent links by TransformId)
//     ├─ cameras:    Vec<Camera>      (each attached to a transform)
//     ├─ drawables:  Vec<Drawable>    (mesh name per transform)
//     └─ lights:     Vec<Light>
//
// The scene owns every node. Other code holds `TransformId` / `CameraId`
// handles and goes through the scene for access. A parent always has a
// lower index than its children, so the graph cannot contain cycles.
//
//=========================================================================

//=== Module Declarations =================================================

mod description;

//=== External Dependencies ===============================================

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

//=== Public API ==========================================================

pub use description::{
    CameraDescription, LightDescription, SceneDescription, TransformDescription,
};

//=== Handles =============================================================

/// Handle to a [`Transform`] inside a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransformId(usize);

impl TransformId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Handle to a [`Camera`] inside a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CameraId(usize);

impl CameraId {
    pub fn index(self) -> usize {
        self.0
    }
}

//=== SceneError ==========================================================

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to read scene file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("scene description is invalid at {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("transform {child} names parent {parent}, which is not an earlier transform")]
    InvalidParent { child: usize, parent: usize },

    #[error("{kind} {index} refers to transform {transform}, but the scene has {count} transforms")]
    InvalidTransform {
        kind: &'static str,
        index: usize,
        transform: usize,
        count: usize,
    },
}

//=== Transform ===========================================================

/// Scene-graph node: local position, rotation and scale relative to its
/// parent (or to the world when it has none).
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    pub name: String,
    pub parent: Option<TransformId>,
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    /// Identity transform without parent.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    pub fn with_parent(mut self, parent: TransformId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Local → parent matrix: scale, then rotate, then translate.
    ///
    /// Column 0 is the local right axis, column 2 the local back axis.
    pub fn make_local_to_parent(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

//=== Camera ==============================================================

/// Perspective camera attached to a transform (looks down local -Z).
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub transform: TransformId,
    /// Vertical field of view in radians.
    pub fovy: f32,
    /// Width / height, refreshed every draw.
    pub aspect: f32,
    pub near: f32,
}

impl Camera {
    pub const DEFAULT_FOVY: f32 = 1.047_197_6; // 60°
    pub const DEFAULT_NEAR: f32 = 0.01;

    pub fn new(transform: TransformId) -> Self {
        Self {
            transform,
            fovy: Self::DEFAULT_FOVY,
            aspect: 1.0,
            near: Self::DEFAULT_NEAR,
        }
    }

    /// Infinite far-plane perspective projection.
    pub fn make_projection(&self) -> Mat4 {
        Mat4::perspective_infinite_rh(self.fovy, self.aspect, self.near)
    }
}

//=== Drawable ============================================================

/// Associates a transform with a mesh (looked up by name by the renderer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drawable {
    pub transform: TransformId,
    pub mesh: String,
}

//=== Light ===============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightKind {
    Point,
    Hemisphere,
    Spot,
    Directional,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub transform: TransformId,
    pub kind: LightKind,
    pub energy: Vec3,
    /// Cone angle in radians, only meaningful for spot lights.
    pub spot_fov: f32,
}

//=== Scene ===============================================================

#[derive(Debug, Clone, Default)]
pub struct Scene {
    transforms: Vec<Transform>,
    drawables: Vec<Drawable>,
    cameras: Vec<Camera>,
    lights: Vec<Light>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Construction -----------------------------------------------------

    /// Appends a transform. Its parent, if any, must already be present.
    pub fn add_transform(&mut self, transform: Transform) -> Result<TransformId, SceneError> {
        let index = self.transforms.len();
        if let Some(parent) = transform.parent {
            if parent.0 >= index {
                return Err(SceneError::InvalidParent { child: index, parent: parent.0 });
            }
        }
        self.transforms.push(transform);
        Ok(TransformId(index))
    }

    pub fn add_camera(&mut self, camera: Camera) -> Result<CameraId, SceneError> {
        self.check_transform("camera", self.cameras.len(), camera.transform)?;
        self.cameras.push(camera);
        Ok(CameraId(self.cameras.len() - 1))
    }

    pub fn add_drawable(&mut self, drawable: Drawable) -> Result<(), SceneError> {
        self.check_transform("drawable", self.drawables.len(), drawable.transform)?;
        self.drawables.push(drawable);
        Ok(())
    }

    pub fn add_light(&mut self, light: Light) -> Result<(), SceneError> {
        self.check_transform("light", self.lights.len(), light.transform)?;
        self.lights.push(light);
        Ok(())
    }

    //--- Lookup -----------------------------------------------------------

    /// Finds a transform by name. If several share the name, the last one
    /// wins.
    pub fn find_transform(&self, name: &str) -> Option<TransformId> {
        self.transforms
            .iter()
            .rposition(|transform| transform.name == name)
            .map(TransformId)
    }

    pub fn transform(&self, id: TransformId) -> &Transform {
        &self.transforms[id.0]
    }

    pub fn transform_mut(&mut self, id: TransformId) -> &mut Transform {
        &mut self.transforms[id.0]
    }

    pub fn camera(&self, id: CameraId) -> &Camera {
        &self.cameras[id.0]
    }

    pub fn camera_mut(&mut self, id: CameraId) -> &mut Camera {
        &mut self.cameras[id.0]
    }

    pub fn transforms(&self) -> &[Transform] {
        &self.transforms
    }

    pub fn cameras(&self) -> &[Camera] {
        &self.cameras
    }

    /// Handles of all cameras, in scene order.
    pub fn camera_ids(&self) -> impl Iterator<Item = CameraId> {
        (0..self.cameras.len()).map(CameraId)
    }

    pub fn drawables(&self) -> &[Drawable] {
        &self.drawables
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    //--- Spatial Queries --------------------------------------------------

    /// Local → world matrix of `id`, composed through its parents.
    pub fn make_local_to_world(&self, id: TransformId) -> Mat4 {
        let transform = self.transform(id);
        let local = transform.make_local_to_parent();
        match transform.parent {
            Some(parent) => self.make_local_to_world(parent) * local,
            None => local,
        }
    }

    /// World → camera-local matrix.
    pub fn make_world_to_camera(&self, id: CameraId) -> Mat4 {
        self.make_local_to_world(self.camera(id).transform).inverse()
    }

    pub fn world_position(&self, id: TransformId) -> Vec3 {
        self.make_local_to_world(id).w_axis.truncate()
    }

    //--- Internal Helpers -------------------------------------------------

    fn check_transform(
        &self,
        kind: &'static str,
        index: usize,
        transform: TransformId,
    ) -> Result<(), SceneError> {
        if transform.0 < self.transforms.len() {
            Ok(())
        } else {
            Err(SceneError::InvalidTransform {
                kind,
                index,
                transform: transform.0,
                count: self.transforms.len(),
            })
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
