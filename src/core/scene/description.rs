//=========================================================================
// Scene Description
//=========================================================================
//
// JSON form of a scene, as written by the asset exporter.
//
//   {
//     "transforms": [ { "name": "HandleRoot", "position": [0, 0, 0],
//                       "rotation": [0, 0, 0, 1], "mesh": "Root" }, ... ],
//     "cameras":    [ { "transform": 4, "fovy": 0.9 } ],
//     "lights":     [ { "transform": 5, "kind": "directional",
//                       "energy": [1, 1, 0.95] } ]
//   }
//
// Rotations are quaternions in `[x, y, z, w]` order. Parents and other
// transform references are indices into `transforms`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fs;
use std::path::Path;

use glam::{Quat, Vec3};
use log::{debug, info};
use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use super::{Camera, Drawable, Light, LightKind, Scene, SceneError, Transform, TransformId};

//=== Description Types ===================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    pub transforms: Vec<TransformDescription>,
    #[serde(default)]
    pub cameras: Vec<CameraDescription>,
    #[serde(default)]
    pub lights: Vec<LightDescription>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformDescription {
    pub name: String,
    #[serde(default)]
    pub parent: Option<usize>,
    #[serde(default)]
    pub position: Vec3,
    #[serde(default)]
    pub rotation: Quat,
    #[serde(default = "unit_scale")]
    pub scale: Vec3,
    /// Mesh drawn at this transform, if any.
    #[serde(default)]
    pub mesh: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraDescription {
    pub transform: usize,
    #[serde(default = "default_fovy")]
    pub fovy: f32,
    #[serde(default = "default_near")]
    pub near: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightDescription {
    pub transform: usize,
    pub kind: LightKind,
    #[serde(default = "unit_scale")]
    pub energy: Vec3,
    #[serde(default)]
    pub spot_fov: f32,
}

fn unit_scale() -> Vec3 {
    Vec3::ONE
}

fn default_fovy() -> f32 {
    Camera::DEFAULT_FOVY
}

fn default_near() -> f32 {
    Camera::DEFAULT_NEAR
}

//=== Loading =============================================================

impl Scene {
    /// Reads and builds a scene from a JSON description file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let scene = Self::from_json_str(&text)?;
        info!(
            "Loaded scene {} ({} transforms, {} drawables, {} cameras)",
            path.display(),
            scene.transforms().len(),
            scene.drawables().len(),
            scene.cameras().len()
        );
        Ok(scene)
    }

    /// Parses a JSON description. Errors name the offending field.
    pub fn from_json_str(text: &str) -> Result<Self, SceneError> {
        let mut deserializer = serde_json::Deserializer::from_str(text);
        let description: SceneDescription = serde_path_to_error::deserialize(&mut deserializer)
            .map_err(|error| SceneError::Parse {
                path: error.path().to_string(),
                source: error.into_inner(),
            })?;
        Self::from_description(&description)
    }

    /// Builds a scene from an already parsed description.
    ///
    /// Every transform with a `mesh` gets a matching [`Drawable`].
    pub fn from_description(description: &SceneDescription) -> Result<Self, SceneError> {
        let mut scene = Scene::new();

        for desc in &description.transforms {
            let transform = Transform {
                name: desc.name.clone(),
                parent: desc.parent.map(TransformId),
                position: desc.position,
                rotation: desc.rotation.normalize(),
                scale: desc.scale,
            };
            let id = scene.add_transform(transform)?;

            if let Some(mesh) = &desc.mesh {
                debug!("Drawable '{}' uses mesh '{}'", desc.name, mesh);
                scene.add_drawable(Drawable { transform: id, mesh: mesh.clone() })?;
            }
        }

        for desc in &description.cameras {
            scene.add_camera(Camera {
                transform: TransformId(desc.transform),
                fovy: desc.fovy,
                aspect: 1.0,
                near: desc.near,
            })?;
        }

        for desc in &description.lights {
            scene.add_light(Light {
                transform: TransformId(desc.transform),
                kind: desc.kind,
                energy: desc.energy,
                spot_fov: desc.spot_fov,
            })?;
        }

        Ok(scene)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
