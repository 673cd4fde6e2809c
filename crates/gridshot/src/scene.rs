use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LightKind {
    Point,
    Sun,
    Spot,
    Area,
}

impl std::fmt::Display for LightKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            LightKind::Point => "POINT",
            LightKind::Sun => "SUN",
            LightKind::Spot => "SPOT",
            LightKind::Area => "AREA",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CameraMode {
    Persp,
    Ortho,
}

impl std::fmt::Display for CameraMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            CameraMode::Persp => "PERSP",
            CameraMode::Ortho => "ORTHO",
        })
    }
}

/// Ground plane under the sphere. The host owns the geometry; only the
/// material name travels with the descriptor.
#[derive(Debug, Clone)]
pub struct PlaneDesc {
    pub material: String,
}

#[derive(Debug, Clone)]
pub struct LightDesc {
    pub name: String,
    pub kind: LightKind,
    pub location: Vec3,
    pub energy: f32,
    pub color: [f32; 3],
    pub radius: f32,
}

#[derive(Debug, Clone)]
pub struct CameraDesc {
    pub name: String,
    pub location: Vec3,
    pub mode: CameraMode,
    pub scale: f32,
}

#[derive(Debug, Clone)]
pub struct SphereDesc {
    pub name: String,
    pub radius: f32,
    pub subdivisions: u32,
    pub material: String,
}

/// Everything the host needs to build the scene, assembled once from config.
#[derive(Debug, Clone)]
pub struct SceneDesc {
    pub plane: PlaneDesc,
    pub lights: [LightDesc; 3],
    pub camera: CameraDesc,
    pub sphere: SphereDesc,
}

impl SceneDesc {
    pub fn from_config(config: &Config) -> Self {
        let light = |name: &str, idx: usize| LightDesc {
            name: name.to_string(),
            kind: config.light_kind,
            location: Vec3::from(config.light_locations[idx]),
            energy: config.light_energy,
            color: config.light_colors[idx],
            radius: config.light_radius,
        };

        Self {
            plane: PlaneDesc {
                material: "plane_mat".to_string(),
            },
            lights: [
                light("light_R", 0),
                light("light_G", 1),
                light("light_B", 2),
            ],
            camera: CameraDesc {
                name: "camera".to_string(),
                location: Vec3::from(config.cam_location),
                mode: config.cam_mode,
                scale: config.cam_scale,
            },
            sphere: SphereDesc {
                name: "sphere".to_string(),
                radius: config.sphere_radius,
                subdivisions: config.sphere_subdivisions,
                material: "sphere_mat".to_string(),
            },
        }
    }
}
