use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glam::Vec3;
use serde::Serialize;

use crate::camera::CameraIntrinsics;
use crate::config::Config;
use crate::scene::CameraMode;

/// Output tree of one dataset run.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join("data")
    }

    pub fn surface_dir(&self) -> PathBuf {
        self.root.join("surface-images")
    }

    pub fn normal_dir(&self) -> PathBuf {
        self.root.join("normal-maps")
    }

    pub fn depth_dir(&self) -> PathBuf {
        self.root.join("depth-maps")
    }

    pub fn create_dirs(&self) -> Result<()> {
        for dir in [
            self.data_dir(),
            self.surface_dir(),
            self.normal_dir(),
            self.depth_dir(),
        ] {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("creating {}", dir.display()))?;
        }
        Ok(())
    }

    pub fn cell_record_path(&self, stem: &str) -> PathBuf {
        self.data_dir().join(format!("{stem}.json"))
    }

    pub fn const_record_path(&self) -> PathBuf {
        self.data_dir().join("const.json")
    }

    pub fn surface_image_path(&self, stem: &str) -> PathBuf {
        self.surface_dir().join(format!("{stem}.png"))
    }

    pub fn normal_map_path(&self, stem: &str) -> PathBuf {
        self.normal_dir().join(format!("{stem}.png"))
    }

    pub fn depth_map_path(&self, stem: &str) -> PathBuf {
        self.depth_dir().join(format!("{stem}.png"))
    }
}

/// Sphere position for one grid cell. Field names are the dataset contract.
#[derive(Debug, Serialize)]
pub struct CellRecord {
    pub sph_x: f32,
    pub sph_y: f32,
    pub sph_z: f32,
}

impl CellRecord {
    pub fn new(location: Vec3) -> Self {
        Self {
            sph_x: location.x,
            sph_y: location.y,
            sph_z: location.z,
        }
    }
}

/// Run-constant metadata, written once per run next to the cell records.
#[derive(Debug, Serialize)]
pub struct ConstRecord {
    pub sph_rad: f32,
    #[serde(rename = "R_loc")]
    pub r_loc: [f32; 3],
    #[serde(rename = "G_loc")]
    pub g_loc: [f32; 3],
    #[serde(rename = "B_loc")]
    pub b_loc: [f32; 3],
    pub cam_loc: [f32; 3],
    pub mode: CameraMode,
    pub focal: f32,
    pub alpha_u: f32,
    pub alpha_v: f32,
    pub skew: f32,
    pub u_0: f32,
    pub v_0: f32,
    pub min_ht: f32,
    pub max_ht: f32,
}

impl ConstRecord {
    pub fn new(config: &Config, intrinsics: &CameraIntrinsics) -> Self {
        Self {
            sph_rad: config.sphere_radius,
            r_loc: config.light_locations[0],
            g_loc: config.light_locations[1],
            b_loc: config.light_locations[2],
            cam_loc: config.cam_location,
            mode: config.cam_mode,
            focal: intrinsics.focal,
            alpha_u: intrinsics.alpha_u,
            alpha_v: intrinsics.alpha_v,
            skew: intrinsics.skew,
            u_0: intrinsics.u_0,
            v_0: intrinsics.v_0,
            min_ht: config.min_height,
            max_ht: config.max_height,
        }
    }
}

pub fn write_json<T: Serialize>(path: &Path, record: &T) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer(file, record)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraIntrinsics;
    use crate::config::test_config;

    #[test]
    fn layout_paths() {
        let layout = OutputLayout::new("output");

        assert_eq!(
            layout.cell_record_path("3x3_0_1"),
            PathBuf::from("output/data/3x3_0_1.json")
        );
        assert_eq!(
            layout.const_record_path(),
            PathBuf::from("output/data/const.json")
        );
        assert_eq!(
            layout.surface_image_path("3x3_0_1"),
            PathBuf::from("output/surface-images/3x3_0_1.png")
        );
        assert_eq!(
            layout.normal_map_path("3x3_0_1"),
            PathBuf::from("output/normal-maps/3x3_0_1.png")
        );
        assert_eq!(
            layout.depth_map_path("3x3_0_1"),
            PathBuf::from("output/depth-maps/3x3_0_1.png")
        );
    }

    #[test]
    fn cell_record_field_names() {
        let record = CellRecord::new(Vec3::new(-1.0, 1.0, 0.0));
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["sph_x"], -1.0);
        assert_eq!(value["sph_y"], 1.0);
        assert_eq!(value["sph_z"], 0.0);
    }

    #[test]
    fn const_record_field_names() {
        let config = test_config();
        let intrinsics =
            CameraIntrinsics::derive(&config.render_settings(), &config.lens());
        let value =
            serde_json::to_value(ConstRecord::new(&config, &intrinsics)).unwrap();

        for key in [
            "sph_rad", "R_loc", "G_loc", "B_loc", "cam_loc", "mode", "focal",
            "alpha_u", "alpha_v", "skew", "u_0", "v_0", "min_ht", "max_ht",
        ] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(value["mode"], "ORTHO");
        assert_eq!(value["sph_rad"], 0.5);
        assert_eq!(value["R_loc"], serde_json::json!([4.0, 0.0, 6.0]));
        assert_eq!(value["skew"], 0.0);
    }
}
