use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::Deserialize;

use crate::camera::{LensSettings, RenderSettings, SensorFit};
use crate::depth::DepthRemap;
use crate::grid::Grid;
use crate::scene::{CameraMode, LightKind};

fn default_subdivisions() -> u32 {
    7
}

/// Run configuration, read once at startup and immutable afterwards.
///
/// Light locations and colors are ordered R, G, B.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: String,

    /// Grid dimensions as (columns, rows).
    pub sphere_grid_size: [u32; 2],
    /// World distance between neighbouring grid cells.
    pub sphere_grid_res: f32,
    pub sphere_radius: f32,
    #[serde(default = "default_subdivisions")]
    pub sphere_subdivisions: u32,

    pub light_kind: LightKind,
    pub light_locations: [[f32; 3]; 3],
    pub light_energy: f32,
    pub light_colors: [[f32; 3]; 3],
    pub light_radius: f32,

    pub cam_location: [f32; 3],
    pub cam_mode: CameraMode,
    pub cam_scale: f32,

    /// Depth normalization: input range in world units, output range in
    /// depth-map values.
    pub min_height: f32,
    pub max_height: f32,
    pub map_min: f32,
    pub map_max: f32,

    #[serde(default)]
    pub render: RenderConfig,
}

/// Render and lens settings pushed into the host. Defaults match the host
/// application's own defaults, so omitting the section reproduces the
/// host-default intrinsics.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub resolution: [u32; 2],
    pub resolution_percentage: f32,
    pub pixel_aspect: [f32; 2],
    pub focal: f32,
    pub sensor_width: f32,
    pub sensor_height: f32,
    pub sensor_fit: SensorFit,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            resolution: [1920, 1080],
            resolution_percentage: 100.0,
            pixel_aspect: [1.0, 1.0],
            focal: 50.0,
            sensor_width: 36.0,
            sensor_height: 24.0,
            sensor_fit: SensorFit::Auto,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = ron::de::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            self.sphere_grid_size[0] > 0 && self.sphere_grid_size[1] > 0,
            "sphere_grid_size must be nonzero in both dimensions"
        );
        ensure!(self.sphere_grid_res > 0.0, "sphere_grid_res must be positive");
        ensure!(self.sphere_radius > 0.0, "sphere_radius must be positive");
        ensure!(
            self.max_height > self.min_height,
            "max_height must be greater than min_height"
        );
        ensure!(
            self.render.resolution[0] > 0 && self.render.resolution[1] > 0,
            "render resolution must be nonzero"
        );
        ensure!(
            self.render.resolution_percentage > 0.0,
            "resolution_percentage must be positive"
        );
        Ok(())
    }

    pub fn grid(&self) -> Grid {
        Grid {
            cols: self.sphere_grid_size[0],
            rows: self.sphere_grid_size[1],
            resolution: self.sphere_grid_res,
        }
    }

    pub fn depth_remap(&self) -> DepthRemap {
        DepthRemap {
            min_height: self.min_height,
            max_height: self.max_height,
            map_min: self.map_min,
            map_max: self.map_max,
        }
    }

    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            resolution_x: self.render.resolution[0],
            resolution_y: self.render.resolution[1],
            resolution_percentage: self.render.resolution_percentage,
            pixel_aspect_x: self.render.pixel_aspect[0],
            pixel_aspect_y: self.render.pixel_aspect[1],
        }
    }

    pub fn lens(&self) -> LensSettings {
        LensSettings {
            focal: self.render.focal,
            sensor_width: self.render.sensor_width,
            sensor_height: self.render.sensor_height,
            sensor_fit: self.render.sensor_fit,
        }
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    ron::de::from_str(
        r#"(
            version: "test",
            sphere_grid_size: (3, 3),
            sphere_grid_res: 1.0,
            sphere_radius: 0.5,
            light_kind: POINT,
            light_locations: ((4.0, 0.0, 6.0), (-4.0, 0.0, 6.0), (0.0, 4.0, 6.0)),
            light_energy: 100.0,
            light_colors: ((1.0, 0.0, 0.0), (0.0, 1.0, 0.0), (0.0, 0.0, 1.0)),
            light_radius: 0.25,
            cam_location: (0.0, 0.0, 10.0),
            cam_mode: ORTHO,
            cam_scale: 5.0,
            min_height: 0.0,
            max_height: 10.0,
            map_min: 0.0,
            map_max: 1.0,
        )"#,
    )
    .unwrap()
}
