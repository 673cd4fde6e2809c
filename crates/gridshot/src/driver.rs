use anyhow::Result;

use crate::camera::CameraIntrinsics;
use crate::config::Config;
use crate::host::{RenderHost, RenderPass};
use crate::output::{write_json, CellRecord, ConstRecord, OutputLayout};
use crate::scene::SceneDesc;

/// Drives one dataset run: builds the scene, then walks the grid cell by
/// cell, blocking on each render before moving on.
pub struct Driver<'a> {
    config: &'a Config,
    layout: &'a OutputLayout,
    scene: SceneDesc,
}

impl<'a> Driver<'a> {
    pub fn new(config: &'a Config, layout: &'a OutputLayout) -> Self {
        Self {
            config,
            layout,
            scene: SceneDesc::from_config(config),
        }
    }

    pub fn run(&self, host: &mut dyn RenderHost) -> Result<()> {
        host.clear_scene()?;
        host.add_plane(&self.scene.plane)?;
        for light in &self.scene.lights {
            host.add_light(light)?;
        }
        host.add_camera(&self.scene.camera)?;

        let grid = self.config.grid();
        let mut sphere_in_scene = false;
        for (col, row) in grid.cells() {
            let location = grid.cell_position(col, row);
            if sphere_in_scene {
                host.move_sphere(location)?;
            } else {
                host.add_sphere(&self.scene.sphere, location)?;
                sphere_in_scene = true;
            }

            let stem = grid.cell_stem(col, row);
            write_json(
                &self.layout.cell_record_path(&stem),
                &CellRecord::new(location),
            )?;

            host.render(RenderPass::Surface, &self.layout.surface_image_path(&stem))?;
            host.render(RenderPass::NormalMap, &self.layout.normal_map_path(&stem))?;
            host.render(RenderPass::DepthMap, &self.layout.depth_map_path(&stem))?;
            log::debug!("cell {stem} done");
        }

        let intrinsics =
            CameraIntrinsics::derive(&self.config.render_settings(), &self.config.lens());
        write_json(
            &self.layout.const_record_path(),
            &ConstRecord::new(self.config, &intrinsics),
        )?;

        log::info!("rendered {} grid cells", grid.cell_count());
        Ok(())
    }
}
