use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use glam::Vec3;
use gridshot::camera::LensSettings;
use gridshot::config::Config;
use gridshot::depth::DepthRemap;
use gridshot::host::{RenderHost, RenderPass};
use gridshot::scene::{CameraDesc, LightDesc, PlaneDesc, SphereDesc};

// Assigns a diffuse BSDF material to the active object, creating the
// material on first use.
const MATERIAL_HELPER: &str = r#"
def set_diffuse_material(name):
    ob = bpy.context.active_object
    mat = bpy.data.materials.get(name)
    if mat is None:
        mat = bpy.data.materials.new(name=name)
    if ob.data.materials:
        ob.data.materials[0] = mat
    else:
        ob.data.materials.append(mat)
    mat.use_nodes = True
    old = mat.node_tree.nodes.get("Diffuse BSDF")
    if old is not None:
        mat.node_tree.nodes.remove(old)
    diffuse = mat.node_tree.nodes.new("ShaderNodeBsdfDiffuse")
    out = mat.node_tree.nodes["Material Output"]
    mat.node_tree.links.new(diffuse.outputs["BSDF"], out.inputs["Surface"])
"#;

fn py_vec(v: Vec3) -> String {
    format!("({:?}, {:?}, {:?})", v.x, v.y, v.z)
}

fn py_path(path: &Path) -> String {
    // The host script runs from the launch directory, so relative layout
    // paths stay valid. Forward slashes keep the script portable.
    format!("'{}'", path.display().to_string().replace('\\', "/"))
}

/// `RenderHost` backend that serializes every call into a Python batch
/// script for the host application, launched once at the end of the run.
pub struct BlenderHost {
    script: String,
    script_path: PathBuf,
    remap: DepthRemap,
    lens: LensSettings,
}

impl BlenderHost {
    pub fn new(config: &Config, script_path: PathBuf) -> Self {
        let mut this = Self {
            script: String::new(),
            script_path,
            remap: config.depth_remap(),
            lens: config.lens(),
        };
        this.preamble(config);
        this
    }

    pub fn script(&self) -> &str {
        &self.script
    }

    /// Write the accumulated script to disk.
    pub fn finish(self) -> Result<PathBuf> {
        std::fs::write(&self.script_path, &self.script)
            .with_context(|| format!("writing {}", self.script_path.display()))?;
        log::info!("wrote batch script {}", self.script_path.display());
        Ok(self.script_path)
    }

    fn line(&mut self, line: &str) {
        self.script.push_str(line);
        self.script.push('\n');
    }

    fn preamble(&mut self, config: &Config) {
        self.line("import bpy");
        self.line("");
        self.line("scene = bpy.context.scene");
        self.line("scene.use_nodes = True");
        self.line("tree = scene.node_tree");
        self.line("links = tree.links");
        self.line("");

        let render = &config.render;
        self.line(&format!(
            "scene.render.resolution_x = {}",
            render.resolution[0]
        ));
        self.line(&format!(
            "scene.render.resolution_y = {}",
            render.resolution[1]
        ));
        self.line(&format!(
            "scene.render.resolution_percentage = {}",
            render.resolution_percentage as u32
        ));
        self.line(&format!(
            "scene.render.pixel_aspect_x = {:?}",
            render.pixel_aspect[0]
        ));
        self.line(&format!(
            "scene.render.pixel_aspect_y = {:?}",
            render.pixel_aspect[1]
        ));
        self.line("scene.render.image_settings.file_format = 'PNG'");
        self.line(MATERIAL_HELPER);
    }
}

impl RenderHost for BlenderHost {
    fn clear_scene(&mut self) -> Result<()> {
        self.line("bpy.ops.object.select_all(action='SELECT')");
        self.line("bpy.ops.object.delete()");
        self.line("");
        Ok(())
    }

    fn add_plane(&mut self, plane: &PlaneDesc) -> Result<()> {
        self.line("bpy.ops.mesh.primitive_plane_add()");
        self.line(&format!("set_diffuse_material('{}')", plane.material));
        self.line("");
        Ok(())
    }

    fn add_light(&mut self, light: &LightDesc) -> Result<()> {
        self.line(&format!(
            "light_data = bpy.data.lights.new(name='{}', type='{}')",
            light.name, light.kind
        ));
        self.line(&format!(
            "light_obj = bpy.data.objects.new('{}', light_data)",
            light.name
        ));
        self.line("bpy.context.collection.objects.link(light_obj)");
        self.line(&format!("light_obj.location = {}", py_vec(light.location)));
        self.line(&format!("light_data.energy = {:?}", light.energy));
        self.line(&format!(
            "light_data.shadow_soft_size = {:?}",
            light.radius
        ));
        self.line(&format!(
            "light_data.color = ({:?}, {:?}, {:?})",
            light.color[0], light.color[1], light.color[2]
        ));
        self.line("");
        Ok(())
    }

    fn add_camera(&mut self, camera: &CameraDesc) -> Result<()> {
        self.line(&format!("cam_data = bpy.data.cameras.new('{}')", camera.name));
        self.line(&format!(
            "cam_obj = bpy.data.objects.new('{}', cam_data)",
            camera.name
        ));
        self.line("bpy.context.collection.objects.link(cam_obj)");
        self.line(&format!("cam_obj.location = {}", py_vec(camera.location)));
        self.line(&format!("cam_data.type = '{}'", camera.mode));
        self.line(&format!("cam_data.ortho_scale = {:?}", camera.scale));
        // Lens settings match the intrinsics written to const.json.
        self.line(&format!("cam_data.lens = {:?}", self.lens.focal));
        self.line(&format!(
            "cam_data.sensor_width = {:?}",
            self.lens.sensor_width
        ));
        self.line(&format!(
            "cam_data.sensor_height = {:?}",
            self.lens.sensor_height
        ));
        self.line(&format!("cam_data.sensor_fit = '{}'", self.lens.sensor_fit));
        self.line("scene.camera = cam_obj");
        self.line("");
        Ok(())
    }

    fn add_sphere(&mut self, sphere: &SphereDesc, location: Vec3) -> Result<()> {
        self.line(&format!(
            "bpy.ops.mesh.primitive_ico_sphere_add(subdivisions={}, radius={:?}, location={})",
            sphere.subdivisions,
            sphere.radius,
            py_vec(location)
        ));
        self.line("sph = bpy.context.selected_objects[0]");
        self.line(&format!("sph.name = '{}'", sphere.name));
        self.line(&format!("set_diffuse_material('{}')", sphere.material));
        self.line("");
        Ok(())
    }

    fn move_sphere(&mut self, location: Vec3) -> Result<()> {
        self.line(&format!(
            "bpy.data.objects['sphere'].location = {}",
            py_vec(location)
        ));
        Ok(())
    }

    fn render(&mut self, pass: RenderPass, path: &Path) -> Result<()> {
        match pass {
            RenderPass::Surface => {
                self.line("scene.render.engine = 'BLENDER_EEVEE'");
                self.line("bpy.context.view_layer.use_pass_normal = True");
            }
            RenderPass::NormalMap => {
                self.line("scene.render.engine = 'BLENDER_WORKBENCH'");
                self.line("scene.display.shading.light = 'MATCAP'");
                self.line("scene.display.shading.studio_light = 'check_normal+y.exr'");
            }
            RenderPass::DepthMap => {
                self.line("scene.render.engine = 'BLENDER_EEVEE'");
                self.line("for node in list(tree.nodes):");
                self.line("    tree.nodes.remove(node)");
                self.line("rl = tree.nodes.new('CompositorNodeRLayers')");
                self.line("map_range = tree.nodes.new('CompositorNodeMapRange')");
                self.line(&format!(
                    "map_range.inputs[1].default_value = {:?}",
                    self.remap.min_height
                ));
                self.line(&format!(
                    "map_range.inputs[2].default_value = {:?}",
                    self.remap.max_height
                ));
                self.line(&format!(
                    "map_range.inputs[3].default_value = {:?}",
                    self.remap.map_min
                ));
                self.line(&format!(
                    "map_range.inputs[4].default_value = {:?}",
                    self.remap.map_max
                ));
                self.line("links.new(rl.outputs['Depth'], map_range.inputs[0])");
                self.line("invert = tree.nodes.new('CompositorNodeInvert')");
                self.line("links.new(map_range.outputs[0], invert.inputs[1])");
                self.line("composite = tree.nodes.new('CompositorNodeComposite')");
                // Primary output is the inverted mapped depth, the mapped
                // value passes through on the secondary input.
                self.line("links.new(invert.outputs[0], composite.inputs[0])");
                self.line("links.new(map_range.outputs[0], composite.inputs[1])");
            }
        }
        self.line(&format!("scene.render.filepath = {}", py_path(path)));
        self.line("bpy.ops.render.render(write_still=True)");
        if pass == RenderPass::DepthMap {
            self.line("tree.nodes.remove(composite)");
        }
        self.line("");
        Ok(())
    }
}

/// Run the host application in background mode over a generated script,
/// blocking until it exits.
pub fn launch(host_bin: &str, script: &Path) -> Result<()> {
    log::info!("launching {host_bin} in batch mode");
    let status = std::process::Command::new(host_bin)
        .arg("-b")
        .arg("--python")
        .arg(script)
        .status()
        .with_context(|| format!("spawning {host_bin}"))?;
    if !status.success() {
        bail!("{host_bin} exited with {status}");
    }
    Ok(())
}
