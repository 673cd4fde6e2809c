use std::path::{Path, PathBuf};

use anyhow::Result;
use glam::Vec3;

use crate::scene::{CameraDesc, LightDesc, PlaneDesc, SphereDesc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPass {
    Surface,
    NormalMap,
    DepthMap,
}

/// Seam to the host application that owns the scene graph and the renderer.
///
/// The driver issues every scene mutation and render through this trait and
/// aborts on the first error; backends decide how the calls reach the host.
pub trait RenderHost {
    fn clear_scene(&mut self) -> Result<()>;
    fn add_plane(&mut self, plane: &PlaneDesc) -> Result<()>;
    fn add_light(&mut self, light: &LightDesc) -> Result<()>;
    fn add_camera(&mut self, camera: &CameraDesc) -> Result<()>;
    fn add_sphere(&mut self, sphere: &SphereDesc, location: Vec3) -> Result<()>;
    fn move_sphere(&mut self, location: Vec3) -> Result<()>;
    fn render(&mut self, pass: RenderPass, path: &Path) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    ClearScene,
    AddPlane,
    AddLight { name: String },
    AddCamera { name: String },
    AddSphere { location: Vec3 },
    MoveSphere { location: Vec3 },
    Render { pass: RenderPass, path: PathBuf },
}

/// Records every call it receives, in order. Backend for tests and dry runs.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub calls: Vec<HostCall>,
}

impl RecordingHost {
    pub fn renders(&self) -> impl Iterator<Item = (&RenderPass, &Path)> {
        self.calls.iter().filter_map(|call| match call {
            HostCall::Render { pass, path } => Some((pass, path.as_path())),
            _ => None,
        })
    }
}

impl RenderHost for RecordingHost {
    fn clear_scene(&mut self) -> Result<()> {
        self.calls.push(HostCall::ClearScene);
        Ok(())
    }

    fn add_plane(&mut self, _plane: &PlaneDesc) -> Result<()> {
        self.calls.push(HostCall::AddPlane);
        Ok(())
    }

    fn add_light(&mut self, light: &LightDesc) -> Result<()> {
        self.calls.push(HostCall::AddLight {
            name: light.name.clone(),
        });
        Ok(())
    }

    fn add_camera(&mut self, camera: &CameraDesc) -> Result<()> {
        self.calls.push(HostCall::AddCamera {
            name: camera.name.clone(),
        });
        Ok(())
    }

    fn add_sphere(&mut self, _sphere: &SphereDesc, location: Vec3) -> Result<()> {
        self.calls.push(HostCall::AddSphere { location });
        Ok(())
    }

    fn move_sphere(&mut self, location: Vec3) -> Result<()> {
        self.calls.push(HostCall::MoveSphere { location });
        Ok(())
    }

    fn render(&mut self, pass: RenderPass, path: &Path) -> Result<()> {
        self.calls.push(HostCall::Render {
            pass,
            path: path.to_path_buf(),
        });
        Ok(())
    }
}
