use std::fs;
use std::path::{Path, PathBuf};

use nalgebra::{Point3, Vector3};
use serde::Deserialize;

use crate::camera::Camera;
use crate::rig::options::RigOptions;
use crate::types::PerspectiveMode;

#[derive(Debug, Deserialize)]
pub struct RigDemoConfig {
    pub mode: PerspectiveMode,
    #[serde(default)]
    pub options: RigOptions,
    /// Camera used for trimming; omit to skip the trim stage.
    #[serde(default)]
    pub camera: Option<CameraConfig>,
    pub output: RigDemoOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct CameraConfig {
    pub eye: [f32; 3],
    pub target: [f32; 3],
    #[serde(default = "default_up")]
    pub up: [f32; 3],
    #[serde(default = "default_fov_y_deg")]
    pub fov_y_deg: f32,
    #[serde(default = "default_aspect")]
    pub aspect: f32,
}

fn default_up() -> [f32; 3] {
    [0.0, 0.0, 1.0]
}

fn default_fov_y_deg() -> f32 {
    50.0
}

fn default_aspect() -> f32 {
    16.0 / 9.0
}

impl CameraConfig {
    pub fn resolve(&self) -> Camera {
        Camera::look_at(
            Point3::from(self.eye),
            Point3::from(self.target),
            Vector3::from(self.up),
            self.fov_y_deg.to_radians(),
            self.aspect,
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct RigDemoOutputConfig {
    #[serde(rename = "report_json")]
    pub report_json: PathBuf,
    #[serde(rename = "scene_json")]
    pub scene_json: PathBuf,
}

pub fn load_config(path: &Path) -> Result<RigDemoConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
