use std::fs;
use std::path::{Path, PathBuf};

use nalgebra::Point3;
use serde::Deserialize;

use crate::intersect::Segment3;

#[derive(Debug, Deserialize)]
pub struct ExtractDemoConfig {
    #[serde(default = "default_tolerance")]
    pub tolerance: f32,
    /// First aid line as two 3D points.
    pub first: [[f32; 3]; 2],
    /// Second aid line as two 3D points.
    pub second: [[f32; 3]; 2],
    pub output: ExtractOutputConfig,
}

fn default_tolerance() -> f32 {
    1e-3
}

impl ExtractDemoConfig {
    pub fn segments(&self) -> (Segment3, Segment3) {
        let seg = |points: &[[f32; 3]; 2]| {
            Segment3::new(Point3::from(points[0]), Point3::from(points[1]))
        };
        (seg(&self.first), seg(&self.second))
    }
}

#[derive(Debug, Deserialize)]
pub struct ExtractOutputConfig {
    #[serde(rename = "result_json")]
    pub result_json: PathBuf,
}

pub fn load_config(path: &Path) -> Result<ExtractDemoConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
