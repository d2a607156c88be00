use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Axis-aligned plane selection for planar line fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardinalPlane {
    XY,
    #[default]
    XZ,
    YZ,
}

impl CardinalPlane {
    /// Unit direction at `angle` radians within the plane.
    pub fn direction(&self, angle: f32) -> Vector3<f32> {
        let (sin, cos) = angle.sin_cos();
        match self {
            CardinalPlane::XY => Vector3::new(cos, sin, 0.0),
            CardinalPlane::XZ => Vector3::new(cos, 0.0, sin),
            CardinalPlane::YZ => Vector3::new(0.0, cos, sin),
        }
    }
}

/// Produces `count` rays from `origin` at evenly spaced angles (2π/count)
/// within `plane`, each a two-point segment of length `extension`.
///
/// A zero or negative count yields an empty field, not an error.
pub fn radial_fan(
    origin: Point3<f32>,
    count: i32,
    extension: f32,
    plane: CardinalPlane,
) -> Vec<[Point3<f32>; 2]> {
    if count <= 0 {
        return Vec::new();
    }
    let n = count as usize;
    let mut lines = Vec::with_capacity(n);
    for i in 0..n {
        let angle = 2.0 * std::f32::consts::PI * i as f32 / n as f32;
        let dir = plane.direction(angle);
        lines.push([origin, origin + dir * extension]);
    }
    lines
}
