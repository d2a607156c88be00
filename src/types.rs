use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Identifier of a marker stored in the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerId(pub u32);

/// Identifier of a guide curve stored in the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurveId(pub u32);

/// Active perspective construction mode. Gates which marker roles and
/// generators are live; switching runs the transition table in
/// [`crate::rig::modes`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PerspectiveMode {
    #[default]
    None,
    OnePoint,
    TwoPoint,
    ThreePoint,
    FishEye,
}

/// RGBA display color, components in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::opaque(0.8, 0.8, 0.8)
    }
}

/// Piecewise-linear run of 3D points. `cyclic` closes the run back onto
/// its first point when rendered.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Polyline {
    pub points: Vec<Point3<f32>>,
    pub cyclic: bool,
}

impl Polyline {
    pub fn open(points: Vec<Point3<f32>>) -> Self {
        Self {
            points,
            cyclic: false,
        }
    }

    pub fn closed(points: Vec<Point3<f32>>) -> Self {
        Self {
            points,
            cyclic: true,
        }
    }

    /// Two-point open polyline.
    pub fn segment(a: Point3<f32>, b: Point3<f32>) -> Self {
        Self::open(vec![a, b])
    }

    /// First and last point of the run, if it has at least two points.
    pub fn endpoints(&self) -> Option<(Point3<f32>, Point3<f32>)> {
        if self.points.len() < 2 {
            return None;
        }
        Some((self.points[0], self.points[self.points.len() - 1]))
    }

    pub fn is_two_point(&self) -> bool {
        self.points.len() == 2
    }
}

/// Render style shared by guide curves: bevel thickness plus an emissive
/// color with opacity.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CurveStyle {
    pub thickness: f32,
    pub color: Color,
    pub opacity: f32,
}

impl Default for CurveStyle {
    fn default() -> Self {
        Self {
            thickness: 0.01,
            color: Color::default(),
            opacity: 0.8,
        }
    }
}
