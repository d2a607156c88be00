//! Pinhole camera projection and 3D guide trimming.
//!
//! World points are projected through a right-handed look-at view and a
//! perspective projection into [0, 1] x [0, 1] normalized device
//! coordinates, clipped in 2D with [`crate::clip`], and the resulting
//! parametric interval is mapped back onto the original 3D segment.

use nalgebra::{Isometry3, Perspective3, Point3, Vector3};
use serde::Serialize;

use crate::clip::{clip_unit_square, ClipInterval};

const ZNEAR: f32 = 0.1;
const ZFAR: f32 = 1000.0;
/// View-space depth floor; points closer than this (or behind the eye)
/// cannot be projected meaningfully.
const DEPTH_EPS: f32 = 1e-6;

/// Right-handed pinhole camera looking down its local -Z axis.
#[derive(Clone, Debug)]
pub struct Camera {
    view: Isometry3<f32>,
    projection: Perspective3<f32>,
}

impl Camera {
    /// Camera at `eye` looking at `target`. `fov_y` is the vertical field
    /// of view in radians.
    pub fn look_at(
        eye: Point3<f32>,
        target: Point3<f32>,
        up: Vector3<f32>,
        fov_y: f32,
        aspect: f32,
    ) -> Self {
        Self {
            view: Isometry3::look_at_rh(&eye, &target, &up),
            projection: Perspective3::new(aspect, fov_y, ZNEAR, ZFAR),
        }
    }

    /// Projects a world point into [0, 1]^2 NDC. Returns `None` for
    /// points at or behind the eye plane, or when the projection is not
    /// finite.
    pub fn world_to_ndc(&self, world: &Point3<f32>) -> Option<[f32; 2]> {
        let view = self.view.transform_point(world);
        if view.z >= -DEPTH_EPS {
            return None;
        }
        let clip = self.projection.project_point(&view);
        if !clip.x.is_finite() || !clip.y.is_finite() {
            return None;
        }
        Some([(clip.x + 1.0) * 0.5, (clip.y + 1.0) * 0.5])
    }

    /// Trims the world segment `a`-`b` to the portion visible inside the
    /// camera frame, optionally expanded by `margin` on every side
    /// (margin 0.1 keeps content up to 10% outside the frame).
    ///
    /// The 2D clip runs on the projected endpoints; the clipped `t`
    /// values interpolate the original 3D endpoints, so a segment fully
    /// inside the frame comes back bit-identical.
    pub fn trim_segment(&self, a: &Point3<f32>, b: &Point3<f32>, margin: f32) -> TrimOutcome {
        let (Some(a_ndc), Some(b_ndc)) = (self.world_to_ndc(a), self.world_to_ndc(b)) else {
            return TrimOutcome::BehindCamera;
        };
        let span = 1.0 + 2.0 * margin;
        let widen = |p: [f32; 2]| [(p[0] + margin) / span, (p[1] + margin) / span];

        match clip_unit_square(widen(a_ndc), widen(b_ndc)) {
            Some(interval) => TrimOutcome::Visible {
                a: lerp_point(a, b, interval.t_min),
                b: lerp_point(a, b, interval.t_max),
                interval,
            },
            None => TrimOutcome::Outside,
        }
    }
}

/// Result of trimming a world segment against the camera frame.
#[derive(Clone, Copy, Debug, Serialize)]
pub enum TrimOutcome {
    /// Some portion is visible; `a`/`b` are the trimmed world endpoints.
    Visible {
        a: Point3<f32>,
        b: Point3<f32>,
        interval: ClipInterval,
    },
    /// The segment never enters the frame.
    Outside,
    /// An endpoint is at or behind the eye plane; the segment cannot be
    /// trimmed in 2D.
    BehindCamera,
}

/// Interpolates exactly to `a` at `t = 0` and to `b` at `t = 1`.
fn lerp_point(a: &Point3<f32>, b: &Point3<f32>, t: f32) -> Point3<f32> {
    Point3::from(a.coords * (1.0 - t) + b.coords * t)
}

/// Suggested camera placement for a perspective setup.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Placement {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
}

/// Places the eye `distance` back from `target` along -Y, at `eye_height`
/// above the horizon reference `horizon_z`, looking at the target.
pub fn suggest_placement(
    target: Point3<f32>,
    horizon_z: f32,
    eye_height: f32,
    distance: f32,
) -> Placement {
    Placement {
        eye: Point3::new(target.x, target.y - distance, horizon_z + eye_height),
        target,
    }
}
