use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Evenly spaced parallel segments offset around a center line.
///
/// Each segment runs `half_extent` either side of its center along
/// `line_dir`; segment centers are spread along `offset_dir`, covering
/// `spacing` symmetrically around `center`. A density of zero yields the
/// single centered line; a negative density yields nothing. Direction
/// vectors are taken as-is (callers pass unit axes).
pub fn parallel_lines(
    center: Point3<f32>,
    line_dir: Vector3<f32>,
    offset_dir: Vector3<f32>,
    half_extent: f32,
    density: i32,
    spacing: f32,
) -> Vec<[Point3<f32>; 2]> {
    if density < 0 {
        return Vec::new();
    }
    let n = density as usize;
    let mut lines = Vec::with_capacity(n + 1);
    for i in 0..=n {
        let offset_factor = if n > 0 {
            (i as f32 / n as f32 - 0.5) * 2.0
        } else {
            0.0
        };
        let line_center = center + offset_dir * (offset_factor * spacing * 0.5);
        lines.push([
            line_center - line_dir * half_extent,
            line_center + line_dir * half_extent,
        ]);
    }
    lines
}

/// Parameters for the two-point vertical fence.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct VerticalFenceSpec {
    pub first_vp: Point3<f32>,
    pub second_vp: Point3<f32>,
    /// Number of gaps; the fence has `density + 1` posts.
    pub density: i32,
    pub height: f32,
    /// Offset of the fence plane along Y from the VP midpoint.
    pub depth_offset: f32,
    /// Scales the spread relative to the VP separation along X.
    pub spacing_factor: f32,
    /// Spread basis when the VPs nearly coincide in X.
    pub fallback_extent: f32,
}

/// Vertical segments spread between two vanishing points on a shared
/// horizon, centered on the horizon height of the first VP.
pub fn vertical_fence(spec: &VerticalFenceSpec) -> Vec<[Point3<f32>; 2]> {
    if spec.density < 0 {
        return Vec::new();
    }
    let n = spec.density as usize;

    let avg_x = (spec.first_vp.x + spec.second_vp.x) * 0.5;
    let avg_y = (spec.first_vp.y + spec.second_vp.y) * 0.5;
    let horizon_z = spec.first_vp.z;
    let vp_x_dist = (spec.first_vp.x - spec.second_vp.x).abs();
    let spread = if vp_x_dist > 0.1 {
        vp_x_dist * spec.spacing_factor
    } else {
        spec.fallback_extent * 0.5 * spec.spacing_factor
    };
    let start_x = avg_x - spread * 0.5;
    let plane_y = avg_y + spec.depth_offset;
    let half_h = spec.height * 0.5;

    let mut lines = Vec::with_capacity(n + 1);
    for i in 0..=n {
        let t = if n > 0 { i as f32 / n as f32 } else { 0.5 };
        let x = start_x + t * spread;
        lines.push([
            Point3::new(x, plane_y, horizon_z - half_h),
            Point3::new(x, plane_y, horizon_z + half_h),
        ]);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn density_zero_is_a_single_centered_line() {
        let lines = parallel_lines(
            Point3::new(0.0, 0.0, 2.0),
            Vector3::x(),
            Vector3::z(),
            5.0,
            0,
            4.0,
        );
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0][0], Point3::new(-5.0, 0.0, 2.0));
        assert_eq!(lines[0][1], Point3::new(5.0, 0.0, 2.0));
    }

    #[test]
    fn density_n_yields_n_plus_one_symmetric_lines() {
        let lines = parallel_lines(Point3::origin(), Vector3::x(), Vector3::z(), 1.0, 4, 2.0);
        assert_eq!(lines.len(), 5);
        // Centers cover [-spacing/2, spacing/2] along the offset axis.
        assert_eq!(lines[0][0].z, -1.0);
        assert_eq!(lines[2][0].z, 0.0);
        assert_eq!(lines[4][0].z, 1.0);
    }

    #[test]
    fn fence_posts_centered_on_horizon() {
        let spec = VerticalFenceSpec {
            first_vp: Point3::new(-10.0, 0.0, 3.0),
            second_vp: Point3::new(10.0, 0.0, 3.0),
            density: 4,
            height: 6.0,
            depth_offset: 1.0,
            spacing_factor: 1.0,
            fallback_extent: 200.0,
        };
        let posts = vertical_fence(&spec);
        assert_eq!(posts.len(), 5);
        for [lo, hi] in &posts {
            assert_eq!(lo.y, 1.0);
            assert_eq!(lo.z, 0.0);
            assert_eq!(hi.z, 6.0);
            assert_eq!(lo.x, hi.x);
        }
        assert_eq!(posts[0][0].x, -10.0);
        assert_eq!(posts[4][0].x, 10.0);
    }

    #[test]
    fn fence_falls_back_when_vps_coincide() {
        let spec = VerticalFenceSpec {
            first_vp: Point3::new(0.0, 0.0, 0.0),
            second_vp: Point3::new(0.05, 0.0, 0.0),
            density: 2,
            height: 2.0,
            depth_offset: 0.0,
            spacing_factor: 1.0,
            fallback_extent: 100.0,
        };
        let posts = vertical_fence(&spec);
        assert_eq!(posts.len(), 3);
        let spread = posts[2][0].x - posts[0][0].x;
        assert!((spread - 50.0).abs() < 1e-4);
    }
}
