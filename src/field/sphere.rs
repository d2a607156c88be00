//! Spherical fisheye cage: longitude meridians and latitude rings.

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::types::Polyline;

/// Parameters for the spherical cage.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SphereCageSpec {
    pub center: Point3<f32>,
    pub radius: f32,
    pub longitudes: i32,
    /// Interior rings only; the poles themselves are never rings.
    pub latitudes: i32,
    /// Sample count per curve; every polyline has `segments + 1` points.
    pub segments: i32,
    /// Anisotropic scale applied to the X axis for fisheye stretching.
    pub horizontal_scale: f32,
    pub draw_latitudes: bool,
}

/// One open polyline per longitude, sampled pole to pole.
pub fn longitude_lines(spec: &SphereCageSpec) -> Vec<Polyline> {
    if spec.longitudes <= 0 || spec.segments < 2 {
        return Vec::new();
    }
    let lon = spec.longitudes as usize;
    let segs = spec.segments as usize;
    let mut lines = Vec::with_capacity(lon);
    for i in 0..lon {
        let phi = 2.0 * std::f32::consts::PI * i as f32 / lon as f32;
        let mut points = Vec::with_capacity(segs + 1);
        for j in 0..=segs {
            let theta = std::f32::consts::PI * j as f32 / segs as f32;
            let x = spec.radius * theta.sin() * phi.cos() * spec.horizontal_scale;
            let y = spec.radius * theta.sin() * phi.sin();
            let z = spec.radius * theta.cos();
            points.push(spec.center + nalgebra::Vector3::new(x, y, z));
        }
        lines.push(Polyline::open(points));
    }
    lines
}

/// One closed polyline per interior latitude ring. Ring `i` sits at polar
/// angle `π·i / (latitudes + 1)`, so the poles are excluded.
pub fn latitude_rings(spec: &SphereCageSpec) -> Vec<Polyline> {
    if !spec.draw_latitudes || spec.latitudes <= 0 || spec.segments < 2 {
        return Vec::new();
    }
    let lat = spec.latitudes as usize;
    let segs = spec.segments as usize;
    let mut rings = Vec::with_capacity(lat);
    for i in 1..=lat {
        let theta = std::f32::consts::PI * i as f32 / (lat + 1) as f32;
        let ring_radius = spec.radius * theta.sin();
        let z = spec.radius * theta.cos();
        let mut points = Vec::with_capacity(segs + 1);
        for j in 0..=segs {
            let phi = 2.0 * std::f32::consts::PI * j as f32 / segs as f32;
            let x = ring_radius * phi.cos() * spec.horizontal_scale;
            let y = ring_radius * phi.sin();
            points.push(spec.center + nalgebra::Vector3::new(x, y, z));
        }
        rings.push(Polyline::closed(points));
    }
    rings
}

/// Longitudes followed by latitude rings.
pub fn sphere_cage(spec: &SphereCageSpec) -> Vec<Polyline> {
    let mut cage = longitude_lines(spec);
    cage.extend(latitude_rings(spec));
    cage
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> SphereCageSpec {
        SphereCageSpec {
            center: Point3::new(1.0, -2.0, 0.5),
            radius: 10.0,
            longitudes: 6,
            latitudes: 3,
            segments: 16,
            horizontal_scale: 1.0,
            draw_latitudes: true,
        }
    }

    #[test]
    fn longitudes_run_pole_to_pole() {
        let s = spec();
        let lines = longitude_lines(&s);
        assert_eq!(lines.len(), 6);
        let north = s.center + nalgebra::Vector3::new(0.0, 0.0, s.radius);
        let south = s.center + nalgebra::Vector3::new(0.0, 0.0, -s.radius);
        for line in &lines {
            assert_eq!(line.points.len(), 17);
            assert!(!line.cyclic);
            let (start, end) = line.endpoints().expect("sampled");
            assert!((start - north).norm() < 1e-4);
            assert!((end - south).norm() < 1e-4);
        }
    }

    #[test]
    fn latitude_rings_are_interior_and_closed() {
        let s = spec();
        let rings = latitude_rings(&s);
        assert_eq!(rings.len(), 3);
        for ring in &rings {
            assert_eq!(ring.points.len(), 17);
            assert!(ring.cyclic);
            // Strictly between the poles.
            for p in &ring.points {
                let z = p.z - s.center.z;
                assert!(z.abs() < s.radius - 1e-3);
            }
            // Constant height per ring.
            let z0 = ring.points[0].z;
            assert!(ring.points.iter().all(|p| (p.z - z0).abs() < 1e-4));
        }
    }

    #[test]
    fn horizontal_scale_stretches_x_only() {
        let mut s = spec();
        s.horizontal_scale = 2.0;
        s.longitudes = 1;
        let line = &longitude_lines(&s)[0];
        // phi = 0 meridian: x = 2 * r * sin(theta), y = 0.
        let mid = line.points[8]; // theta = pi/2
        assert!((mid.x - (s.center.x + 20.0)).abs() < 1e-3);
        assert!((mid.y - s.center.y).abs() < 1e-4);
    }

    #[test]
    fn degenerate_counts_yield_nothing() {
        let mut s = spec();
        s.longitudes = 0;
        assert!(longitude_lines(&s).is_empty());
        let mut s = spec();
        s.segments = 1;
        assert!(longitude_lines(&s).is_empty());
        assert!(latitude_rings(&s).is_empty());
        let mut s = spec();
        s.draw_latitudes = false;
        assert!(latitude_rings(&s).is_empty());
        assert_eq!(sphere_cage(&s).len(), 6);
    }
}
