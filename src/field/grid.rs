//! Planar reference grids on the faces of an axis-aligned box.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// One face of the reference box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoxFace {
    Front,
    Back,
    Top,
    Bottom,
    Left,
    Right,
}

/// A single plane grid: `subs_u + 1` lines swept along the V axis and
/// `subs_v + 1` lines swept along the U axis.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct PlaneGridSpec {
    pub center: Point3<f32>,
    pub u_axis: Vector3<f32>,
    pub v_axis: Vector3<f32>,
    pub size_u: f32,
    pub size_v: f32,
    pub subs_u: i32,
    pub subs_v: i32,
}

pub fn plane_grid(spec: &PlaneGridSpec) -> Vec<[Point3<f32>; 2]> {
    let subs_u = spec.subs_u.max(1) as usize;
    let subs_v = spec.subs_v.max(1) as usize;
    let half_u = spec.size_u * 0.5;
    let half_v = spec.size_v * 0.5;
    let mut lines = Vec::with_capacity(subs_u + subs_v + 2);

    // Lines along V (varying U).
    for i in 0..=subs_u {
        let t = i as f32 / subs_u as f32 - 0.5;
        let offset = spec.u_axis * (t * spec.size_u);
        lines.push([
            spec.center + offset - spec.v_axis * half_v,
            spec.center + offset + spec.v_axis * half_v,
        ]);
    }
    // Lines along U (varying V).
    for i in 0..=subs_v {
        let t = i as f32 / subs_v as f32 - 0.5;
        let offset = spec.v_axis * (t * spec.size_v);
        lines.push([
            spec.center + offset - spec.u_axis * half_u,
            spec.center + offset + spec.u_axis * half_u,
        ]);
    }
    lines
}

/// Grids for the requested faces of a box centered at `center` with full
/// extents `size`, one entry per face in input order.
pub fn box_grid(
    center: Point3<f32>,
    size: Vector3<f32>,
    subs_u: i32,
    subs_v: i32,
    faces: &[BoxFace],
) -> Vec<(BoxFace, Vec<[Point3<f32>; 2]>)> {
    faces
        .iter()
        .map(|&face| {
            let spec = face_spec(face, center, size, subs_u, subs_v);
            (face, plane_grid(&spec))
        })
        .collect()
}

fn face_spec(
    face: BoxFace,
    center: Point3<f32>,
    size: Vector3<f32>,
    subs_u: i32,
    subs_v: i32,
) -> PlaneGridSpec {
    let half = size * 0.5;
    match face {
        // Front/back lie in the XZ extent offset along Y; U is Z, V is X.
        BoxFace::Front => PlaneGridSpec {
            center: center + Vector3::new(0.0, half.y, 0.0),
            u_axis: Vector3::z(),
            v_axis: Vector3::x(),
            size_u: size.z,
            size_v: size.x,
            subs_u: subs_v,
            subs_v: subs_u,
        },
        BoxFace::Back => PlaneGridSpec {
            center: center - Vector3::new(0.0, half.y, 0.0),
            u_axis: Vector3::z(),
            v_axis: Vector3::x(),
            size_u: size.z,
            size_v: size.x,
            subs_u: subs_v,
            subs_v: subs_u,
        },
        // Top/bottom lie in the XY extent offset along Z; U is X, V is Y.
        BoxFace::Top => PlaneGridSpec {
            center: center + Vector3::new(0.0, 0.0, half.z),
            u_axis: Vector3::x(),
            v_axis: Vector3::y(),
            size_u: size.x,
            size_v: size.y,
            subs_u,
            subs_v,
        },
        BoxFace::Bottom => PlaneGridSpec {
            center: center - Vector3::new(0.0, 0.0, half.z),
            u_axis: Vector3::x(),
            v_axis: Vector3::y(),
            size_u: size.x,
            size_v: size.y,
            subs_u,
            subs_v,
        },
        // Sides lie in the YZ extent offset along X; U is Y, V is Z.
        BoxFace::Right => PlaneGridSpec {
            center: center + Vector3::new(half.x, 0.0, 0.0),
            u_axis: Vector3::y(),
            v_axis: Vector3::z(),
            size_u: size.y,
            size_v: size.z,
            subs_u,
            subs_v,
        },
        BoxFace::Left => PlaneGridSpec {
            center: center - Vector3::new(half.x, 0.0, 0.0),
            u_axis: Vector3::y(),
            v_axis: Vector3::z(),
            size_u: size.y,
            size_v: size.z,
            subs_u,
            subs_v,
        },
    }
}
