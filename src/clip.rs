//! 2D Liang–Barsky segment clipping against the unit square.
//!
//! Endpoints are camera-normalized device coordinates in [0, 1] x [0, 1].
//! The clip returns the parametric sub-interval of the segment inside the
//! square; callers map the interval back onto the original 3D segment.

use serde::Serialize;

/// Parametric interval `[t_min, t_max]` of a segment inside the viewport,
/// with `t = 0` at the first endpoint and `t = 1` at the second.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ClipInterval {
    pub t_min: f32,
    pub t_max: f32,
}

impl ClipInterval {
    /// True when the segment was not cut at either end.
    pub fn is_full(&self) -> bool {
        self.t_min == 0.0 && self.t_max == 1.0
    }
}

/// Clips the segment `a`-`b` against the unit square.
///
/// Returns `None` when the segment never enters the square: either it is
/// parallel to a boundary and fully outside it, or the running interval
/// inverts. The four slab checks are order-independent.
pub fn clip_unit_square(a: [f32; 2], b: [f32; 2]) -> Option<ClipInterval> {
    let dx = b[0] - a[0];
    let dy = b[1] - a[1];
    let mut t_min = 0.0f32;
    let mut t_max = 1.0f32;

    let p = [-dx, dx, -dy, dy];
    let q = [a[0], 1.0 - a[0], a[1], 1.0 - a[1]];

    for i in 0..4 {
        if p[i] == 0.0 {
            if q[i] < 0.0 {
                return None; // parallel to this boundary and outside it
            }
        } else {
            let r = q[i] / p[i];
            if p[i] < 0.0 {
                t_min = t_min.max(r);
            } else {
                t_max = t_max.min(r);
            }
            if t_min > t_max {
                return None;
            }
        }
    }
    Some(ClipInterval { t_min, t_max })
}
