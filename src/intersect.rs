//! 3D line–line closest-approach solver.
//!
//! Two hand-placed line segments rarely intersect exactly, so the solver
//! computes the closest points of approach between the two carrier lines
//! (normal-equations solution for the two line parameters) and accepts
//! their midpoint as the intersection estimate when the closest points
//! are within a caller tolerance. Skew pairs beyond tolerance still
//! expose the closest points so a caller can display where the near-miss
//! happened. The solver never returns a mathematically wrong point
//! silently.

use log::debug;
use nalgebra::{Point3, Vector3};
use serde::Serialize;

/// Squared-length floor below which a segment counts as zero-length.
const DEGENERATE_EPS: f32 = 1e-9;
/// Relative determinant floor below which the carrier lines count as parallel.
const PARALLEL_EPS: f32 = 1e-9;

/// Two-point 3D line segment.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Segment3 {
    pub a: Point3<f32>,
    pub b: Point3<f32>,
}

impl Segment3 {
    pub fn new(a: Point3<f32>, b: Point3<f32>) -> Self {
        Self { a, b }
    }

    pub fn direction(&self) -> Vector3<f32> {
        self.b - self.a
    }

    pub fn length(&self) -> f32 {
        self.direction().norm()
    }

    /// Point at parameter `t` along the carrier line (`t = 0` at `a`,
    /// `t = 1` at `b`).
    pub fn point_at(&self, t: f32) -> Point3<f32> {
        self.a + self.direction() * t
    }
}

/// Closest points of approach, one per carrier line.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct ClosestPair {
    pub on_first: Point3<f32>,
    pub on_second: Point3<f32>,
}

impl ClosestPair {
    pub fn distance(&self) -> f32 {
        (self.on_first - self.on_second).norm()
    }

    pub fn distance_squared(&self) -> f32 {
        (self.on_first - self.on_second).norm_squared()
    }

    pub fn midpoint(&self) -> Point3<f32> {
        nalgebra::center(&self.on_first, &self.on_second)
    }
}

/// Why the solver rejected the input before attempting a solve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DegenerateKind {
    /// First segment has near-zero length.
    ZeroLengthFirst,
    /// Second segment has near-zero length.
    ZeroLengthSecond,
    /// Carrier lines are parallel or collinear; no unique closest pair.
    Parallel,
}

/// Outcome of the near-intersection solve.
#[derive(Clone, Copy, Debug, Serialize)]
pub enum SolveOutcome {
    /// Closest points are within tolerance; `point` is their midpoint.
    Intersection {
        point: Point3<f32>,
        closest: ClosestPair,
    },
    /// Lines are skew beyond tolerance. The closest pair is kept for
    /// diagnostic display.
    Skew { closest: ClosestPair },
    /// Input rejected before the linear solve.
    Degenerate(DegenerateKind),
}

impl SolveOutcome {
    pub fn point(&self) -> Option<Point3<f32>> {
        match self {
            SolveOutcome::Intersection { point, .. } => Some(*point),
            _ => None,
        }
    }

    pub fn closest(&self) -> Option<&ClosestPair> {
        match self {
            SolveOutcome::Intersection { closest, .. } | SolveOutcome::Skew { closest } => {
                Some(closest)
            }
            SolveOutcome::Degenerate(_) => None,
        }
    }
}

/// Computes the closest points between the carrier lines of two segments.
///
/// Solves the 2x2 system for the line parameters `t` (first line) and `u`
/// (second line) minimizing the distance `|first(t) - second(u)|`.
/// Zero-length segments are rejected before the solve; a near-singular
/// system reports [`DegenerateKind::Parallel`].
pub fn closest_approach(first: &Segment3, second: &Segment3) -> Result<ClosestPair, DegenerateKind> {
    let d1 = first.direction();
    let d2 = second.direction();

    if d1.norm_squared() < DEGENERATE_EPS {
        return Err(DegenerateKind::ZeroLengthFirst);
    }
    if d2.norm_squared() < DEGENERATE_EPS {
        return Err(DegenerateKind::ZeroLengthSecond);
    }

    // (p1 - p3 + t d1 - u d2) . d1 = 0
    // (p1 - p3 + t d1 - u d2) . d2 = 0
    let a = d1.dot(&d1);
    let b = -d2.dot(&d1);
    let c = d1.dot(&d2);
    let d = -d2.dot(&d2);

    let dp = second.a - first.a;
    let r1 = dp.dot(&d1);
    let r2 = dp.dot(&d2);

    let det = a * d - b * c;
    // det = -(|d1|^2 |d2|^2 - (d1.d2)^2), zero exactly when parallel.
    let scale = a * (-d);
    if det.abs() <= PARALLEL_EPS.max(PARALLEL_EPS * scale) {
        return Err(DegenerateKind::Parallel);
    }

    let t = (r1 * d - b * r2) / det;
    let u = (a * r2 - r1 * c) / det;

    Ok(ClosestPair {
        on_first: first.a + d1 * t,
        on_second: second.a + d2 * u,
    })
}

/// Runs the closest-approach solve and gates the result on `tolerance`.
///
/// The comparison is inclusive: a closest-point distance exactly equal to
/// the tolerance yields an intersection. Negative tolerances behave like
/// zero.
pub fn near_intersection(first: &Segment3, second: &Segment3, tolerance: f32) -> SolveOutcome {
    let pair = match closest_approach(first, second) {
        Ok(pair) => pair,
        Err(kind) => {
            debug!("intersection solve rejected: {kind:?}");
            return SolveOutcome::Degenerate(kind);
        }
    };

    let tol = tolerance.max(0.0);
    if pair.distance_squared() <= tol * tol {
        SolveOutcome::Intersection {
            point: pair.midpoint(),
            closest: pair,
        }
    } else {
        debug!(
            "segments are skew: closest approach {:.5} exceeds tolerance {:.5}",
            pair.distance(),
            tol
        );
        SolveOutcome::Skew { closest: pair }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_point(a: &Point3<f32>, b: &Point3<f32>) -> bool {
        (a - b).norm() < 1e-5
    }

    #[test]
    fn exact_intersection_for_any_tolerance() {
        // X axis and Y axis cross exactly at the origin.
        let first = Segment3::new(Point3::new(-1.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0));
        let second = Segment3::new(Point3::new(0.0, -1.0, 0.0), Point3::new(0.0, 1.0, 0.0));

        for tol in [0.0f32, 1e-6, 0.5] {
            let point = near_intersection(&first, &second, tol)
                .point()
                .expect("exact crossing");
            assert!(approx_point(&point, &Point3::origin()));
        }
    }

    #[test]
    fn intersection_outside_segment_extents() {
        // Carrier lines cross at (2, 0, 0), beyond both segments.
        let first = Segment3::new(Point3::new(0.0, -2.0, 0.0), Point3::new(1.0, -1.0, 0.0));
        let second = Segment3::new(Point3::new(0.0, 2.0, 0.0), Point3::new(1.0, 1.0, 0.0));

        let point = near_intersection(&first, &second, 1e-4)
            .point()
            .expect("carrier lines cross");
        assert!(approx_point(&point, &Point3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn parallel_lines_never_intersect() {
        let first = Segment3::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0));
        let second = Segment3::new(Point3::new(0.0, 1.0, 0.0), Point3::new(1.0, 1.0, 0.0));

        for tol in [0.0f32, 1.0, 1e6] {
            match near_intersection(&first, &second, tol) {
                SolveOutcome::Degenerate(DegenerateKind::Parallel) => {}
                other => panic!("expected parallel rejection, got {other:?}"),
            }
        }
    }

    #[test]
    fn zero_length_segment_rejected() {
        let p = Point3::new(1.0, 2.0, 3.0);
        let degenerate = Segment3::new(p, p);
        let ok = Segment3::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0));

        match closest_approach(&degenerate, &ok) {
            Err(DegenerateKind::ZeroLengthFirst) => {}
            other => panic!("expected zero-length rejection, got {other:?}"),
        }
        match near_intersection(&ok, &degenerate, 1.0) {
            SolveOutcome::Degenerate(DegenerateKind::ZeroLengthSecond) => {}
            other => panic!("expected zero-length rejection, got {other:?}"),
        }
    }

    #[test]
    fn tolerance_gates_skew_lines_inclusively() {
        // X axis at z = 0 and Y axis at z = 1: minimum separation is 1,
        // attained at (0, 0, 0) and (0, 0, 1).
        let first = Segment3::new(Point3::new(-1.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0));
        let second = Segment3::new(Point3::new(0.0, -1.0, 1.0), Point3::new(0.0, 1.0, 1.0));

        match near_intersection(&first, &second, 0.999) {
            SolveOutcome::Skew { closest } => {
                assert!((closest.distance() - 1.0).abs() < 1e-5);
                assert!(approx_point(&closest.on_first, &Point3::new(0.0, 0.0, 0.0)));
                assert!(approx_point(&closest.on_second, &Point3::new(0.0, 0.0, 1.0)));
            }
            other => panic!("expected skew below tolerance, got {other:?}"),
        }

        // tolerance == separation: accepted (inclusive boundary).
        let point = near_intersection(&first, &second, 1.0)
            .point()
            .expect("tolerance equal to separation is accepted");
        assert!(approx_point(&point, &Point3::new(0.0, 0.0, 0.5)));
    }
}
