use thiserror::Error;

use crate::intersect::ClosestPair;
use crate::scene::{AidGroup, MarkerRole};
use crate::types::PerspectiveMode;

/// Operation failures, split along the three failure categories: geometric
/// non-solutions, missing preconditions, and invalid options. Stale
/// references during bulk mutation are not errors; they are logged and
/// counted in the operation reports.
#[derive(Error, Debug)]
pub enum RigError {
    #[error(
        "aid lines do not intersect: closest approach {distance:.4} exceeds tolerance {tolerance:.4}"
    )]
    NoIntersection {
        distance: f32,
        tolerance: f32,
        /// Closest points on the two aid lines, for diagnostic display.
        closest: ClosestPair,
    },

    #[error("an aid line has near-zero length; move its two markers apart")]
    DegenerateAidSegment,

    #[error("aid lines are parallel; no unique vanishing point exists")]
    ParallelAidLines,

    #[error("operation requires {expected:?} mode, but {actual:?} is active")]
    WrongMode {
        expected: PerspectiveMode,
        actual: PerspectiveMode,
    },

    #[error("aid group {group:?} needs exactly 4 markers, found {found}")]
    IncompleteAidGroup { group: AidGroup, found: usize },

    #[error("no marker with role {role:?} in the scene")]
    MissingMarker { role: MarkerRole },

    #[error("invalid option `{field}`: {reason}")]
    InvalidOption {
        field: &'static str,
        reason: String,
    },
}
