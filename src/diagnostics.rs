//! Serializable reports returned by rig operations.
//!
//! Bulk operations never fail on stale references; instead every report
//! carries the counts a caller (or a demo binary dumping JSON) needs to
//! see what actually happened.

use nalgebra::Point3;
use serde::Serialize;

use crate::rig::modes::TransitionStep;
use crate::scene::{AidGroup, GuideKind};
use crate::types::{CurveId, MarkerId, PerspectiveMode};

/// Outcome of a single transition step during a mode switch.
#[derive(Clone, Debug, Serialize)]
pub struct StepOutcome {
    pub step: TransitionStep,
    pub ok: bool,
    pub error: Option<String>,
}

/// Result of a mode switch: the executed plan with per-step outcomes.
#[derive(Clone, Debug, Serialize)]
pub struct ModeSwitchReport {
    pub from: PerspectiveMode,
    pub to: PerspectiveMode,
    pub steps: Vec<StepOutcome>,
}

impl ModeSwitchReport {
    pub fn all_ok(&self) -> bool {
        self.steps.iter().all(|s| s.ok)
    }
}

/// Result of a guide-generation operation.
#[derive(Clone, Debug, Default, Serialize)]
pub struct GenerateReport {
    /// Curves created by this run.
    pub created: usize,
    /// Curves of the same kinds removed before regeneration.
    pub replaced: usize,
    pub kinds: Vec<GuideKind>,
    pub elapsed_ms: f64,
}

/// Result of a clear operation.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ClearReport {
    pub markers_removed: usize,
    pub curves_removed: usize,
}

/// Result of a merge operation.
#[derive(Clone, Debug, Default, Serialize)]
pub struct MergeReport {
    /// Source curves folded into the merged curve (and removed).
    pub sources_merged: usize,
    /// Polylines the merged curve holds.
    pub polylines: usize,
    pub merged_into: Option<CurveId>,
}

/// Result of trimming guides to the camera frame.
#[derive(Clone, Debug, Default, Serialize)]
pub struct TrimReport {
    /// Two-point polylines rewritten to their visible portion.
    pub trimmed: usize,
    /// Curves hidden because nothing of them is visible.
    pub hidden: usize,
    /// Polylines dropped from partially visible curves.
    pub dropped_polylines: usize,
    /// Polylines left untouched (multi-point runs, endpoints behind the
    /// camera).
    pub skipped: usize,
}

/// Result of a change-notification pass.
#[derive(Clone, Debug, Default, Serialize)]
pub struct NotifyReport {
    /// The handler was already running; nothing was done.
    pub reentrant_skip: bool,
    pub horizon_rebuilt: bool,
    pub aid_lines_refreshed: bool,
    /// Reported ids that no longer resolve to a marker.
    pub stale_markers: usize,
}

/// Result of a successful vanishing-point extraction.
#[derive(Clone, Debug, Serialize)]
pub struct ExtractionReport {
    pub group: AidGroup,
    /// Midpoint of the closest-approach pair.
    pub point: Point3<f32>,
    /// Distance between the closest points (0 for an exact crossing).
    pub closest_distance: f32,
    /// The vanishing-point marker that was moved or created.
    pub marker: MarkerId,
}
