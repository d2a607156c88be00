//! Mode-switch transition table.
//!
//! Switching the active perspective mode runs a fixed plan derived from
//! the (old, new) pair: clear what the old mode owned, seed the new
//! mode's default markers, then re-sync the shared visuals. The rig
//! executes the plan best-effort, logging per-step failures without
//! rolling back; the caller sees the switch as atomic.

use serde::Serialize;

use crate::types::PerspectiveMode;

/// One side effect of a mode transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TransitionStep {
    /// Remove the markers, guides and aid lines owned by a mode.
    ClearMode(PerspectiveMode),
    /// Ensure the default markers of a mode exist (survivors keep their
    /// positions).
    SeedDefaults(PerspectiveMode),
    /// Re-apply configured marker colors.
    SyncMarkerColors,
    /// Rebuild (or hide) the horizon line for the new mode.
    RebuildHorizon,
    /// Redraw extraction aid lines for complete groups.
    RefreshAidLines,
}

/// The steps a switch from `old` to `new` performs, in order.
pub fn transition_plan(old: PerspectiveMode, new: PerspectiveMode) -> Vec<TransitionStep> {
    let mut plan = Vec::with_capacity(5);
    if old != PerspectiveMode::None && old != new {
        plan.push(TransitionStep::ClearMode(old));
    }
    if new != PerspectiveMode::None {
        plan.push(TransitionStep::SeedDefaults(new));
    }
    plan.push(TransitionStep::SyncMarkerColors);
    plan.push(TransitionStep::RebuildHorizon);
    plan.push(TransitionStep::RefreshAidLines);
    plan
}
