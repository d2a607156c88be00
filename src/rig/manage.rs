//! Clears, merges and visibility management.
//!
//! All bulk operations are best-effort over possibly-stale references:
//! anything already gone is logged by the scene layer and reflected in
//! the returned counts, never an error.

use log::info;

use super::PerspectiveRig;
use crate::diagnostics::{ClearReport, MergeReport};
use crate::scene::{AidGroup, GuideKind, MarkerRole};
use crate::types::{CurveId, PerspectiveMode, Polyline};

impl PerspectiveRig {
    /// Removes every marker and curve a mode owns (vanishing points, aid
    /// markers, generated guides and aid lines of that mode).
    pub fn clear_mode_entities(&mut self, mode: PerspectiveMode) -> ClearReport {
        let markers_removed = self
            .scene
            .remove_markers_where(|m| m.role.mode() == Some(mode));
        let curves_removed = self
            .scene
            .remove_curves_where(|c| c.kind.mode() == Some(mode));
        info!("cleared {mode:?}: {markers_removed} markers, {curves_removed} curves");
        ClearReport {
            markers_removed,
            curves_removed,
        }
    }

    /// Removes the curves of one kind group.
    pub fn clear_guides_of_kind(&mut self, kind: GuideKind) -> usize {
        self.scene.remove_curves_where(|c| c.kind == kind)
    }

    /// Removes every generated guide curve (grids included), leaving
    /// markers, the horizon line and aid lines alone.
    pub fn clear_just_guides(&mut self) -> usize {
        self.scene
            .remove_curves_where(|c| c.kind.is_generated_guide())
    }

    /// Removes the horizon line and its control marker.
    pub fn clear_horizon(&mut self) -> ClearReport {
        let curves_removed = self
            .scene
            .remove_curves_where(|c| c.kind == GuideKind::Horizon);
        let markers_removed = self
            .scene
            .remove_markers_where(|m| m.role == MarkerRole::HorizonControl);
        ClearReport {
            markers_removed,
            curves_removed,
        }
    }

    pub fn clear_grid_planes(&mut self) -> usize {
        self.scene
            .remove_curves_where(|c| c.kind == GuideKind::GridPlane)
    }

    /// Removes aid markers (one group, or all of them) together with
    /// their aid lines.
    pub fn clear_aid_markers(&mut self, group: Option<AidGroup>) -> ClearReport {
        let markers_removed = self.scene.remove_markers_where(|m| match m.role {
            MarkerRole::Aid { group: g, .. } => group.map_or(true, |wanted| wanted == g),
            _ => false,
        });
        let curves_removed = self.scene.remove_curves_where(|c| match c.kind {
            GuideKind::AidLine(g) => group.map_or(true, |wanted| wanted == g),
            _ => false,
        });
        ClearReport {
            markers_removed,
            curves_removed,
        }
    }

    /// Removes everything the rig owns.
    pub fn clear_all(&mut self) -> ClearReport {
        let report = ClearReport {
            markers_removed: self.scene.marker_count(),
            curves_removed: self.scene.curve_count(),
        };
        self.scene.clear();
        info!(
            "cleared all: {} markers, {} curves",
            report.markers_removed, report.curves_removed
        );
        report
    }

    /// Folds every curve of `kind` into a single multi-polyline curve.
    /// With fewer than two curves there is nothing to fold and the scene
    /// is untouched.
    pub fn merge_kind(&mut self, kind: GuideKind) -> MergeReport {
        let ids: Vec<CurveId> = self.scene.curves_of_kind(kind).map(|c| c.id).collect();
        if ids.len() < 2 {
            return MergeReport::default();
        }
        self.merge_curves(ids, kind)
    }

    /// Folds every visible generated guide curve, regardless of kind,
    /// into a single [`GuideKind::Merged`] curve.
    pub fn merge_all_visible(&mut self) -> MergeReport {
        let ids: Vec<CurveId> = self
            .scene
            .curves()
            .filter(|c| c.visible && c.kind.is_generated_guide())
            .map(|c| c.id)
            .collect();
        if ids.len() < 2 {
            return MergeReport::default();
        }
        self.merge_curves(ids, GuideKind::Merged)
    }

    fn merge_curves(&mut self, ids: Vec<CurveId>, merged_kind: GuideKind) -> MergeReport {
        let mut polylines: Vec<Polyline> = Vec::new();
        let mut style = None;
        let mut sources_merged = 0;
        for id in &ids {
            let Some(curve) = self.scene.curve(*id) else {
                continue;
            };
            style.get_or_insert(curve.style);
            polylines.extend(curve.polylines.iter().cloned());
            sources_merged += 1;
        }
        for id in ids {
            self.scene.remove_curve(id);
        }
        let polyline_count = polylines.len();
        let merged_into = self
            .scene
            .add_curve(merged_kind, polylines, style.unwrap_or_default());
        info!("merged {sources_merged} curves into {merged_into:?} ({polyline_count} polylines)");
        MergeReport {
            sources_merged,
            polylines: polyline_count,
            merged_into: Some(merged_into),
        }
    }

    /// Flips visibility of every curve of `kind`, returning how many
    /// curves were toggled.
    pub fn toggle_kind_visibility(&mut self, kind: GuideKind) -> usize {
        let ids: Vec<CurveId> = self.scene.curves_of_kind(kind).map(|c| c.id).collect();
        let mut toggled = 0;
        for id in ids {
            if let Some(curve) = self.scene.curve_mut(id) {
                curve.visible = !curve.visible;
                toggled += 1;
            }
        }
        toggled
    }

    /// Shows or hides the primary vanishing-point markers.
    pub fn set_markers_visible(&mut self, visible: bool) -> usize {
        self.options.display.show_markers = visible;
        let ids: Vec<_> = self
            .scene
            .markers()
            .filter(|m| m.role.is_primary() && m.role != MarkerRole::HorizonControl)
            .map(|m| m.id)
            .collect();
        let mut changed = 0;
        for id in ids {
            if let Some(marker) = self.scene.marker_mut(id) {
                marker.visible = visible;
                changed += 1;
            }
        }
        changed
    }
}
