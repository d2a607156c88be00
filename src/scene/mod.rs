//! Owned scene model.
//!
//! `Scene` is the registry a host scene graph is mirrored into: markers
//! (vanishing points, horizon control, extraction aids) and guide curves,
//! both addressed by small ids. Entities carry explicit role/kind tags;
//! no behavior dispatches on display names. Bulk removals are
//! best-effort: a stale id is logged and skipped, never fatal.

mod curve;
mod marker;

pub use curve::{GuideCurve, GuideKind};
pub use marker::{AidGroup, Marker, MarkerRole};

use std::collections::BTreeMap;

use log::warn;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::types::{Color, CurveId, CurveStyle, MarkerId, Polyline};

/// In-memory scene: all markers and guide curves the rig manages.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Scene {
    markers: BTreeMap<MarkerId, Marker>,
    curves: BTreeMap<CurveId, GuideCurve>,
    next_marker: u32,
    next_curve: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Markers -----------------------------------------------------------

    /// Inserts a marker unconditionally.
    pub fn add_marker(&mut self, role: MarkerRole, position: Point3<f32>, color: Color) -> MarkerId {
        let id = MarkerId(self.next_marker);
        self.next_marker += 1;
        self.markers.insert(
            id,
            Marker {
                id,
                role,
                position,
                color,
                visible: true,
            },
        );
        id
    }

    /// Ensures a primary-role marker exists. An existing marker keeps its
    /// position and only refreshes its color; a missing one is created at
    /// `default_position`.
    pub fn seed_marker(
        &mut self,
        role: MarkerRole,
        default_position: Point3<f32>,
        color: Color,
    ) -> MarkerId {
        debug_assert!(role.is_primary(), "aid markers are seeded per group");
        if let Some(existing) = self.markers.values_mut().find(|m| m.role == role) {
            existing.color = color;
            return existing.id;
        }
        self.add_marker(role, default_position, color)
    }

    pub fn marker(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.get(&id)
    }

    pub fn marker_mut(&mut self, id: MarkerId) -> Option<&mut Marker> {
        self.markers.get_mut(&id)
    }

    /// The unique marker holding a primary role, if present.
    pub fn marker_with_role(&self, role: MarkerRole) -> Option<&Marker> {
        self.markers.values().find(|m| m.role == role)
    }

    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.markers.values()
    }

    /// Aid markers of a group, ordered by their index tag.
    pub fn aid_markers(&self, group: AidGroup) -> Vec<&Marker> {
        let mut aids: Vec<&Marker> = self
            .markers
            .values()
            .filter(|m| matches!(m.role, MarkerRole::Aid { group: g, .. } if g == group))
            .collect();
        aids.sort_by_key(|m| match m.role {
            MarkerRole::Aid { index, .. } => index,
            _ => u8::MAX,
        });
        aids
    }

    /// Removes one marker. Stale ids are logged and reported as `false`.
    pub fn remove_marker(&mut self, id: MarkerId) -> bool {
        if self.markers.remove(&id).is_none() {
            warn!("remove_marker: marker {id:?} already gone");
            return false;
        }
        true
    }

    /// Removes every marker matching the predicate, returning the count.
    pub fn remove_markers_where<F: Fn(&Marker) -> bool>(&mut self, pred: F) -> usize {
        let before = self.markers.len();
        self.markers.retain(|_, m| !pred(m));
        before - self.markers.len()
    }

    // --- Curves ------------------------------------------------------------

    pub fn add_curve(
        &mut self,
        kind: GuideKind,
        polylines: Vec<Polyline>,
        style: CurveStyle,
    ) -> CurveId {
        let id = CurveId(self.next_curve);
        self.next_curve += 1;
        self.curves.insert(
            id,
            GuideCurve {
                id,
                kind,
                polylines,
                style,
                visible: true,
            },
        );
        id
    }

    pub fn curve(&self, id: CurveId) -> Option<&GuideCurve> {
        self.curves.get(&id)
    }

    pub fn curve_mut(&mut self, id: CurveId) -> Option<&mut GuideCurve> {
        self.curves.get_mut(&id)
    }

    pub fn curves(&self) -> impl Iterator<Item = &GuideCurve> {
        self.curves.values()
    }

    pub fn curves_mut(&mut self) -> impl Iterator<Item = &mut GuideCurve> {
        self.curves.values_mut()
    }

    pub fn curves_of_kind(&self, kind: GuideKind) -> impl Iterator<Item = &GuideCurve> {
        self.curves.values().filter(move |c| c.kind == kind)
    }

    /// Removes one curve. Stale ids are logged and reported as `false`.
    pub fn remove_curve(&mut self, id: CurveId) -> bool {
        if self.curves.remove(&id).is_none() {
            warn!("remove_curve: curve {id:?} already gone");
            return false;
        }
        true
    }

    /// Removes every curve matching the predicate, returning the count.
    pub fn remove_curves_where<F: Fn(&GuideCurve) -> bool>(&mut self, pred: F) -> usize {
        let before = self.curves.len();
        self.curves.retain(|_, c| !pred(c));
        before - self.curves.len()
    }

    pub fn clear(&mut self) {
        self.markers.clear();
        self.curves.clear();
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn curve_count(&self) -> usize {
        self.curves.len()
    }
}
