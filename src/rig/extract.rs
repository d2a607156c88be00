//! Extraction aids and vanishing-point derivation.
//!
//! Four aid markers per group define two lines (indices 0,1 and 2,3);
//! the closest-approach solver turns them into a vanishing point when
//! they come within the configured tolerance.

use log::info;
use nalgebra::{Point3, Vector3};

use super::PerspectiveRig;
use crate::diagnostics::ExtractionReport;
use crate::error::RigError;
use crate::intersect::{near_intersection, DegenerateKind, Segment3, SolveOutcome};
use crate::scene::{AidGroup, GuideKind, MarkerRole};
use crate::types::{MarkerId, Polyline};

const ALL_GROUPS: [AidGroup; 6] = [
    AidGroup::OnePoint,
    AidGroup::TwoPointFirst,
    AidGroup::TwoPointSecond,
    AidGroup::ThreePointHorizontalFirst,
    AidGroup::ThreePointHorizontalSecond,
    AidGroup::ThreePointVertical,
];

/// Line directions used when seeding a fresh aid group. Both lines pass
/// through the anchor, so extracting right after seeding reproduces it.
fn aid_directions(group: AidGroup) -> (Vector3<f32>, Vector3<f32>) {
    match group {
        AidGroup::ThreePointVertical => {
            (Vector3::new(0.3, 0.0, 1.0), Vector3::new(-0.3, 0.0, 1.0))
        }
        _ => (Vector3::new(1.0, 0.0, 0.3), Vector3::new(1.0, 0.0, -0.3)),
    }
}

impl PerspectiveRig {
    /// Places a fresh set of four aid markers for `group`, replacing any
    /// existing set. The markers sit on two lines converging on the
    /// group's current vanishing point (or the origin when none exists).
    pub fn seed_aid_markers(&mut self, group: AidGroup) -> Result<Vec<MarkerId>, RigError> {
        self.require_mode(group.mode())?;
        self.scene
            .remove_markers_where(|m| matches!(m.role, MarkerRole::Aid { group: g, .. } if g == group));

        let anchor = self
            .scene
            .marker_with_role(group.target_role())
            .map(|m| m.position)
            .unwrap_or_else(Point3::origin);
        let spread = self.options.extraction.seed_spread;
        let color = self.options.colors.aid;
        let (dir_a, dir_b) = aid_directions(group);

        let offsets = [
            (dir_a, -2.0),
            (dir_a, -1.0),
            (dir_b, -2.0),
            (dir_b, -1.0),
        ];
        let mut ids = Vec::with_capacity(4);
        for (index, (dir, steps)) in offsets.into_iter().enumerate() {
            let position = anchor + dir * (steps * spread);
            ids.push(self.scene.add_marker(
                MarkerRole::Aid {
                    group,
                    index: index as u8,
                },
                position,
                color,
            ));
        }
        self.refresh_aid_lines();
        Ok(ids)
    }

    /// Precondition gate for extraction: right mode and a complete group.
    pub fn can_extract(&self, group: AidGroup) -> bool {
        self.mode == group.mode() && self.scene.aid_markers(group).len() == 4
    }

    /// Derives the group's vanishing point from its four aid markers and
    /// moves (or creates) the target marker there. Horizon-bound targets
    /// drag the shared horizon height along. Skew aid lines fail with the
    /// closest pair attached; the scene is left untouched.
    pub fn extract_vanishing_point(
        &mut self,
        group: AidGroup,
    ) -> Result<ExtractionReport, RigError> {
        self.require_mode(group.mode())?;
        let (first, second) = self.aid_segments(group)?;
        let tolerance = self.options.extraction.tolerance;

        match near_intersection(&first, &second, tolerance) {
            SolveOutcome::Intersection { point, closest } => {
                let role = group.target_role();
                let color = self.options.colors.for_role(role);
                let id = self.scene.seed_marker(role, point, color);
                if let Some(marker) = self.scene.marker_mut(id) {
                    marker.position = point;
                }
                if role.on_horizon() && (self.options.horizon.z_level - point.z).abs() > 1e-3 {
                    self.options.horizon.z_level = point.z;
                }
                self.rebuild_horizon();
                self.refresh_aid_lines();
                info!(
                    "extracted {role:?} at ({:.3}, {:.3}, {:.3}), closest approach {:.5}",
                    point.x,
                    point.y,
                    point.z,
                    closest.distance()
                );
                Ok(ExtractionReport {
                    group,
                    point,
                    closest_distance: closest.distance(),
                    marker: id,
                })
            }
            SolveOutcome::Skew { closest } => Err(RigError::NoIntersection {
                distance: closest.distance(),
                tolerance,
                closest,
            }),
            SolveOutcome::Degenerate(DegenerateKind::Parallel) => Err(RigError::ParallelAidLines),
            SolveOutcome::Degenerate(_) => Err(RigError::DegenerateAidSegment),
        }
    }

    pub(crate) fn aid_segments(&self, group: AidGroup) -> Result<(Segment3, Segment3), RigError> {
        let aids = self.scene.aid_markers(group);
        if aids.len() != 4 {
            return Err(RigError::IncompleteAidGroup {
                group,
                found: aids.len(),
            });
        }
        Ok((
            Segment3::new(aids[0].position, aids[1].position),
            Segment3::new(aids[2].position, aids[3].position),
        ))
    }

    /// Redraws the visual aid lines: two segments per complete group of
    /// the active mode when the display toggle is on, nothing otherwise.
    /// Returns the number of aid-line curves drawn.
    pub fn refresh_aid_lines(&mut self) -> usize {
        self.scene
            .remove_curves_where(|c| matches!(c.kind, GuideKind::AidLine(_)));
        if !self.options.display.show_aid_lines {
            return 0;
        }
        let mut drawn = 0;
        for group in ALL_GROUPS {
            if group.mode() != self.mode {
                continue;
            }
            let Ok((first, second)) = self.aid_segments(group) else {
                continue;
            };
            let kind = GuideKind::AidLine(group);
            let style = self.guide_style(kind);
            self.scene
                .add_curve(kind, vec![Polyline::segment(first.a, first.b)], style);
            self.scene
                .add_curve(kind, vec![Polyline::segment(second.a, second.b)], style);
            drawn += 2;
        }
        drawn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PerspectiveMode;

    fn place_group(rig: &mut PerspectiveRig, group: AidGroup, points: [[f32; 3]; 4]) {
        rig.scene_mut().remove_markers_where(
            |m| matches!(m.role, MarkerRole::Aid { group: g, .. } if g == group),
        );
        for (index, p) in points.into_iter().enumerate() {
            rig.scene_mut().add_marker(
                MarkerRole::Aid {
                    group,
                    index: index as u8,
                },
                Point3::new(p[0], p[1], p[2]),
                Default::default(),
            );
        }
    }

    #[test]
    fn extraction_requires_the_group_mode() {
        let mut rig = PerspectiveRig::with_defaults();
        rig.set_mode(PerspectiveMode::TwoPoint);
        assert!(matches!(
            rig.extract_vanishing_point(AidGroup::OnePoint),
            Err(RigError::WrongMode { .. })
        ));
    }

    #[test]
    fn incomplete_group_is_rejected() {
        let mut rig = PerspectiveRig::with_defaults();
        rig.set_mode(PerspectiveMode::OnePoint);
        assert!(!rig.can_extract(AidGroup::OnePoint));
        match rig.extract_vanishing_point(AidGroup::OnePoint) {
            Err(RigError::IncompleteAidGroup { found, .. }) => assert_eq!(found, 0),
            other => panic!("expected incomplete group, got {other:?}"),
        }
    }

    #[test]
    fn crossing_aid_lines_move_the_vanishing_point() {
        let mut rig = PerspectiveRig::with_defaults();
        rig.set_mode(PerspectiveMode::OnePoint);
        // Two lines crossing exactly at (0, 0, 5).
        place_group(
            &mut rig,
            AidGroup::OnePoint,
            [
                [-2.0, 0.0, 3.0],
                [-1.0, 0.0, 4.0],
                [2.0, 0.0, 3.0],
                [1.0, 0.0, 4.0],
            ],
        );
        assert!(rig.can_extract(AidGroup::OnePoint));
        let report = rig
            .extract_vanishing_point(AidGroup::OnePoint)
            .expect("lines cross");
        assert!((report.point - Point3::new(0.0, 0.0, 5.0)).norm() < 1e-4);

        let vp = rig
            .scene()
            .marker_with_role(MarkerRole::OnePoint)
            .expect("seeded");
        assert!((vp.position - report.point).norm() < 1e-6);
        // Horizon height follows the one-point VP.
        assert!((rig.options().horizon.z_level - 5.0).abs() < 1e-4);
    }

    #[test]
    fn skew_aid_lines_keep_the_scene_untouched() {
        let mut rig = PerspectiveRig::with_defaults();
        rig.set_mode(PerspectiveMode::OnePoint);
        let before = rig
            .scene()
            .marker_with_role(MarkerRole::OnePoint)
            .unwrap()
            .position;
        place_group(
            &mut rig,
            AidGroup::OnePoint,
            [
                [-1.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, -1.0, 1.0],
                [0.0, 1.0, 1.0],
            ],
        );
        match rig.extract_vanishing_point(AidGroup::OnePoint) {
            Err(RigError::NoIntersection { distance, .. }) => {
                assert!((distance - 1.0).abs() < 1e-4);
            }
            other => panic!("expected skew failure, got {other:?}"),
        }
        let after = rig
            .scene()
            .marker_with_role(MarkerRole::OnePoint)
            .unwrap()
            .position;
        assert_eq!(before, after);
    }

    #[test]
    fn seeded_aids_extract_back_to_the_anchor() {
        let mut rig = PerspectiveRig::with_defaults();
        rig.set_mode(PerspectiveMode::ThreePoint);
        let anchor = rig
            .scene()
            .marker_with_role(MarkerRole::ThreePointVertical)
            .unwrap()
            .position;
        rig.seed_aid_markers(AidGroup::ThreePointVertical)
            .expect("seeds");
        let report = rig
            .extract_vanishing_point(AidGroup::ThreePointVertical)
            .expect("seeded lines converge on the anchor");
        assert!((report.point - anchor).norm() < 1e-3);
    }

    #[test]
    fn aid_lines_follow_the_display_toggle() {
        let mut rig = PerspectiveRig::with_defaults();
        rig.set_mode(PerspectiveMode::OnePoint);
        rig.seed_aid_markers(AidGroup::OnePoint).expect("seeds");
        assert_eq!(rig.refresh_aid_lines(), 0);

        let mut opts = rig.options().clone();
        opts.display.show_aid_lines = true;
        rig.set_options(opts).expect("valid");
        assert_eq!(rig.refresh_aid_lines(), 2);

        let mut opts = rig.options().clone();
        opts.display.show_aid_lines = false;
        rig.set_options(opts).expect("valid");
        assert_eq!(rig.refresh_aid_lines(), 0);
        assert_eq!(
            rig.scene()
                .curves()
                .filter(|c| matches!(c.kind, GuideKind::AidLine(_)))
                .count(),
            0
        );
    }
}
