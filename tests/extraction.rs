use nalgebra::Point3;

use perspective_rig::prelude::*;
use perspective_rig::types::Color;

fn place_group(rig: &mut PerspectiveRig, group: AidGroup, points: [[f32; 3]; 4]) {
    rig.scene_mut()
        .remove_markers_where(|m| matches!(m.role, MarkerRole::Aid { group: g, .. } if g == group));
    for (index, p) in points.into_iter().enumerate() {
        rig.scene_mut().add_marker(
            MarkerRole::Aid {
                group,
                index: index as u8,
            },
            Point3::new(p[0], p[1], p[2]),
            Color::default(),
        );
    }
}

#[test]
fn extraction_moves_marker_and_horizon_together() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut rig = PerspectiveRig::with_defaults();
    rig.set_mode(PerspectiveMode::TwoPoint);

    // Two aid lines crossing exactly at (12, 0, 4).
    place_group(
        &mut rig,
        AidGroup::TwoPointFirst,
        [
            [8.0, 0.0, 0.0],
            [10.0, 0.0, 2.0],
            [16.0, 0.0, 0.0],
            [14.0, 0.0, 2.0],
        ],
    );
    assert!(rig.can_extract(AidGroup::TwoPointFirst));
    let report = rig
        .extract_vanishing_point(AidGroup::TwoPointFirst)
        .expect("aid lines cross");
    assert!((report.point - Point3::new(12.0, 0.0, 4.0)).norm() < 1e-3);

    let vp = rig
        .scene()
        .marker_with_role(MarkerRole::TwoPointFirst)
        .expect("exists");
    assert!((vp.position - report.point).norm() < 1e-6);
    // The extracted VP sits on the horizon, so the shared height follows.
    assert!((rig.options().horizon.z_level - 4.0).abs() < 1e-3);
    let horizon = rig
        .scene()
        .curves_of_kind(GuideKind::Horizon)
        .next()
        .expect("rebuilt");
    let (a, _) = horizon.polylines[0].endpoints().expect("two points");
    assert!((a - report.point).norm() < 1e-6);
}

#[test]
fn tolerance_gates_extraction_inclusively() {
    let mut rig = PerspectiveRig::with_defaults();
    rig.set_mode(PerspectiveMode::OnePoint);

    // Minimum separation between the two aid lines is exactly 0.5.
    let skewed = [
        [-1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, -1.0, 0.5],
        [0.0, 1.0, 0.5],
    ];
    place_group(&mut rig, AidGroup::OnePoint, skewed);

    let mut opts = rig.options().clone();
    opts.extraction.tolerance = 0.49;
    rig.set_options(opts).expect("valid");
    match rig.extract_vanishing_point(AidGroup::OnePoint) {
        Err(RigError::NoIntersection {
            distance,
            tolerance,
            ..
        }) => {
            assert!((distance - 0.5).abs() < 1e-4);
            assert!((tolerance - 0.49).abs() < 1e-6);
        }
        other => panic!("expected skew failure, got {other:?}"),
    }

    let mut opts = rig.options().clone();
    opts.extraction.tolerance = 0.5;
    rig.set_options(opts).expect("valid");
    let report = rig
        .extract_vanishing_point(AidGroup::OnePoint)
        .expect("tolerance equal to the separation is accepted");
    assert!((report.point - Point3::new(0.0, 0.0, 0.25)).norm() < 1e-4);
    assert!((report.closest_distance - 0.5).abs() < 1e-4);
}

#[test]
fn parallel_aid_lines_are_rejected_with_a_reason() {
    let mut rig = PerspectiveRig::with_defaults();
    rig.set_mode(PerspectiveMode::OnePoint);
    place_group(
        &mut rig,
        AidGroup::OnePoint,
        [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0],
            [1.0, 0.0, 1.0],
        ],
    );
    assert!(matches!(
        rig.extract_vanishing_point(AidGroup::OnePoint),
        Err(RigError::ParallelAidLines)
    ));
}

#[test]
fn preconditions_gate_the_operation() {
    let mut rig = PerspectiveRig::with_defaults();
    rig.set_mode(PerspectiveMode::TwoPoint);

    // Wrong mode for the group.
    assert!(!rig.can_extract(AidGroup::OnePoint));
    assert!(matches!(
        rig.extract_vanishing_point(AidGroup::OnePoint),
        Err(RigError::WrongMode { .. })
    ));

    // Right mode, incomplete group (3 of 4 markers).
    for index in 0..3u8 {
        rig.scene_mut().add_marker(
            MarkerRole::Aid {
                group: AidGroup::TwoPointSecond,
                index,
            },
            Point3::new(index as f32, 0.0, 0.0),
            Color::default(),
        );
    }
    assert!(!rig.can_extract(AidGroup::TwoPointSecond));
    match rig.extract_vanishing_point(AidGroup::TwoPointSecond) {
        Err(RigError::IncompleteAidGroup { found, .. }) => assert_eq!(found, 3),
        other => panic!("expected incomplete group, got {other:?}"),
    }
}

#[test]
fn seeded_aid_groups_extract_back_to_their_anchor() {
    let mut rig = PerspectiveRig::with_defaults();
    rig.set_mode(PerspectiveMode::ThreePoint);
    for group in [
        AidGroup::ThreePointHorizontalFirst,
        AidGroup::ThreePointHorizontalSecond,
        AidGroup::ThreePointVertical,
    ] {
        let anchor = rig
            .scene()
            .marker_with_role(group.target_role())
            .expect("seeded on switch")
            .position;
        rig.seed_aid_markers(group).expect("seeds");
        let report = rig
            .extract_vanishing_point(group)
            .expect("seeded aid lines converge");
        assert!(
            (report.point - anchor).norm() < 1e-3,
            "group {group:?} drifted: {:?} vs {anchor:?}",
            report.point
        );
    }
}
