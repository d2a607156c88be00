mod common;

use common::scene::camera_facing_origin;
use perspective_rig::prelude::*;
use perspective_rig::Scene;

#[test]
fn mode_lifecycle_keeps_the_scene_consistent() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut rig = PerspectiveRig::with_defaults();

    let report = rig.set_mode(PerspectiveMode::OnePoint);
    assert!(report.all_ok(), "switch report: {report:?}");
    rig.generate_one_point().expect("one-point generates");
    assert!(rig.scene().curves_of_kind(GuideKind::OnePoint).count() > 0);
    assert_eq!(rig.scene().curves_of_kind(GuideKind::Horizon).count(), 1);

    // Crossing into two-point clears everything one-point owned.
    let report = rig.set_mode(PerspectiveMode::TwoPoint);
    assert!(report.all_ok());
    assert_eq!(rig.scene().curves_of_kind(GuideKind::OnePoint).count(), 0);
    assert!(rig.scene().marker_with_role(MarkerRole::OnePoint).is_none());
    rig.generate_two_point_first().expect("generates");
    rig.generate_two_point_second().expect("generates");
    rig.generate_two_point_verticals().expect("generates");
    let expected = (rig.options().two_point.first_density
        + rig.options().two_point.second_density
        + rig.options().two_point.vertical_density
        + 1) as usize;
    let guide_count = rig
        .scene()
        .curves()
        .filter(|c| c.kind.mode() == Some(PerspectiveMode::TwoPoint))
        .count();
    assert_eq!(guide_count, expected);

    // Leaving to no mode drops the construction; the horizon control
    // marker is shared and survives.
    let report = rig.set_mode(PerspectiveMode::None);
    assert!(report.all_ok());
    assert_eq!(rig.scene().curve_count(), 0);
    assert!(rig
        .scene()
        .marker_with_role(MarkerRole::HorizonControl)
        .is_some());
    assert!(rig
        .scene()
        .marker_with_role(MarkerRole::TwoPointFirst)
        .is_none());
}

#[test]
fn trimming_preserves_guides_fully_inside_the_frame() {
    let mut rig = PerspectiveRig::with_defaults();
    let mut opts = rig.options().clone();
    opts.one_point.line_extension = 1.0;
    opts.one_point.draw_ortho_horizontal = false;
    opts.one_point.draw_ortho_vertical = false;
    opts.trim.margin = 0.0;
    opts.trim.min_visible_length = 0.0;
    rig.set_options(opts).expect("valid options");

    rig.set_mode(PerspectiveMode::OnePoint);
    rig.generate_one_point().expect("generates");
    let before: Vec<_> = rig
        .scene()
        .curves_of_kind(GuideKind::OnePoint)
        .map(|c| c.polylines[0].points.clone())
        .collect();

    let report = rig.trim_guides_to_camera(&camera_facing_origin(10.0));
    assert_eq!(report.hidden, 0);
    assert_eq!(report.dropped_polylines, 0);

    let after: Vec<_> = rig
        .scene()
        .curves_of_kind(GuideKind::OnePoint)
        .map(|c| c.polylines[0].points.clone())
        .collect();
    assert_eq!(before, after, "fully visible guides must round-trip");
}

#[test]
fn trimming_long_rays_lands_endpoints_on_the_frame() {
    let mut rig = PerspectiveRig::with_defaults();
    let mut opts = rig.options().clone();
    opts.trim.margin = 0.0;
    opts.trim.min_visible_length = 0.0;
    rig.set_options(opts).expect("valid options");

    rig.set_mode(PerspectiveMode::TwoPoint);
    rig.generate_two_point_first().expect("generates");
    let camera = camera_facing_origin(10.0);
    let report = rig.trim_guides_to_camera(&camera);
    assert!(report.trimmed > 0);

    for curve in rig.scene().curves() {
        if curve.kind == GuideKind::Horizon || !curve.visible {
            continue;
        }
        for polyline in &curve.polylines {
            let (a, b) = polyline.endpoints().expect("two points");
            for p in [a, b] {
                let ndc = camera.world_to_ndc(&p).expect("visible endpoint projects");
                assert!((-1e-3..=1.0 + 1e-3).contains(&ndc[0]), "x out of frame: {ndc:?}");
                assert!((-1e-3..=1.0 + 1e-3).contains(&ndc[1]), "y out of frame: {ndc:?}");
            }
        }
    }
}

#[test]
fn merging_then_clearing_is_best_effort() {
    let mut rig = PerspectiveRig::with_defaults();
    rig.set_mode(PerspectiveMode::ThreePoint);
    rig.generate_three_point().expect("generates");

    let merge = rig.merge_all_visible();
    assert!(merge.sources_merged > 0);
    assert_eq!(rig.scene().curves_of_kind(GuideKind::Merged).count(), 1);

    // Clearing the merged curve twice: second pass removes nothing and
    // does not error.
    assert_eq!(rig.clear_guides_of_kind(GuideKind::Merged), 1);
    assert_eq!(rig.clear_guides_of_kind(GuideKind::Merged), 0);
}

#[test]
fn scene_snapshot_round_trips_through_json() {
    let mut rig = PerspectiveRig::with_defaults();
    rig.set_mode(PerspectiveMode::FishEye);
    rig.generate_fisheye().expect("generates");

    let json = serde_json::to_string(rig.scene()).expect("serializes");
    let restored: Scene = serde_json::from_str(&json).expect("deserializes");
    assert_eq!(restored.marker_count(), rig.scene().marker_count());
    assert_eq!(restored.curve_count(), rig.scene().curve_count());
    let cage: Vec<_> = restored
        .curves_of_kind(GuideKind::FisheyeLongitude)
        .collect();
    assert_eq!(cage.len(), rig.options().fisheye.longitudes as usize);
}
