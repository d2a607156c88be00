//! Trimming guide curves to the camera frame.

use log::info;
use nalgebra::Point3;

use super::PerspectiveRig;
use crate::camera::{Camera, TrimOutcome};
use crate::diagnostics::TrimReport;
use crate::scene::GuideKind;
use crate::types::CurveId;

enum PolylineFate {
    Rewrite(usize, Point3<f32>, Point3<f32>),
    Drop(usize),
    Skip,
}

impl PerspectiveRig {
    /// Trims every visible guide curve (the horizon line excepted) to the
    /// portion inside the camera frame, expanded by the configured trim
    /// margin.
    ///
    /// Only two-point polylines are trimmed; sampled runs (the fisheye
    /// cage) and segments with an endpoint behind the camera are left
    /// untouched and counted as skipped. Trimmed segments shorter than
    /// the configured minimum are treated as invisible. A curve with no
    /// visible portion at all is hidden, not collapsed; partially visible
    /// curves drop their invisible polylines.
    pub fn trim_guides_to_camera(&mut self, camera: &Camera) -> TrimReport {
        let margin = self.options.trim.margin;
        let min_len = self.options.trim.min_visible_length;
        let mut report = TrimReport::default();

        let ids: Vec<CurveId> = self
            .scene
            .curves()
            .filter(|c| c.kind != GuideKind::Horizon && c.visible)
            .map(|c| c.id)
            .collect();

        for id in ids {
            let Some(curve) = self.scene.curve(id) else {
                continue;
            };

            let mut fates = Vec::with_capacity(curve.polylines.len());
            let mut visible = 0usize;
            let mut skipped = 0usize;
            for (index, polyline) in curve.polylines.iter().enumerate() {
                let (a, b) = match polyline.endpoints() {
                    Some(pair) if polyline.is_two_point() => pair,
                    _ => {
                        fates.push(PolylineFate::Skip);
                        skipped += 1;
                        continue;
                    }
                };
                match camera.trim_segment(&a, &b, margin) {
                    TrimOutcome::Visible { a: ta, b: tb, .. } => {
                        if (tb - ta).norm() < min_len {
                            fates.push(PolylineFate::Drop(index));
                        } else {
                            fates.push(PolylineFate::Rewrite(index, ta, tb));
                            visible += 1;
                        }
                    }
                    TrimOutcome::Outside => fates.push(PolylineFate::Drop(index)),
                    TrimOutcome::BehindCamera => {
                        fates.push(PolylineFate::Skip);
                        skipped += 1;
                    }
                }
            }

            report.skipped += skipped;
            if visible == 0 && skipped == 0 {
                // Nothing of the curve is visible; hide it but keep its data.
                if let Some(curve) = self.scene.curve_mut(id) {
                    curve.visible = false;
                }
                report.hidden += 1;
                continue;
            }

            let Some(curve) = self.scene.curve_mut(id) else {
                continue;
            };
            let mut drops = Vec::new();
            for fate in fates {
                match fate {
                    PolylineFate::Rewrite(index, a, b) => {
                        curve.polylines[index].points = vec![a, b];
                        report.trimmed += 1;
                    }
                    PolylineFate::Drop(index) => drops.push(index),
                    PolylineFate::Skip => {}
                }
            }
            for index in drops.into_iter().rev() {
                curve.polylines.remove(index);
                report.dropped_polylines += 1;
            }
        }

        info!(
            "camera trim: {} trimmed, {} hidden, {} dropped, {} skipped",
            report.trimmed, report.hidden, report.dropped_polylines, report.skipped
        );
        report
    }
}
