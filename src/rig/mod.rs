//! Perspective rig session.
//!
//! Overview
//! - Owns the scene model, the validated options, and the active
//!   perspective mode.
//! - Mode switches run an explicit transition table (see [`modes`]):
//!   clear the old mode, seed the new mode's default markers, re-sync
//!   colors, horizon and aid lines. Steps execute best-effort; failures
//!   are logged and collected into the switch report.
//! - Guide generation replaces the curves of its own kind wholesale from
//!   the current options and marker positions; nothing is patched
//!   incrementally.
//! - Vanishing points can be extracted from four aid markers per group
//!   via the closest-approach solver; skew inputs fail with the closest
//!   pair attached for display.
//! - `notify_transforms` lets a host report marker movement; the handler
//!   re-syncs the horizon and aid lines and is guarded against
//!   re-entrancy by session state, not a global.
//!
//! Modules
//! - [`options`] – option groups with defaults and range validation.
//! - [`modes`] – the transition table.
//! - `generate` – per-mode guide generation and horizon rebuild.
//! - `extract` – aid markers, aid lines, vanishing-point extraction.
//! - `trim` – camera trimming of guide curves.
//! - `manage` – clears, merges, visibility toggles.
//! - `events` – host change notifications.

pub mod modes;
pub mod options;

mod events;
mod extract;
mod generate;
mod manage;
mod trim;

use log::warn;
use nalgebra::Point3;

use crate::camera::{suggest_placement, Placement};
use crate::diagnostics::{ModeSwitchReport, StepOutcome};
use crate::error::RigError;
use crate::scene::{GuideKind, MarkerRole, Scene};
use crate::types::{Color, CurveStyle, PerspectiveMode};
use modes::{transition_plan, TransitionStep};
use options::RigOptions;

/// A perspective construction session: scene, options and mode.
#[derive(Clone, Debug)]
pub struct PerspectiveRig {
    options: RigOptions,
    scene: Scene,
    mode: PerspectiveMode,
    /// Re-entrancy guard for `notify_transforms`.
    in_notify: bool,
}

impl PerspectiveRig {
    pub fn new(options: RigOptions) -> Result<Self, RigError> {
        options.validate()?;
        Ok(Self {
            options,
            scene: Scene::new(),
            mode: PerspectiveMode::None,
            in_notify: false,
        })
    }

    pub fn with_defaults() -> Self {
        Self::new(RigOptions::default()).expect("default options are in range")
    }

    pub fn options(&self) -> &RigOptions {
        &self.options
    }

    /// Replaces the options after validating them.
    pub fn set_options(&mut self, options: RigOptions) -> Result<(), RigError> {
        options.validate()?;
        self.options = options;
        Ok(())
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable scene access for hosts that move markers directly. Call
    /// [`PerspectiveRig::notify_transforms`] afterwards so dependent
    /// visuals re-sync.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn mode(&self) -> PerspectiveMode {
        self.mode
    }

    /// Switches the active perspective mode, executing the transition
    /// plan best-effort. The returned report lists every step and its
    /// outcome; the switch itself always completes.
    pub fn set_mode(&mut self, new: PerspectiveMode) -> ModeSwitchReport {
        let from = self.mode;
        let plan = transition_plan(from, new);
        self.mode = new;

        let mut steps = Vec::with_capacity(plan.len());
        for step in plan {
            match self.run_transition_step(step) {
                Ok(()) => steps.push(StepOutcome {
                    step,
                    ok: true,
                    error: None,
                }),
                Err(err) => {
                    warn!("mode switch {from:?} -> {new:?}: step {step:?} failed: {err}");
                    steps.push(StepOutcome {
                        step,
                        ok: false,
                        error: Some(err.to_string()),
                    });
                }
            }
        }
        ModeSwitchReport {
            from,
            to: new,
            steps,
        }
    }

    fn run_transition_step(&mut self, step: TransitionStep) -> Result<(), RigError> {
        match step {
            TransitionStep::ClearMode(mode) => {
                self.clear_mode_entities(mode);
            }
            TransitionStep::SeedDefaults(mode) => {
                self.seed_mode_defaults(mode);
            }
            TransitionStep::SyncMarkerColors => {
                self.sync_marker_colors();
            }
            TransitionStep::RebuildHorizon => {
                self.rebuild_horizon();
            }
            TransitionStep::RefreshAidLines => {
                self.refresh_aid_lines();
            }
        }
        Ok(())
    }

    pub(crate) fn require_mode(&self, expected: PerspectiveMode) -> Result<(), RigError> {
        if self.mode == expected {
            Ok(())
        } else {
            Err(RigError::WrongMode {
                expected,
                actual: self.mode,
            })
        }
    }

    /// Ensures a mode's default markers exist. Existing markers keep
    /// their positions; markers bound to the horizon are snapped back to
    /// the shared horizon height (the one-point VP instead pulls the
    /// horizon height to itself, preserving its vertical freedom).
    pub(crate) fn seed_mode_defaults(&mut self, mode: PerspectiveMode) {
        let hz = self.options.horizon.z_level;
        let colors = self.options.colors.clone();
        match mode {
            PerspectiveMode::None => {}
            PerspectiveMode::OnePoint => {
                self.scene.seed_marker(
                    MarkerRole::HorizonControl,
                    Point3::new(0.0, 0.0, hz),
                    colors.for_role(MarkerRole::HorizonControl),
                );
                let id = self.scene.seed_marker(
                    MarkerRole::OnePoint,
                    Point3::new(0.0, 0.0, hz),
                    colors.for_role(MarkerRole::OnePoint),
                );
                if let Some(vp) = self.scene.marker(id) {
                    let z = vp.position.z;
                    if (self.options.horizon.z_level - z).abs() > 1e-3 {
                        self.options.horizon.z_level = z;
                    }
                }
            }
            PerspectiveMode::TwoPoint => {
                self.scene.seed_marker(
                    MarkerRole::HorizonControl,
                    Point3::new(0.0, 0.0, hz),
                    colors.for_role(MarkerRole::HorizonControl),
                );
                let half = self.options.two_point.line_extension * 0.5;
                for (role, x) in [
                    (MarkerRole::TwoPointFirst, -half),
                    (MarkerRole::TwoPointSecond, half),
                ] {
                    let id =
                        self.scene
                            .seed_marker(role, Point3::new(x, 0.0, hz), colors.for_role(role));
                    self.snap_marker_to_horizon(id, hz);
                }
            }
            PerspectiveMode::ThreePoint => {
                self.scene.seed_marker(
                    MarkerRole::HorizonControl,
                    Point3::new(0.0, 0.0, hz),
                    colors.for_role(MarkerRole::HorizonControl),
                );
                let half = self.options.three_point.line_extension * 0.5;
                for (role, x) in [
                    (MarkerRole::ThreePointHorizontalFirst, -half),
                    (MarkerRole::ThreePointHorizontalSecond, half),
                ] {
                    let id =
                        self.scene
                            .seed_marker(role, Point3::new(x, 0.0, hz), colors.for_role(role));
                    self.snap_marker_to_horizon(id, hz);
                }
                // The vertical VP keeps whatever position it has.
                self.scene.seed_marker(
                    MarkerRole::ThreePointVertical,
                    Point3::new(0.0, 0.0, hz - half),
                    colors.for_role(MarkerRole::ThreePointVertical),
                );
            }
            PerspectiveMode::FishEye => {
                self.scene.seed_marker(
                    MarkerRole::FisheyeCenter,
                    Point3::origin(),
                    colors.for_role(MarkerRole::FisheyeCenter),
                );
            }
        }
    }

    fn snap_marker_to_horizon(&mut self, id: crate::types::MarkerId, hz: f32) {
        if let Some(m) = self.scene.marker_mut(id) {
            if (m.position.z - hz).abs() > 1e-3 {
                m.position.z = hz;
            }
        }
    }

    /// Re-applies the configured color to every marker.
    pub(crate) fn sync_marker_colors(&mut self) {
        let colors = self.options.colors.clone();
        let ids: Vec<_> = self.scene.markers().map(|m| m.id).collect();
        for id in ids {
            if let Some(m) = self.scene.marker_mut(id) {
                m.color = colors.for_role(m.role);
            }
        }
    }

    /// Style for generated guide curves of a kind.
    pub(crate) fn guide_style(&self, kind: GuideKind) -> CurveStyle {
        let color = match kind {
            GuideKind::Horizon => self.options.horizon.color,
            GuideKind::AidLine(_) => self.options.colors.aid,
            _ => kind_color(kind),
        };
        let (thickness, opacity) = if kind == GuideKind::Horizon {
            (self.options.horizon.thickness, self.options.horizon.color.a)
        } else {
            (self.options.guides.thickness, self.options.guides.opacity)
        };
        CurveStyle {
            thickness,
            color,
            opacity,
        }
    }

    /// Suggested camera placement for the active mode: distance back from
    /// the mode's focus point, eye height above the horizon reference.
    /// `None` when no mode is active or the needed markers are missing.
    pub fn suggest_camera_placement(&self) -> Option<Placement> {
        let focus = self.mode_focus()?;
        let horizon_z = match self.mode {
            PerspectiveMode::FishEye => focus.z,
            _ => self.options.horizon.z_level,
        };
        Some(suggest_placement(
            focus,
            horizon_z,
            self.options.camera.eye_height,
            self.options.camera.distance,
        ))
    }

    /// The point the mode's construction converges on.
    fn mode_focus(&self) -> Option<Point3<f32>> {
        let scene = &self.scene;
        match self.mode {
            PerspectiveMode::None => None,
            PerspectiveMode::OnePoint => {
                scene.marker_with_role(MarkerRole::OnePoint).map(|m| m.position)
            }
            PerspectiveMode::TwoPoint => {
                let a = scene.marker_with_role(MarkerRole::TwoPointFirst)?;
                let b = scene.marker_with_role(MarkerRole::TwoPointSecond)?;
                Some(nalgebra::center(&a.position, &b.position))
            }
            PerspectiveMode::ThreePoint => {
                let a = scene.marker_with_role(MarkerRole::ThreePointHorizontalFirst)?;
                let b = scene.marker_with_role(MarkerRole::ThreePointHorizontalSecond)?;
                Some(nalgebra::center(&a.position, &b.position))
            }
            PerspectiveMode::FishEye => scene
                .marker_with_role(MarkerRole::FisheyeCenter)
                .map(|m| m.position),
        }
    }
}

/// Fixed display colors for generated guide groups.
fn kind_color(kind: GuideKind) -> Color {
    match kind {
        GuideKind::OnePoint => Color::opaque(0.9, 0.6, 0.2),
        GuideKind::TwoPointFirst => Color::opaque(0.9, 0.35, 0.35),
        GuideKind::TwoPointSecond => Color::opaque(0.35, 0.9, 0.35),
        GuideKind::TwoPointVertical => Color::opaque(0.6, 0.6, 0.9),
        GuideKind::ThreePointHorizontalFirst => Color::opaque(0.9, 0.25, 0.25),
        GuideKind::ThreePointHorizontalSecond => Color::opaque(0.25, 0.9, 0.25),
        GuideKind::ThreePointVertical => Color::opaque(0.25, 0.25, 0.9),
        GuideKind::FisheyeLongitude => Color::opaque(0.55, 0.3, 0.8),
        GuideKind::FisheyeLatitude => Color::opaque(0.4, 0.5, 0.85),
        GuideKind::GridPlane => Color::opaque(0.6, 0.6, 0.6),
        GuideKind::Horizon | GuideKind::AidLine(_) | GuideKind::Merged => Color::default(),
    }
}
