//! Per-mode guide generation and the horizon line.
//!
//! Generation is wholesale: each operation removes the curves of its own
//! kind group and re-creates them from the current options and marker
//! positions.

use std::time::Instant;

use log::info;
use nalgebra::{Point3, Vector3};

use super::PerspectiveRig;
use crate::diagnostics::GenerateReport;
use crate::error::RigError;
use crate::field::{
    box_grid, latitude_rings, longitude_lines, parallel_lines, radial_fan, BoxFace, CardinalPlane,
    SphereCageSpec, VerticalFenceSpec,
};
use crate::scene::{GuideKind, MarkerRole};
use crate::types::{PerspectiveMode, Polyline};

impl PerspectiveRig {
    fn vp_position(&self, role: MarkerRole) -> Result<Point3<f32>, RigError> {
        self.scene
            .marker_with_role(role)
            .map(|m| m.position)
            .ok_or(RigError::MissingMarker { role })
    }

    /// Replaces every curve of `kind` with one curve per segment.
    fn replace_with_segments(
        &mut self,
        kind: GuideKind,
        segments: Vec<[Point3<f32>; 2]>,
    ) -> (usize, usize) {
        let replaced = self.scene.remove_curves_where(|c| c.kind == kind);
        let style = self.guide_style(kind);
        let created = segments.len();
        for [a, b] in segments {
            self.scene.add_curve(kind, vec![Polyline::segment(a, b)], style);
        }
        (created, replaced)
    }

    /// Replaces every curve of `kind` with one curve per polyline.
    fn replace_with_polylines(
        &mut self,
        kind: GuideKind,
        polylines: Vec<Polyline>,
    ) -> (usize, usize) {
        let replaced = self.scene.remove_curves_where(|c| c.kind == kind);
        let style = self.guide_style(kind);
        let created = polylines.len();
        for polyline in polylines {
            self.scene.add_curve(kind, vec![polyline], style);
        }
        (created, replaced)
    }

    /// Radial fan plus the optional orthogonal cross-hatch around the
    /// one-point VP.
    pub fn generate_one_point(&mut self) -> Result<GenerateReport, RigError> {
        self.require_mode(PerspectiveMode::OnePoint)?;
        let t0 = Instant::now();
        self.seed_mode_defaults(PerspectiveMode::OnePoint);
        let vp = self.vp_position(MarkerRole::OnePoint)?;
        let o = self.options.one_point.clone();

        let mut segments = Vec::new();
        if o.draw_radial {
            segments.extend(radial_fan(
                vp,
                o.radial_density,
                o.line_extension,
                CardinalPlane::XZ,
            ));
        }
        let half_extent = o.grid_extent * o.line_extension * 0.5;
        let spacing = o.grid_extent * o.line_extension * 0.2;
        if o.draw_ortho_horizontal {
            segments.extend(parallel_lines(
                vp,
                Vector3::x(),
                Vector3::z(),
                half_extent,
                o.ortho_horizontal_density,
                spacing,
            ));
        }
        if o.draw_ortho_vertical {
            segments.extend(parallel_lines(
                vp,
                Vector3::z(),
                Vector3::x(),
                half_extent,
                o.ortho_vertical_density,
                spacing,
            ));
        }

        let (created, replaced) = self.replace_with_segments(GuideKind::OnePoint, segments);
        self.rebuild_horizon();
        info!("one-point guides: {created} created, {replaced} replaced");
        Ok(GenerateReport {
            created,
            replaced,
            kinds: vec![GuideKind::OnePoint],
            elapsed_ms: t0.elapsed().as_secs_f64() * 1000.0,
        })
    }

    pub fn generate_two_point_first(&mut self) -> Result<GenerateReport, RigError> {
        self.two_point_fan(
            MarkerRole::TwoPointFirst,
            GuideKind::TwoPointFirst,
            self.options.two_point.first_density,
        )
    }

    pub fn generate_two_point_second(&mut self) -> Result<GenerateReport, RigError> {
        self.two_point_fan(
            MarkerRole::TwoPointSecond,
            GuideKind::TwoPointSecond,
            self.options.two_point.second_density,
        )
    }

    fn two_point_fan(
        &mut self,
        role: MarkerRole,
        kind: GuideKind,
        density: i32,
    ) -> Result<GenerateReport, RigError> {
        self.require_mode(PerspectiveMode::TwoPoint)?;
        let t0 = Instant::now();
        self.seed_mode_defaults(PerspectiveMode::TwoPoint);
        let vp = self.vp_position(role)?;
        let segments = radial_fan(
            vp,
            density,
            self.options.two_point.line_extension,
            CardinalPlane::XZ,
        );
        let (created, replaced) = self.replace_with_segments(kind, segments);
        self.rebuild_horizon();
        info!("two-point fan {kind:?}: {created} created, {replaced} replaced");
        Ok(GenerateReport {
            created,
            replaced,
            kinds: vec![kind],
            elapsed_ms: t0.elapsed().as_secs_f64() * 1000.0,
        })
    }

    /// Vertical fence between the two VPs on the shared horizon.
    pub fn generate_two_point_verticals(&mut self) -> Result<GenerateReport, RigError> {
        self.require_mode(PerspectiveMode::TwoPoint)?;
        let t0 = Instant::now();
        self.seed_mode_defaults(PerspectiveMode::TwoPoint);
        let o = &self.options.two_point;
        let spec = VerticalFenceSpec {
            first_vp: self.vp_position(MarkerRole::TwoPointFirst)?,
            second_vp: self.vp_position(MarkerRole::TwoPointSecond)?,
            density: o.vertical_density,
            height: o.vertical_height,
            depth_offset: o.depth_offset,
            spacing_factor: o.vertical_spacing_factor,
            fallback_extent: o.line_extension,
        };
        let segments = crate::field::vertical_fence(&spec);
        let (created, replaced) = self.replace_with_segments(GuideKind::TwoPointVertical, segments);
        self.rebuild_horizon();
        info!("two-point verticals: {created} created, {replaced} replaced");
        Ok(GenerateReport {
            created,
            replaced,
            kinds: vec![GuideKind::TwoPointVertical],
            elapsed_ms: t0.elapsed().as_secs_f64() * 1000.0,
        })
    }

    /// Radial fans for both horizontal VPs and the vertical VP.
    pub fn generate_three_point(&mut self) -> Result<GenerateReport, RigError> {
        self.require_mode(PerspectiveMode::ThreePoint)?;
        let t0 = Instant::now();
        self.seed_mode_defaults(PerspectiveMode::ThreePoint);
        let o = self.options.three_point.clone();
        let ext = o.line_extension;

        let mut created = 0;
        let mut replaced = 0;
        let fans = [
            (
                MarkerRole::ThreePointHorizontalFirst,
                GuideKind::ThreePointHorizontalFirst,
                o.first_horizontal_density,
            ),
            (
                MarkerRole::ThreePointHorizontalSecond,
                GuideKind::ThreePointHorizontalSecond,
                o.second_horizontal_density,
            ),
            (
                MarkerRole::ThreePointVertical,
                GuideKind::ThreePointVertical,
                o.vertical_density,
            ),
        ];
        for (role, kind, density) in fans {
            let vp = self.vp_position(role)?;
            let segments = radial_fan(vp, density, ext, CardinalPlane::XZ);
            let (c, r) = self.replace_with_segments(kind, segments);
            created += c;
            replaced += r;
        }
        self.rebuild_horizon();
        info!("three-point guides: {created} created, {replaced} replaced");
        Ok(GenerateReport {
            created,
            replaced,
            kinds: vec![
                GuideKind::ThreePointHorizontalFirst,
                GuideKind::ThreePointHorizontalSecond,
                GuideKind::ThreePointVertical,
            ],
            elapsed_ms: t0.elapsed().as_secs_f64() * 1000.0,
        })
    }

    /// Spherical cage around the fisheye center.
    pub fn generate_fisheye(&mut self) -> Result<GenerateReport, RigError> {
        self.require_mode(PerspectiveMode::FishEye)?;
        let t0 = Instant::now();
        self.seed_mode_defaults(PerspectiveMode::FishEye);
        let center = self.vp_position(MarkerRole::FisheyeCenter)?;
        let o = &self.options.fisheye;
        let spec = SphereCageSpec {
            center,
            radius: o.radius,
            longitudes: o.longitudes,
            latitudes: o.latitudes,
            segments: o.segments,
            horizontal_scale: o.horizontal_scale,
            draw_latitudes: o.draw_latitudes,
        };
        let (lon_created, lon_replaced) =
            self.replace_with_polylines(GuideKind::FisheyeLongitude, longitude_lines(&spec));
        let (lat_created, lat_replaced) =
            self.replace_with_polylines(GuideKind::FisheyeLatitude, latitude_rings(&spec));
        self.rebuild_horizon();
        info!(
            "fisheye cage: {} longitudes, {} latitudes",
            lon_created, lat_created
        );
        Ok(GenerateReport {
            created: lon_created + lat_created,
            replaced: lon_replaced + lat_replaced,
            kinds: vec![GuideKind::FisheyeLongitude, GuideKind::FisheyeLatitude],
            elapsed_ms: t0.elapsed().as_secs_f64() * 1000.0,
        })
    }

    /// Box-face reference grids; available in every mode.
    pub fn generate_box_grid(&mut self) -> GenerateReport {
        let t0 = Instant::now();
        let o = &self.options.grid_box;
        let mut faces = Vec::new();
        for (flag, face) in [
            (o.draw_front, BoxFace::Front),
            (o.draw_back, BoxFace::Back),
            (o.draw_top, BoxFace::Top),
            (o.draw_bottom, BoxFace::Bottom),
            (o.draw_right, BoxFace::Right),
            (o.draw_left, BoxFace::Left),
        ] {
            if flag {
                faces.push(face);
            }
        }
        let grids = box_grid(o.center, o.size, o.subdivisions_u, o.subdivisions_v, &faces);

        let replaced = self.scene.remove_curves_where(|c| c.kind == GuideKind::GridPlane);
        let style = self.guide_style(GuideKind::GridPlane);
        let mut created = 0;
        for (_face, segments) in grids {
            let polylines: Vec<Polyline> = segments
                .into_iter()
                .map(|[a, b]| Polyline::segment(a, b))
                .collect();
            self.scene.add_curve(GuideKind::GridPlane, polylines, style);
            created += 1;
        }
        info!("box grids: {created} face grids, {replaced} replaced");
        GenerateReport {
            created,
            replaced,
            kinds: vec![GuideKind::GridPlane],
            elapsed_ms: t0.elapsed().as_secs_f64() * 1000.0,
        }
    }

    /// Rebuilds the horizon line for the active mode. One-point draws a
    /// fixed-length segment centered on the VP at its height; two- and
    /// three-point join the two horizontal VPs; other modes have no
    /// horizon line.
    pub fn rebuild_horizon(&mut self) {
        let endpoints = self.horizon_endpoints();
        self.scene
            .remove_curves_where(|c| c.kind == GuideKind::Horizon);
        if let Some((a, b)) = endpoints {
            let style = self.guide_style(GuideKind::Horizon);
            self.scene
                .add_curve(GuideKind::Horizon, vec![Polyline::segment(a, b)], style);
        }
    }

    fn horizon_endpoints(&self) -> Option<(Point3<f32>, Point3<f32>)> {
        match self.mode {
            PerspectiveMode::OnePoint => {
                let (center, z) = match self.scene.marker_with_role(MarkerRole::OnePoint) {
                    Some(vp) => ((vp.position.x, vp.position.y), vp.position.z),
                    None => {
                        let ctrl = self.scene.marker_with_role(MarkerRole::HorizonControl)?;
                        ((0.0, 0.0), ctrl.position.z)
                    }
                };
                let half = self.options.horizon.length * 0.5;
                Some((
                    Point3::new(center.0 - half, center.1, z),
                    Point3::new(center.0 + half, center.1, z),
                ))
            }
            PerspectiveMode::TwoPoint => {
                let a = self.scene.marker_with_role(MarkerRole::TwoPointFirst)?;
                let b = self.scene.marker_with_role(MarkerRole::TwoPointSecond)?;
                Some((a.position, b.position))
            }
            PerspectiveMode::ThreePoint => {
                let a = self
                    .scene
                    .marker_with_role(MarkerRole::ThreePointHorizontalFirst)?;
                let b = self
                    .scene
                    .marker_with_role(MarkerRole::ThreePointHorizontalSecond)?;
                Some((a.position, b.position))
            }
            PerspectiveMode::None | PerspectiveMode::FishEye => None,
        }
    }
}
