//! Option types configuring the rig.
//!
//! Each group mirrors the validated ranges the original tool registered
//! for its UI controls; `RigOptions::validate` reports the first field
//! out of range. All groups deserialize with defaults so demo configs
//! only name what they override.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::RigError;
use crate::scene::MarkerRole;
use crate::types::Color;

/// Rig-wide options controlling markers, guides and trimming.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RigOptions {
    pub horizon: HorizonOptions,
    pub guides: GuideStyleOptions,
    pub one_point: OnePointOptions,
    pub two_point: TwoPointOptions,
    pub three_point: ThreePointOptions,
    pub fisheye: FisheyeOptions,
    pub grid_box: GridBoxOptions,
    pub trim: TrimOptions,
    pub extraction: ExtractionOptions,
    pub camera: CameraOptions,
    pub colors: MarkerColorOptions,
    pub display: DisplayOptions,
}

impl RigOptions {
    /// Checks every range-bound field; returns the first violation.
    pub fn validate(&self) -> Result<(), RigError> {
        fn check(
            field: &'static str,
            ok: bool,
            reason: &str,
        ) -> Result<(), RigError> {
            if ok {
                Ok(())
            } else {
                Err(RigError::InvalidOption {
                    field,
                    reason: reason.to_string(),
                })
            }
        }

        check(
            "horizon.length",
            self.horizon.length >= 1.0,
            "must be at least 1.0",
        )?;
        check(
            "horizon.thickness",
            (0.001..=0.5).contains(&self.horizon.thickness),
            "must be within 0.001..=0.5",
        )?;
        check(
            "guides.thickness",
            (0.001..=0.5).contains(&self.guides.thickness),
            "must be within 0.001..=0.5",
        )?;
        check(
            "guides.opacity",
            (0.0..=1.0).contains(&self.guides.opacity),
            "must be within 0.0..=1.0",
        )?;
        check(
            "one_point.radial_density",
            self.one_point.radial_density >= 2,
            "must be at least 2",
        )?;
        check(
            "one_point.grid_extent",
            self.one_point.grid_extent >= 0.1,
            "must be at least 0.1",
        )?;
        check(
            "one_point.line_extension",
            self.one_point.line_extension >= 1.0,
            "must be at least 1.0",
        )?;
        check(
            "two_point.first_density",
            self.two_point.first_density >= 1,
            "must be at least 1",
        )?;
        check(
            "two_point.second_density",
            self.two_point.second_density >= 1,
            "must be at least 1",
        )?;
        check(
            "two_point.vertical_spacing_factor",
            (0.1..=5.0).contains(&self.two_point.vertical_spacing_factor),
            "must be within 0.1..=5.0",
        )?;
        check(
            "two_point.vertical_height",
            self.two_point.vertical_height >= 0.1,
            "must be at least 0.1",
        )?;
        check(
            "two_point.line_extension",
            self.two_point.line_extension >= 1.0,
            "must be at least 1.0",
        )?;
        check(
            "three_point.line_extension",
            self.three_point.line_extension >= 1.0,
            "must be at least 1.0",
        )?;
        check(
            "three_point.densities",
            self.three_point.first_horizontal_density >= 1
                && self.three_point.second_horizontal_density >= 1
                && self.three_point.vertical_density >= 1,
            "each density must be at least 1",
        )?;
        check(
            "fisheye.longitudes",
            self.fisheye.longitudes >= 3,
            "must be at least 3",
        )?;
        check(
            "fisheye.latitudes",
            self.fisheye.latitudes >= 1,
            "must be at least 1",
        )?;
        check(
            "fisheye.radius",
            self.fisheye.radius >= 0.1,
            "must be at least 0.1",
        )?;
        check(
            "fisheye.segments",
            (4..=64).contains(&self.fisheye.segments),
            "must be within 4..=64",
        )?;
        check(
            "fisheye.horizontal_scale",
            (0.1..=5.0).contains(&self.fisheye.horizontal_scale),
            "must be within 0.1..=5.0",
        )?;
        check(
            "grid_box.size",
            self.grid_box.size.iter().all(|s| *s >= 0.1),
            "each extent must be at least 0.1",
        )?;
        check(
            "grid_box.subdivisions",
            self.grid_box.subdivisions_u >= 1 && self.grid_box.subdivisions_v >= 1,
            "must be at least 1",
        )?;
        check(
            "trim.margin",
            (0.0..=0.5).contains(&self.trim.margin),
            "must be within 0.0..=0.5",
        )?;
        check(
            "trim.min_visible_length",
            self.trim.min_visible_length >= 0.0,
            "must not be negative",
        )?;
        check(
            "extraction.tolerance",
            self.extraction.tolerance >= 0.0,
            "must not be negative",
        )?;
        check(
            "camera.eye_height",
            self.camera.eye_height >= 0.1,
            "must be at least 0.1",
        )?;
        check(
            "camera.distance",
            self.camera.distance >= 1.0,
            "must be at least 1.0",
        )?;
        Ok(())
    }
}

/// Horizon line appearance and the shared horizon height.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct HorizonOptions {
    /// Shared horizon height (Z) for one/two/three-point modes.
    pub z_level: f32,
    /// Full length of the one-point horizon segment.
    pub length: f32,
    pub thickness: f32,
    pub color: Color,
}

impl Default for HorizonOptions {
    fn default() -> Self {
        Self {
            z_level: 0.0,
            length: 200.0,
            thickness: 0.02,
            color: Color::rgba(0.9, 0.9, 0.2, 1.0),
        }
    }
}

/// Shared appearance of generated guide curves.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideStyleOptions {
    pub thickness: f32,
    pub opacity: f32,
}

impl Default for GuideStyleOptions {
    fn default() -> Self {
        Self {
            thickness: 0.01,
            opacity: 0.8,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct OnePointOptions {
    pub radial_density: i32,
    pub ortho_horizontal_density: i32,
    pub ortho_vertical_density: i32,
    pub draw_radial: bool,
    pub draw_ortho_horizontal: bool,
    pub draw_ortho_vertical: bool,
    /// Scales the cross-hatch extent relative to the line extension.
    pub grid_extent: f32,
    pub line_extension: f32,
}

impl Default for OnePointOptions {
    fn default() -> Self {
        Self {
            radial_density: 16,
            ortho_horizontal_density: 7,
            ortho_vertical_density: 7,
            draw_radial: true,
            draw_ortho_horizontal: true,
            draw_ortho_vertical: true,
            grid_extent: 1.0,
            line_extension: 100.0,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TwoPointOptions {
    pub first_density: i32,
    pub second_density: i32,
    pub vertical_density: i32,
    pub vertical_spacing_factor: f32,
    pub vertical_height: f32,
    /// Offset of the vertical-fence plane along Y.
    pub depth_offset: f32,
    pub line_extension: f32,
}

impl Default for TwoPointOptions {
    fn default() -> Self {
        Self {
            first_density: 10,
            second_density: 10,
            vertical_density: 9,
            vertical_spacing_factor: 1.0,
            vertical_height: 20.0,
            depth_offset: 0.0,
            line_extension: 200.0,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreePointOptions {
    pub line_extension: f32,
    pub first_horizontal_density: i32,
    pub second_horizontal_density: i32,
    pub vertical_density: i32,
}

impl Default for ThreePointOptions {
    fn default() -> Self {
        Self {
            line_extension: 200.0,
            first_horizontal_density: 8,
            second_horizontal_density: 8,
            vertical_density: 8,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct FisheyeOptions {
    pub longitudes: i32,
    pub latitudes: i32,
    pub radius: f32,
    /// Samples per curve; each polyline gets `segments + 1` points.
    pub segments: i32,
    pub draw_latitudes: bool,
    pub horizontal_scale: f32,
}

impl Default for FisheyeOptions {
    fn default() -> Self {
        Self {
            longitudes: 16,
            latitudes: 8,
            radius: 15.0,
            segments: 24,
            draw_latitudes: true,
            horizontal_scale: 1.0,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GridBoxOptions {
    pub center: Point3<f32>,
    pub size: Vector3<f32>,
    pub subdivisions_u: i32,
    pub subdivisions_v: i32,
    pub draw_front: bool,
    pub draw_back: bool,
    pub draw_top: bool,
    pub draw_bottom: bool,
    pub draw_left: bool,
    pub draw_right: bool,
}

impl Default for GridBoxOptions {
    fn default() -> Self {
        Self {
            center: Point3::origin(),
            size: Vector3::new(10.0, 10.0, 10.0),
            subdivisions_u: 10,
            subdivisions_v: 10,
            draw_front: true,
            draw_back: false,
            draw_top: true,
            draw_bottom: false,
            draw_left: false,
            draw_right: false,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TrimOptions {
    /// Margin outside the camera frame still kept when trimming
    /// (0 trims exactly at the frame edges).
    pub margin: f32,
    /// Trimmed segments shorter than this (world units) are hidden.
    pub min_visible_length: f32,
}

impl Default for TrimOptions {
    fn default() -> Self {
        Self {
            margin: 0.05,
            min_visible_length: 0.05,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionOptions {
    /// Maximum closest-approach distance still accepted as an
    /// intersection.
    pub tolerance: f32,
    /// Half-spread of freshly seeded aid markers around their target.
    pub seed_spread: f32,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            tolerance: 1e-3,
            seed_spread: 5.0,
        }
    }
}

/// Inputs for the suggested camera placement.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraOptions {
    pub eye_height: f32,
    pub distance: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            eye_height: 1.6,
            distance: 15.0,
        }
    }
}

/// Display colors per marker role.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerColorOptions {
    pub one_point: Color,
    pub two_point_first: Color,
    pub two_point_second: Color,
    pub three_point_horizontal_first: Color,
    pub three_point_horizontal_second: Color,
    pub three_point_vertical: Color,
    pub fisheye_center: Color,
    pub horizon_control: Color,
    pub aid: Color,
}

impl Default for MarkerColorOptions {
    fn default() -> Self {
        Self {
            one_point: Color::rgba(1.0, 0.7, 0.2, 1.0),
            two_point_first: Color::rgba(1.0, 0.4, 0.4, 1.0),
            two_point_second: Color::rgba(0.4, 1.0, 0.4, 1.0),
            three_point_horizontal_first: Color::rgba(1.0, 0.2, 0.2, 1.0),
            three_point_horizontal_second: Color::rgba(0.2, 1.0, 0.2, 1.0),
            three_point_vertical: Color::rgba(0.2, 0.2, 1.0, 1.0),
            fisheye_center: Color::rgba(0.5, 0.2, 0.8, 1.0),
            horizon_control: Color::rgba(0.9, 0.9, 0.2, 1.0),
            aid: Color::rgba(0.3, 0.7, 1.0, 0.9),
        }
    }
}

impl MarkerColorOptions {
    /// Configured color for a marker role.
    pub fn for_role(&self, role: MarkerRole) -> Color {
        match role {
            MarkerRole::OnePoint => self.one_point,
            MarkerRole::TwoPointFirst => self.two_point_first,
            MarkerRole::TwoPointSecond => self.two_point_second,
            MarkerRole::ThreePointHorizontalFirst => self.three_point_horizontal_first,
            MarkerRole::ThreePointHorizontalSecond => self.three_point_horizontal_second,
            MarkerRole::ThreePointVertical => self.three_point_vertical,
            MarkerRole::FisheyeCenter => self.fisheye_center,
            MarkerRole::HorizonControl => self.horizon_control,
            MarkerRole::Aid { .. } => self.aid,
        }
    }
}

/// Visibility toggles.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    /// Draw temporary lines between complete aid groups.
    pub show_aid_lines: bool,
    /// Show the primary vanishing-point markers.
    pub show_markers: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_aid_lines: false,
            show_markers: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(RigOptions::default().validate().is_ok());
    }

    #[test]
    fn first_violation_is_reported_with_its_field() {
        let mut opts = RigOptions::default();
        opts.fisheye.segments = 100;
        match opts.validate() {
            Err(RigError::InvalidOption { field, .. }) => {
                assert_eq!(field, "fisheye.segments");
            }
            other => panic!("expected InvalidOption, got {other:?}"),
        }
    }

    #[test]
    fn config_overrides_merge_over_defaults() {
        let json = r#"{ "fisheye": { "longitudes": 24 }, "trim": { "margin": 0.0 } }"#;
        let opts: RigOptions = serde_json::from_str(json).expect("parses");
        assert_eq!(opts.fisheye.longitudes, 24);
        assert_eq!(opts.fisheye.latitudes, 8);
        assert_eq!(opts.trim.margin, 0.0);
        assert!(opts.validate().is_ok());
    }
}
