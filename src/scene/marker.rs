use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::types::{Color, MarkerId, PerspectiveMode};

/// Which vanishing point a set of four extraction aid markers feeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AidGroup {
    OnePoint,
    TwoPointFirst,
    TwoPointSecond,
    ThreePointHorizontalFirst,
    ThreePointHorizontalSecond,
    ThreePointVertical,
}

impl AidGroup {
    /// The vanishing-point role this group's extraction targets.
    pub fn target_role(&self) -> MarkerRole {
        match self {
            AidGroup::OnePoint => MarkerRole::OnePoint,
            AidGroup::TwoPointFirst => MarkerRole::TwoPointFirst,
            AidGroup::TwoPointSecond => MarkerRole::TwoPointSecond,
            AidGroup::ThreePointHorizontalFirst => MarkerRole::ThreePointHorizontalFirst,
            AidGroup::ThreePointHorizontalSecond => MarkerRole::ThreePointHorizontalSecond,
            AidGroup::ThreePointVertical => MarkerRole::ThreePointVertical,
        }
    }

    /// The mode in which this group is usable.
    pub fn mode(&self) -> PerspectiveMode {
        match self {
            AidGroup::OnePoint => PerspectiveMode::OnePoint,
            AidGroup::TwoPointFirst | AidGroup::TwoPointSecond => PerspectiveMode::TwoPoint,
            AidGroup::ThreePointHorizontalFirst
            | AidGroup::ThreePointHorizontalSecond
            | AidGroup::ThreePointVertical => PerspectiveMode::ThreePoint,
        }
    }
}

/// Perspective role of a marker. An explicit tag, not a name convention:
/// the scene enforces uniqueness for every role except `Aid`, of which a
/// group holds up to four (indices 0..4; 0,1 form one aid line and 2,3
/// the other).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerRole {
    OnePoint,
    TwoPointFirst,
    TwoPointSecond,
    ThreePointHorizontalFirst,
    ThreePointHorizontalSecond,
    ThreePointVertical,
    FisheyeCenter,
    /// Controls the shared horizon height through its Z coordinate.
    HorizonControl,
    Aid {
        group: AidGroup,
        index: u8,
    },
}

impl MarkerRole {
    /// The mode this role belongs to; `HorizonControl` belongs to none.
    pub fn mode(&self) -> Option<PerspectiveMode> {
        match self {
            MarkerRole::OnePoint => Some(PerspectiveMode::OnePoint),
            MarkerRole::TwoPointFirst | MarkerRole::TwoPointSecond => {
                Some(PerspectiveMode::TwoPoint)
            }
            MarkerRole::ThreePointHorizontalFirst
            | MarkerRole::ThreePointHorizontalSecond
            | MarkerRole::ThreePointVertical => Some(PerspectiveMode::ThreePoint),
            MarkerRole::FisheyeCenter => Some(PerspectiveMode::FishEye),
            MarkerRole::HorizonControl => None,
            MarkerRole::Aid { group, .. } => Some(group.mode()),
        }
    }

    /// Roles the scene keeps unique (at most one marker per role).
    pub fn is_primary(&self) -> bool {
        !matches!(self, MarkerRole::Aid { .. })
    }

    /// Vanishing points constrained to the shared horizon height.
    pub fn on_horizon(&self) -> bool {
        matches!(
            self,
            MarkerRole::OnePoint
                | MarkerRole::TwoPointFirst
                | MarkerRole::TwoPointSecond
                | MarkerRole::ThreePointHorizontalFirst
                | MarkerRole::ThreePointHorizontalSecond
        )
    }
}

/// Zero-geometry scene node with a position and a display color.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Marker {
    pub id: MarkerId,
    pub role: MarkerRole,
    pub position: Point3<f32>,
    pub color: Color,
    pub visible: bool,
}
