use serde::{Deserialize, Serialize};

use super::marker::AidGroup;
use crate::types::{CurveId, CurveStyle, PerspectiveMode, Polyline};

/// Group tag of a guide curve. Clears, merges and visibility toggles
/// operate on kinds; generation replaces all curves of its own kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuideKind {
    OnePoint,
    TwoPointFirst,
    TwoPointSecond,
    TwoPointVertical,
    ThreePointHorizontalFirst,
    ThreePointHorizontalSecond,
    ThreePointVertical,
    FisheyeLongitude,
    FisheyeLatitude,
    GridPlane,
    Horizon,
    AidLine(AidGroup),
    /// Result of folding several guide groups into one curve.
    Merged,
}

impl GuideKind {
    /// The mode owning this kind; horizon and grid planes are shared.
    pub fn mode(&self) -> Option<PerspectiveMode> {
        match self {
            GuideKind::OnePoint => Some(PerspectiveMode::OnePoint),
            GuideKind::TwoPointFirst | GuideKind::TwoPointSecond | GuideKind::TwoPointVertical => {
                Some(PerspectiveMode::TwoPoint)
            }
            GuideKind::ThreePointHorizontalFirst
            | GuideKind::ThreePointHorizontalSecond
            | GuideKind::ThreePointVertical => Some(PerspectiveMode::ThreePoint),
            GuideKind::FisheyeLongitude | GuideKind::FisheyeLatitude => {
                Some(PerspectiveMode::FishEye)
            }
            GuideKind::GridPlane | GuideKind::Horizon | GuideKind::Merged => None,
            GuideKind::AidLine(group) => Some(group.mode()),
        }
    }

    /// Kinds regenerated by the mode's guide generators (everything the
    /// mode owns except its aid lines).
    pub fn is_generated_guide(&self) -> bool {
        !matches!(self, GuideKind::Horizon | GuideKind::AidLine(_))
    }
}

/// Guide curve: one or more polylines sharing a style and visibility.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GuideCurve {
    pub id: CurveId,
    pub kind: GuideKind,
    pub polylines: Vec<Polyline>,
    pub style: CurveStyle,
    pub visible: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_mode_ownership() {
        assert_eq!(GuideKind::OnePoint.mode(), Some(PerspectiveMode::OnePoint));
        assert_eq!(
            GuideKind::FisheyeLatitude.mode(),
            Some(PerspectiveMode::FishEye)
        );
        assert_eq!(GuideKind::Horizon.mode(), None);
        assert_eq!(GuideKind::GridPlane.mode(), None);
        assert_eq!(
            GuideKind::AidLine(AidGroup::TwoPointFirst).mode(),
            Some(PerspectiveMode::TwoPoint)
        );
        assert!(!GuideKind::AidLine(AidGroup::OnePoint).is_generated_guide());
        assert!(GuideKind::GridPlane.is_generated_guide());
    }
}
