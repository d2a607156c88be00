#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod rig;
pub mod scene;
pub mod types;

// Geometry modules – public, usable standalone.
pub mod camera;
pub mod clip;
pub mod field;
pub mod intersect;

// --- High-level re-exports -------------------------------------------------

// Main entry points: the rig session, its options and errors.
pub use crate::error::RigError;
pub use crate::rig::options::RigOptions;
pub use crate::rig::PerspectiveRig;
pub use crate::types::PerspectiveMode;

// Scene vocabulary used throughout the API.
pub use crate::scene::{AidGroup, GuideKind, Marker, MarkerRole, Scene};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use perspective_rig::prelude::*;
///
/// # fn main() {
/// let mut rig = PerspectiveRig::with_defaults();
/// rig.set_mode(PerspectiveMode::OnePoint);
/// let report = rig.generate_one_point().unwrap();
/// println!("created={} replaced={}", report.created, report.replaced);
/// # }
/// ```
pub mod prelude {
    pub use crate::rig::options::RigOptions;
    pub use crate::rig::PerspectiveRig;
    pub use crate::scene::{AidGroup, GuideKind, MarkerRole};
    pub use crate::types::PerspectiveMode;
    pub use crate::RigError;
}
