//! Parametric line-field generators.
//!
//! Pure functions producing the raw segment/polyline geometry for guide
//! curves: radial fans around a vanishing point, parallel families and
//! vertical fences, box-face grids, and spherical fisheye cages. The rig
//! wraps these into scene curves; nothing here touches the scene.

pub mod grid;
pub mod parallel;
pub mod radial;
pub mod sphere;

pub use grid::{box_grid, plane_grid, BoxFace, PlaneGridSpec};
pub use parallel::{parallel_lines, vertical_fence, VerticalFenceSpec};
pub use radial::{radial_fan, CardinalPlane};
pub use sphere::{latitude_rings, longitude_lines, sphere_cage, SphereCageSpec};
