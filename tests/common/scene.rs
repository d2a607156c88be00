use nalgebra::{Point3, Vector3};

use perspective_rig::camera::Camera;

/// Camera on the -Y axis looking at the origin.
pub fn camera_facing_origin(distance: f32) -> Camera {
    Camera::look_at(
        Point3::new(0.0, -distance, 0.0),
        Point3::origin(),
        Vector3::z(),
        60f32.to_radians(),
        16.0 / 9.0,
    )
}
