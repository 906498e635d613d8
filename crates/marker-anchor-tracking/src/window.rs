//! Window-move mode: a UI window held in front of the camera.

use marker_anchor_core::{CameraPose, TrackedPose};

/// Distance factors for zooming the held window.
pub const ZOOM_IN: f32 = 0.9;
pub const ZOOM_OUT: f32 = 1.1;

/// Window `distance` units along the camera forward axis, turned to face it.
pub fn window_pose(camera: &CameraPose, distance: f32) -> TrackedPose {
    TrackedPose::new(
        camera.location + camera.forward_vector() * distance,
        camera.facing_rotation(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use marker_anchor_core::Rotator;
    use nalgebra::Vector3;

    #[test]
    fn window_sits_on_camera_forward() {
        let camera = CameraPose::new(Vector3::new(10.0, 0.0, 64.0), Rotator::new(0.0, 90.0, 0.0));
        let pose = window_pose(&camera, 200.0);
        assert_abs_diff_eq!(pose.location, Vector3::new(10.0, 200.0, 64.0), epsilon = 1e-3);
        assert_eq!(pose.rotation, Rotator::new(0.0, 180.0, 90.0));
    }
}
