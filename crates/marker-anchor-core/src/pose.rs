use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::Rotator;

/// World pose of the head-mounted camera as reported by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub location: Vector3<f32>,
    pub rotation: Rotator,
}

impl CameraPose {
    pub fn new(location: Vector3<f32>, rotation: Rotator) -> Self {
        Self { location, rotation }
    }

    #[inline]
    pub fn forward_vector(&self) -> Vector3<f32> {
        self.rotation.forward_vector()
    }

    #[inline]
    pub fn right_vector(&self) -> Vector3<f32> {
        self.rotation.right_vector()
    }

    #[inline]
    pub fn up_vector(&self) -> Vector3<f32> {
        self.rotation.up_vector()
    }

    /// World location of a marker given its application-space translation.
    ///
    /// `location + forward * t.x - right * t.y - up * t.z`.
    pub fn marker_world_location(&self, t: &Vector3<f32>) -> Vector3<f32> {
        let (forward, right, up) = self.rotation.axes();
        self.location + forward * t.x - right * t.y - up * t.z
    }

    /// World direction of an application-space vector seen from this camera.
    ///
    /// `forward * n.x + right * n.y + up * n.z`.
    pub fn marker_world_direction(&self, n: &Vector3<f32>) -> Vector3<f32> {
        let (forward, right, up) = self.rotation.axes();
        forward * n.x + right * n.y + up * n.z
    }

    /// Rotation that turns a flat shape-plane mesh to face this camera.
    ///
    /// Shape planes have Z as their normal, so the camera rotator cannot be
    /// added directly.
    pub fn facing_rotation(&self) -> Rotator {
        let r = self.rotation;
        Rotator::new(-r.roll, 90.0 + r.yaw, 90.0 + r.pitch)
    }
}

/// Final pose applied to a tracked entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackedPose {
    pub location: Vector3<f32>,
    pub rotation: Rotator,
}

impl TrackedPose {
    pub fn new(location: Vector3<f32>, rotation: Rotator) -> Self {
        Self { location, rotation }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn marker_in_front_of_unrotated_camera() {
        let cam = CameraPose::new(Vector3::new(10.0, 0.0, 64.0), Rotator::ZERO);
        let loc = cam.marker_world_location(&Vector3::new(100.0, 5.0, -2.0));
        assert_abs_diff_eq!(loc, Vector3::new(110.0, -5.0, 66.0), epsilon = 1e-5);
    }

    #[test]
    fn world_direction_follows_camera_yaw() {
        let cam = CameraPose::new(Vector3::zeros(), Rotator::new(0.0, 90.0, 0.0));
        let dir = cam.marker_world_direction(&Vector3::new(1.0, 0.0, 0.0));
        assert_abs_diff_eq!(dir, Vector3::y(), epsilon = 1e-6);
    }

    #[test]
    fn facing_rotation_swaps_components() {
        let cam = CameraPose::new(Vector3::zeros(), Rotator::new(5.0, 30.0, 2.0));
        assert_eq!(cam.facing_rotation(), Rotator::new(-2.0, 120.0, 95.0));
    }
}
