//! Camera-space → application-space conventions.
//!
//! The detector reports extrinsics in the OpenCV camera frame (x right,
//! y down, z forward, meters). The application uses X forward, Y right,
//! Z up in centimeter units. The rotation mappings are per physical rig and
//! were tuned on the real mounts; keep the permutations and signs as they are.
//!
//! | rig           | forward | right | up | pitch | yaw | roll |
//! |---------------|---------|-------|----|-------|-----|------|
//! | board         | z       | x     | y  | x     | y   | z    |
//! | single marker | y       | z     | x  | z     | x   | y    |
//!
//! Plane-of-markers rigs use the single-marker rotation mapping per marker.

use nalgebra::Vector3;

use crate::Rotator;

/// Detector meters to application units.
pub const METERS_TO_UNITS: f32 = 100.0;

/// `(t.z, -t.x, t.y) * 100`. Used for every marker kind.
#[inline]
pub fn vector_from_camera_translation(t: &Vector3<f32>) -> Vector3<f32> {
    Vector3::new(t.z, -t.x, t.y) * METERS_TO_UNITS
}

/// Inverse of [`vector_from_camera_translation`].
#[inline]
pub fn camera_translation_from_vector(v: &Vector3<f32>) -> Vector3<f32> {
    Vector3::new(-v.y, v.z, v.x) / METERS_TO_UNITS
}

/// Board rig: `(pitch, yaw, roll) = (r.x, r.y, r.z)` in degrees.
#[inline]
pub fn rotator_from_board_rotation_vector(r: &Vector3<f32>) -> Rotator {
    Rotator::new(r.x.to_degrees(), r.y.to_degrees(), r.z.to_degrees())
}

/// Single-marker rig: `pitch = r.z`, `yaw = r.x`, `roll = r.y`, in degrees.
#[inline]
pub fn rotator_from_marker_rotation_vector(r: &Vector3<f32>) -> Rotator {
    Rotator::new(r.z.to_degrees(), r.x.to_degrees(), r.y.to_degrees())
}

/// Inverse of [`rotator_from_marker_rotation_vector`]: `r = (yaw, roll, pitch)` in radians.
#[inline]
pub fn marker_rotation_vector_from_rotator(rot: &Rotator) -> Vector3<f32> {
    Vector3::new(
        rot.yaw.to_radians(),
        rot.roll.to_radians(),
        rot.pitch.to_radians(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn translation_is_permuted_and_scaled() {
        for t in [
            Vector3::new(0.1_f32, -0.2, 1.5),
            Vector3::new(-0.35, 0.0, 0.8),
            Vector3::new(0.0, 0.0, 0.0),
        ] {
            let v = vector_from_camera_translation(&t);
            assert_abs_diff_eq!(
                v,
                Vector3::new(t.z * 100.0, -t.x * 100.0, t.y * 100.0),
                epsilon = 1e-5
            );
            assert_abs_diff_eq!(camera_translation_from_vector(&v), t, epsilon = 1e-6);
        }
    }

    #[test]
    fn board_rotation_maps_axes_directly() {
        let rot = rotator_from_board_rotation_vector(&Vector3::new(FRAC_PI_2, 0.0, -FRAC_PI_2));
        assert_abs_diff_eq!(rot.pitch, 90.0, epsilon = 1e-4);
        assert_abs_diff_eq!(rot.yaw, 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(rot.roll, -90.0, epsilon = 1e-4);
    }

    #[test]
    fn marker_rotation_permutation_round_trips() {
        // r = (rx, ry, rz)  ->  (pitch, yaw, roll) = (rz, rx, ry)  ->  (yaw, roll, pitch) = r
        let r = Vector3::new(0.3_f32, -1.1, 2.4);
        let rot = rotator_from_marker_rotation_vector(&r);
        assert_abs_diff_eq!(rot.pitch, 2.4_f32.to_degrees(), epsilon = 1e-4);
        assert_abs_diff_eq!(rot.yaw, 0.3_f32.to_degrees(), epsilon = 1e-4);
        assert_abs_diff_eq!(rot.roll, (-1.1_f32).to_degrees(), epsilon = 1e-4);
        assert_abs_diff_eq!(marker_rotation_vector_from_rotator(&rot), r, epsilon = 1e-6);
    }
}
