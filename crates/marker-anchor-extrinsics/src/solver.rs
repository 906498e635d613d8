//! Camera-relative pose of planar targets from their image corners.

use nalgebra::{Matrix3, Point2, Rotation3, Vector3};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::homography::estimate_homography;
use crate::CameraIntrinsics;

/// Pose of a planar target in the camera frame (x right, y down, z forward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanarPose {
    /// Target origin, meters.
    pub translation: Vector3<f32>,
    /// Axis-angle rotation target → camera, radians.
    pub rotation_vector: Vector3<f32>,
}

/// Corners of a square marker of side `size` centered at the origin, TL, TR, BR, BL.
pub fn marker_object_corners(size: f32) -> [Point2<f64>; 4] {
    let h = size as f64 * 0.5;
    [
        Point2::new(-h, h),
        Point2::new(h, h),
        Point2::new(h, -h),
        Point2::new(-h, -h),
    ]
}

/// Solves extrinsics from plane ↔ image correspondences.
pub trait ExtrinsicsSolver {
    /// Pose from `object` points on the `z = 0` plane and their pixel positions.
    fn solve_planar(
        &self,
        object: &[Point2<f64>],
        image: &[Point2<f32>],
        intrinsics: &CameraIntrinsics,
    ) -> Option<PlanarPose>;

    /// Pose of a single square marker from its TL, TR, BR, BL pixel corners.
    fn solve_marker(
        &self,
        corners: &[Point2<f32>; 4],
        size: f32,
        intrinsics: &CameraIntrinsics,
    ) -> Option<PlanarPose> {
        self.solve_planar(&marker_object_corners(size), corners, intrinsics)
    }
}

/// Homography decomposition followed by projection onto SO(3).
#[derive(Clone, Copy, Debug, Default)]
pub struct PlanarPoseSolver;

impl ExtrinsicsSolver for PlanarPoseSolver {
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "trace", skip(self, object, image, intrinsics), fields(n = object.len()))
    )]
    fn solve_planar(
        &self,
        object: &[Point2<f64>],
        image: &[Point2<f32>],
        intrinsics: &CameraIntrinsics,
    ) -> Option<PlanarPose> {
        if object.len() != image.len() || object.len() < 4 {
            return None;
        }
        let normalized: Vec<Point2<f64>> = image.iter().map(|p| intrinsics.normalize(p)).collect();
        let h = estimate_homography(object, &normalized)?;
        pose_from_homography(&h.h)
    }
}

/// Split `H ~ [r1 r2 t]` into a rotation and translation with `t.z > 0`.
fn pose_from_homography(h: &Matrix3<f64>) -> Option<PlanarPose> {
    let h1 = h.column(0).into_owned();
    let h2 = h.column(1).into_owned();
    let h3 = h.column(2).into_owned();

    let norm = h1.norm() + h2.norm();
    if norm < 1e-12 {
        return None;
    }
    let mut lambda = 2.0 / norm;
    if h3.z * lambda < 0.0 {
        lambda = -lambda;
    }

    let r1 = h1 * lambda;
    let r2 = h2 * lambda;
    let t = h3 * lambda;
    let r3 = r1.cross(&r2);

    let rotation = project_to_so3(&Matrix3::from_columns(&[r1, r2, r3]))?;
    let rotation_vector = Rotation3::from_matrix_unchecked(rotation).scaled_axis();

    if !t.iter().chain(rotation_vector.iter()).all(|v| v.is_finite()) {
        return None;
    }
    Some(PlanarPose {
        translation: t.cast::<f32>(),
        rotation_vector: rotation_vector.cast::<f32>(),
    })
}

/// Closest rotation in the Frobenius sense.
fn project_to_so3(m: &Matrix3<f64>) -> Option<Matrix3<f64>> {
    let svd = m.svd(true, true);
    let mut u = svd.u?;
    let v_t = svd.v_t?;
    let r = u * v_t;
    if r.determinant() >= 0.0 {
        return Some(r);
    }
    u.column_mut(2).neg_mut();
    Some(u * v_t)
}
