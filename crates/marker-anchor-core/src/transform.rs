use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::Rotator;

/// Rigid transform with per-axis scale: `p' = rotation * (scale ∘ p) + translation`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub rotation: UnitQuaternion<f32>,
    pub translation: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            rotation: UnitQuaternion::identity(),
            translation: Vector3::zeros(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    /// Unit-scale transform from a rotator and a translation.
    pub fn new(rotation: Rotator, translation: Vector3<f32>) -> Self {
        Self {
            rotation: rotation.to_quaternion(),
            translation,
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn with_scale(mut self, scale: Vector3<f32>) -> Self {
        self.scale = scale;
        self
    }

    #[inline]
    pub fn transform_position(&self, p: &Vector3<f32>) -> Vector3<f32> {
        self.rotation * p.component_mul(&self.scale) + self.translation
    }

    #[inline]
    pub fn transform_vector(&self, v: &Vector3<f32>) -> Vector3<f32> {
        self.rotation * v.component_mul(&self.scale)
    }

    /// Express a parent-space position in this transform's local frame, ignoring scale.
    #[inline]
    pub fn inverse_transform_position_no_scale(&self, p: &Vector3<f32>) -> Vector3<f32> {
        self.rotation.inverse_transform_vector(&(p - self.translation))
    }

    /// Inverse transform, exact for uniform scale. Zero scale components invert to zero.
    pub fn inverse(&self) -> Transform {
        let inv_scale = self.scale.map(|s| if s.abs() > f32::EPSILON { 1.0 / s } else { 0.0 });
        let inv_rot = self.rotation.inverse();
        let translation = (inv_rot * -self.translation).component_mul(&inv_scale);
        Transform {
            rotation: inv_rot,
            translation,
            scale: inv_scale,
        }
    }

    #[inline]
    pub fn forward_vector(&self) -> Vector3<f32> {
        self.rotation * Vector3::x()
    }

    #[inline]
    pub fn right_vector(&self) -> Vector3<f32> {
        self.rotation * Vector3::y()
    }

    #[inline]
    pub fn up_vector(&self) -> Vector3<f32> {
        self.rotation * Vector3::z()
    }
}
