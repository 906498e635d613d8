//! Pitch/yaw/roll rotations in the application convention.

use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub};

use nalgebra::{Matrix3, Rotation3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// Euler rotation in degrees.
///
/// Axes follow the application convention: X forward, Y right, Z up.
/// `pitch` rotates about Y, `yaw` about Z and `roll` about X.
///
/// Arithmetic is component-wise, which is how marker rotation deltas are
/// formed; it is *not* rotation composition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rotator {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl Rotator {
    pub const ZERO: Rotator = Rotator {
        pitch: 0.0,
        yaw: 0.0,
        roll: 0.0,
    };

    #[inline]
    pub const fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Orientation that points the forward axis along `dir`, with zero roll.
    ///
    /// A zero vector yields [`Rotator::ZERO`].
    pub fn from_direction(dir: &Vector3<f32>) -> Self {
        let yaw = dir.y.atan2(dir.x).to_degrees();
        let pitch = dir.z.atan2((dir.x * dir.x + dir.y * dir.y).sqrt()).to_degrees();
        Self {
            pitch,
            yaw,
            roll: 0.0,
        }
    }

    /// `(forward, right, up)` unit axes of this rotation.
    pub fn axes(&self) -> (Vector3<f32>, Vector3<f32>, Vector3<f32>) {
        let (sp, cp) = self.pitch.to_radians().sin_cos();
        let (sy, cy) = self.yaw.to_radians().sin_cos();
        let (sr, cr) = self.roll.to_radians().sin_cos();

        let forward = Vector3::new(cp * cy, cp * sy, sp);
        let right = Vector3::new(sr * sp * cy - cr * sy, sr * sp * sy + cr * cy, -sr * cp);
        let up = Vector3::new(-(cr * sp * cy + sr * sy), cy * sr - cr * sp * sy, cr * cp);
        (forward, right, up)
    }

    #[inline]
    pub fn forward_vector(&self) -> Vector3<f32> {
        self.axes().0
    }

    #[inline]
    pub fn right_vector(&self) -> Vector3<f32> {
        self.axes().1
    }

    #[inline]
    pub fn up_vector(&self) -> Vector3<f32> {
        self.axes().2
    }

    /// Rotate `v` from the rotator's local frame into the parent frame.
    pub fn rotate_vector(&self, v: &Vector3<f32>) -> Vector3<f32> {
        let (forward, right, up) = self.axes();
        forward * v.x + right * v.y + up * v.z
    }

    /// Rotation matrix whose columns are the forward, right and up axes.
    pub fn to_matrix(&self) -> Matrix3<f32> {
        let (forward, right, up) = self.axes();
        Matrix3::from_columns(&[forward, right, up])
    }

    pub fn to_quaternion(&self) -> UnitQuaternion<f32> {
        UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(self.to_matrix()))
    }

    /// True when every component is finite.
    pub fn is_finite(&self) -> bool {
        self.pitch.is_finite() && self.yaw.is_finite() && self.roll.is_finite()
    }
}

impl Add for Rotator {
    type Output = Rotator;

    fn add(self, rhs: Rotator) -> Rotator {
        Rotator::new(self.pitch + rhs.pitch, self.yaw + rhs.yaw, self.roll + rhs.roll)
    }
}

impl AddAssign for Rotator {
    fn add_assign(&mut self, rhs: Rotator) {
        *self = *self + rhs;
    }
}

impl Sub for Rotator {
    type Output = Rotator;

    fn sub(self, rhs: Rotator) -> Rotator {
        Rotator::new(self.pitch - rhs.pitch, self.yaw - rhs.yaw, self.roll - rhs.roll)
    }
}

impl Neg for Rotator {
    type Output = Rotator;

    fn neg(self) -> Rotator {
        Rotator::new(-self.pitch, -self.yaw, -self.roll)
    }
}

impl fmt::Display for Rotator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "P={:.2} Y={:.2} R={:.2}",
            self.pitch, self.yaw, self.roll
        )
    }
}
