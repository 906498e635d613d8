//! Pinhole camera intrinsics with 5-coefficient radial/tangential distortion.

use std::path::Path;

use nalgebra::{Matrix3, Point2, Vector3};
use serde::{Deserialize, Serialize};

use crate::config::{read_json, write_json, ConfigIoError};

/// Iterations of the fixed-point undistortion.
const UNDISTORT_ITERATIONS: usize = 10;

/// Errors produced while loading or validating intrinsics.
#[derive(thiserror::Error, Debug)]
pub enum IntrinsicsError {
    #[error(transparent)]
    Io(#[from] ConfigIoError),
    #[error("image size must be non-zero (width={width}, height={height})")]
    InvalidSize { width: u32, height: u32 },
    #[error("focal lengths must be finite and > 0 (fx={fx}, fy={fy})")]
    InvalidFocal { fx: f64, fy: f64 },
    #[error("principal point and distortion coefficients must be finite")]
    NonFinite,
}

/// Camera intrinsics for a given image resolution.
///
/// `distortion` is `[k1, k2, p1, p2, k3]` (OpenCV order).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraIntrinsics {
    pub width: u32,
    pub height: u32,
    pub fx: f64,
    pub fy: f64,
    pub cx: f64,
    pub cy: f64,
    #[serde(default)]
    pub distortion: [f64; 5],
}

impl CameraIntrinsics {
    /// Distortion-free intrinsics.
    pub fn pinhole(width: u32, height: u32, fx: f64, fy: f64, cx: f64, cy: f64) -> Self {
        Self {
            width,
            height,
            fx,
            fy,
            cx,
            cy,
            distortion: [0.0; 5],
        }
    }

    /// Load and validate intrinsics from a JSON file.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IntrinsicsError> {
        let intrinsics: Self = read_json(path)?;
        intrinsics.validate()?;
        Ok(intrinsics)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigIoError> {
        write_json(self, path)
    }

    pub fn validate(&self) -> Result<(), IntrinsicsError> {
        if self.width == 0 || self.height == 0 {
            return Err(IntrinsicsError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }
        if !self.fx.is_finite() || !self.fy.is_finite() || self.fx <= 0.0 || self.fy <= 0.0 {
            return Err(IntrinsicsError::InvalidFocal {
                fx: self.fx,
                fy: self.fy,
            });
        }
        if !self.cx.is_finite()
            || !self.cy.is_finite()
            || self.distortion.iter().any(|k| !k.is_finite())
        {
            return Err(IntrinsicsError::NonFinite);
        }
        Ok(())
    }

    /// Rescale to another resolution of the same sensor.
    ///
    /// Distortion coefficients act on normalized coordinates and are kept.
    pub fn resized(&self, width: u32, height: u32) -> Result<Self, IntrinsicsError> {
        if width == 0 || height == 0 {
            return Err(IntrinsicsError::InvalidSize { width, height });
        }
        self.validate()?;
        let ax = width as f64 / self.width as f64;
        let ay = height as f64 / self.height as f64;
        Ok(Self {
            width,
            height,
            fx: self.fx * ax,
            fy: self.fy * ay,
            cx: self.cx * ax,
            cy: self.cy * ay,
            distortion: self.distortion,
        })
    }

    pub fn camera_matrix(&self) -> Matrix3<f64> {
        Matrix3::new(
            self.fx, 0.0, self.cx, //
            0.0, self.fy, self.cy, //
            0.0, 0.0, 1.0,
        )
    }

    #[inline]
    fn has_distortion(&self) -> bool {
        self.distortion.iter().any(|&k| k != 0.0)
    }

    /// Apply the distortion model to normalized coordinates.
    fn distort(&self, x: f64, y: f64) -> (f64, f64) {
        let [k1, k2, p1, p2, k3] = self.distortion;
        let r2 = x * x + y * y;
        let radial = 1.0 + ((k3 * r2 + k2) * r2 + k1) * r2;
        let xd = x * radial + 2.0 * p1 * x * y + p2 * (r2 + 2.0 * x * x);
        let yd = y * radial + p1 * (r2 + 2.0 * y * y) + 2.0 * p2 * x * y;
        (xd, yd)
    }

    /// Pixel → undistorted normalized image coordinates.
    pub fn normalize(&self, px: &Point2<f32>) -> Point2<f64> {
        let x0 = (px.x as f64 - self.cx) / self.fx;
        let y0 = (px.y as f64 - self.cy) / self.fy;
        if !self.has_distortion() {
            return Point2::new(x0, y0);
        }

        let [k1, k2, p1, p2, k3] = self.distortion;
        let (mut x, mut y) = (x0, y0);
        for _ in 0..UNDISTORT_ITERATIONS {
            let r2 = x * x + y * y;
            let icdist = 1.0 / (1.0 + ((k3 * r2 + k2) * r2 + k1) * r2);
            let dx = 2.0 * p1 * x * y + p2 * (r2 + 2.0 * x * x);
            let dy = p1 * (r2 + 2.0 * y * y) + 2.0 * p2 * x * y;
            x = (x0 - dx) * icdist;
            y = (y0 - dy) * icdist;
        }
        Point2::new(x, y)
    }

    /// Camera-space point → pixel. `None` behind the camera.
    pub fn project(&self, p: &Vector3<f64>) -> Option<Point2<f32>> {
        if p.z <= f64::EPSILON {
            return None;
        }
        let (xd, yd) = self.distort(p.x / p.z, p.y / p.z);
        Some(Point2::new(
            (self.fx * xd + self.cx) as f32,
            (self.fy * yd + self.cy) as f32,
        ))
    }
}
