//! Core types and conventions for marker-anchored tracking.
//!
//! This crate is intentionally small and purely geometric. It does *not*
//! depend on any concrete marker detector, camera source or scene host.
//!
//! - [`Rotator`] and [`Transform`] carry poses in the application convention
//!   (X forward, Y right, Z up, angles in degrees).
//! - [`convention`] maps detector camera-space vectors into that convention.
//! - [`MarkerObservation`] / [`FrameDetections`] are the per-frame detector output.

pub mod convention;
mod logger;
mod observation;
mod pose;
mod rotator;
mod transform;

pub use observation::{BoardObservation, FrameDetections, MarkerObservation};
pub use pose::{CameraPose, TrackedPose};
pub use rotator::Rotator;
pub use transform::Transform;

#[cfg(feature = "tracing")]
pub use logger::{init_tracing, TraceFormat};

pub use logger::{init_with_level, LOG_ENV};
