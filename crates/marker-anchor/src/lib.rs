//! High-level facade crate for the `marker-anchor-*` workspace.
//!
//! This crate provides:
//! - re-exports of the core, extrinsics and tracking crates
//! - [`replay`]: drive a [`Tracker`] from recorded detections, for offline
//!   tuning and regression checks without a camera.
//!
//! ## Quickstart
//!
//! ```no_run
//! use marker_anchor::extrinsics::{AdapterConfig, MarkerExtrinsicsAdapter, RecordedDetector};
//! use marker_anchor::tracking::{FrameDriver, FrameInput, Tracker, TrackerConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let adapter_cfg = AdapterConfig::load_json("adapter.json")?;
//! let adapter = MarkerExtrinsicsAdapter::from_config(RecordedDetector::default(), &adapter_cfg)?;
//! let tracker = Tracker::new(TrackerConfig::load_json("tracker.json")?);
//! let mut driver = FrameDriver::new(adapter, tracker);
//!
//! let out = driver.tick(&(), &FrameInput::default(), 1.0 / 60.0);
//! println!("{out:?}");
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `marker_anchor::core`: rotators, transforms, camera pose, observations, convention mapper.
//! - `marker_anchor::extrinsics`: intrinsics and board files, pose solver, extrinsics adapter.
//! - `marker_anchor::tracking`: plane aggregator, filters, session anchor, tracker.

pub use marker_anchor_core as core;
pub use marker_anchor_extrinsics as extrinsics;
pub use marker_anchor_tracking as tracking;

pub use marker_anchor_core::{
    CameraPose, FrameDetections, MarkerObservation, Rotator, TrackedPose, Transform,
};
pub use marker_anchor_extrinsics::{CameraIntrinsics, MarkerExtrinsicsAdapter};
pub use marker_anchor_tracking::{FrameDriver, FrameInput, FrameOutput, Tracker, TrackerConfig};

pub mod replay;
