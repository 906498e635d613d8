//! Per-frame marker extrinsics.
//!
//! A [`MarkerDetector`] supplies ids and pixel corners; the
//! [`MarkerExtrinsicsAdapter`] looks up each marker's physical size, undistorts
//! the corners with the loaded [`CameraIntrinsics`] and asks an
//! [`ExtrinsicsSolver`] for a camera-space pose. With a [`BoardConfig`]
//! attached the board markers are also solved jointly.
//!
//! ```no_run
//! use marker_anchor_extrinsics::{AdapterConfig, MarkerExtrinsicsAdapter, RecordedDetector};
//!
//! let cfg = AdapterConfig::load_json("adapter.json")?;
//! let mut adapter = MarkerExtrinsicsAdapter::from_config(RecordedDetector::default(), &cfg)?;
//! let detections = adapter.detect(&());
//! println!("{} markers", detections.markers.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod adapter;
mod board;
mod config;
mod detector;
pub mod homography;
mod intrinsics;
mod sizes;
mod solver;

pub use adapter::{AdapterInitError, MarkerExtrinsicsAdapter};
pub use board::{BoardConfig, BoardConfigError, BoardMarker};
pub use config::{read_json, write_json, AdapterConfig, ConfigIoError};
pub use detector::{MarkerDetector, RawMarker, RecordedDetector};
pub use intrinsics::{CameraIntrinsics, IntrinsicsError};
pub use sizes::{MarkerSizeTable, DEFAULT_MARKER_SIZE, LARGE_MARKER_IDS, LARGE_MARKER_SIZE};
pub use solver::{marker_object_corners, ExtrinsicsSolver, PlanarPose, PlanarPoseSolver};
