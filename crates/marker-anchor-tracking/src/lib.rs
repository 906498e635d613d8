//! Marker-anchored tracking.
//!
//! Consumes per-frame [`FrameDetections`](marker_anchor_core::FrameDetections)
//! and produces poses for a character, a followed prop or a UI window.
//!
//! - [`PlaneMarkerAggregator`] fits a plane through four coplanar markers and
//!   gates it on a quorum of three.
//! - [`TargetSelector`] picks plane, single marker or board per [`TrackingMode`].
//! - [`RelativeMotionEngine`] captures a one-shot [`SessionAnchor`] and maps
//!   later marker motion onto the character through two moving averages.
//! - [`Tracker`] owns all of the above; [`FrameDriver`] runs the adapter and
//!   an [`InputHandler`] in front of it.
//!
//! ```
//! use marker_anchor_core::FrameDetections;
//! use marker_anchor_tracking::{FrameInput, FrameOutput, Tracker, TrackerConfig};
//!
//! let mut tracker = Tracker::new(TrackerConfig::default());
//! let out = tracker.update(&FrameDetections::default(), &FrameInput::default(), 1.0 / 60.0);
//! assert_eq!(out, FrameOutput::Hold);
//! assert!(tracker.start_session(&FrameInput::default()).is_err());
//! ```

mod config;
mod driver;
mod error;
mod host;
mod plane;
mod prop;
mod session;
mod smoothing;
mod target;
mod tracker;
mod window;

pub use config::{
    PropOptions, StaleMarkerPolicy, TrackerConfig, TrackingMode, TrackingTarget,
    DEFAULT_EYE_HEIGHT, DEFAULT_PLANE_IDS,
};
pub use driver::FrameDriver;
pub use error::AnchorError;
pub use host::{FrameInput, InputAction, InputHandler, NoInput};
pub use plane::{plane_geometry, PlaneEstimate, PlaneMarkerAggregator, PLANE_QUORUM};
pub use prop::{follow_prop, prop_rotation_from_normal, PropCommand};
pub use session::{RelativeMotionEngine, SessionAnchor};
pub use smoothing::{PrefilledAverage, RampAverage, SMOOTHING_WINDOW};
pub use target::{TargetEstimate, TargetSelector};
pub use tracker::{FrameOutput, Tracker};
pub use window::{window_pose, ZOOM_IN, ZOOM_OUT};
