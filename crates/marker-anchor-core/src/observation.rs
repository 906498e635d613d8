use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// One marker's extrinsics for a single frame, in the detector's camera frame.
///
/// Only valid for the frame that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkerObservation {
    pub id: u32,
    /// Marker center in camera space, meters.
    pub translation: Vector3<f32>,
    /// Rodrigues axis-angle rotation, camera space.
    pub rotation_vector: Vector3<f32>,
}

impl MarkerObservation {
    pub fn new(id: u32, translation: Vector3<f32>, rotation_vector: Vector3<f32>) -> Self {
        Self {
            id,
            translation,
            rotation_vector,
        }
    }
}

/// Joint pose of a configured multi-marker board.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardObservation {
    /// Board origin in camera space, meters.
    pub translation: Vector3<f32>,
    pub rotation_vector: Vector3<f32>,
    /// Number of board markers that contributed corners.
    pub markers_used: usize,
    /// `markers_used / markers on the board`, in `[0, 1]`.
    pub coverage: f32,
}

impl BoardObservation {
    #[inline]
    pub fn is_detected(&self) -> bool {
        self.coverage > 0.0
    }
}

/// Everything the detector produced for one frame.
///
/// Duplicate ids are kept as reported; consumers decide how to treat them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameDetections {
    pub markers: Vec<MarkerObservation>,
    #[serde(default)]
    pub board: Option<BoardObservation>,
}

impl FrameDetections {
    pub fn from_markers(markers: Vec<MarkerObservation>) -> Self {
        Self {
            markers,
            board: None,
        }
    }

    /// First observation with the given id.
    pub fn marker(&self, id: u32) -> Option<&MarkerObservation> {
        self.markers.iter().find(|m| m.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty() && self.board.is_none()
    }
}
