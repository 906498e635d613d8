use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// A decoded square marker in pixel coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawMarker {
    pub id: u32,
    /// TL, TR, BR, BL.
    pub corners: [Point2<f32>; 4],
}

impl RawMarker {
    pub fn new(id: u32, corners: [Point2<f32>; 4]) -> Self {
        Self { id, corners }
    }
}

/// 2D fiducial detector for one video frame.
///
/// Image decoding and marker dictionaries live behind this trait; the
/// adapter only needs ids and ordered corners.
pub trait MarkerDetector {
    type Frame: ?Sized;

    fn detect(&mut self, frame: &Self::Frame) -> Vec<RawMarker>;
}

/// Replays pre-recorded detections, ignoring the frame contents.
#[derive(Clone, Debug, Default)]
pub struct RecordedDetector {
    frames: std::collections::VecDeque<Vec<RawMarker>>,
}

impl RecordedDetector {
    pub fn new(frames: impl IntoIterator<Item = Vec<RawMarker>>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl MarkerDetector for RecordedDetector {
    type Frame = ();

    fn detect(&mut self, _frame: &()) -> Vec<RawMarker> {
        self.frames.pop_front().unwrap_or_default()
    }
}
