//! Mode-dependent choice of the tracked reference.

use marker_anchor_core::{
    convention::{
        rotator_from_board_rotation_vector, rotator_from_marker_rotation_vector,
        vector_from_camera_translation,
    },
    FrameDetections, Rotator,
};
use nalgebra::Vector3;

use crate::{PlaneEstimate, PlaneMarkerAggregator, TrackerConfig, TrackingMode};

/// Translation, rotation and normal of the reference, application units.
///
/// `normal` is only meaningful in plane-marker mode and zero otherwise.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TargetEstimate {
    pub detected: bool,
    pub translation: Vector3<f32>,
    pub rotation: Rotator,
    pub normal: Vector3<f32>,
}

impl From<&PlaneEstimate> for TargetEstimate {
    fn from(plane: &PlaneEstimate) -> Self {
        Self {
            detected: plane.detected,
            translation: plane.midpoint,
            rotation: plane.rotation,
            normal: plane.normal,
        }
    }
}

/// Turns a frame of detections into a [`TargetEstimate`] for the configured mode.
///
/// Single-marker and board modes keep the last pose while the reference is
/// missing; only `detected` drops.
#[derive(Clone, Debug)]
pub struct TargetSelector {
    mode: TrackingMode,
    plane: Option<PlaneMarkerAggregator>,
    last: TargetEstimate,
}

impl TargetSelector {
    pub fn new(config: &TrackerConfig) -> Self {
        let plane = config
            .plane_ids()
            .map(|ids| PlaneMarkerAggregator::new(ids, config.use_average_roll, config.stale_markers));
        Self {
            mode: config.mode,
            plane,
            last: TargetEstimate::default(),
        }
    }

    #[inline]
    pub fn mode(&self) -> TrackingMode {
        self.mode
    }

    /// Plane estimate, only in plane-marker mode.
    pub fn plane(&self) -> Option<&PlaneEstimate> {
        self.plane.as_ref().map(|p| p.estimate())
    }

    #[inline]
    pub fn estimate(&self) -> &TargetEstimate {
        &self.last
    }

    pub fn update(&mut self, detections: &FrameDetections) -> TargetEstimate {
        let next = match self.mode {
            TrackingMode::PlaneMarkers { .. } => match self.plane.as_mut() {
                Some(plane) => TargetEstimate::from(&plane.ingest(&detections.markers)),
                None => self.held(),
            },
            TrackingMode::SingleMarker { id } => match detections.marker(id) {
                Some(m) => TargetEstimate {
                    detected: true,
                    translation: vector_from_camera_translation(&m.translation),
                    rotation: rotator_from_marker_rotation_vector(&m.rotation_vector),
                    normal: Vector3::zeros(),
                },
                None => self.held(),
            },
            TrackingMode::Board => match detections.board.filter(|b| b.is_detected()) {
                Some(b) => TargetEstimate {
                    detected: true,
                    translation: vector_from_camera_translation(&b.translation),
                    rotation: rotator_from_board_rotation_vector(&b.rotation_vector),
                    normal: Vector3::zeros(),
                },
                None => self.held(),
            },
        };
        self.last = next;
        next
    }

    fn held(&self) -> TargetEstimate {
        TargetEstimate {
            detected: false,
            ..self.last
        }
    }
}
