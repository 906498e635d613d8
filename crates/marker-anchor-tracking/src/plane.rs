//! Plane fitted through four coplanar markers.

use marker_anchor_core::{
    convention::{rotator_from_marker_rotation_vector, vector_from_camera_translation},
    MarkerObservation, Rotator,
};
use nalgebra::Vector3;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::StaleMarkerPolicy;

/// Seen slots needed before the plane geometry is trusted.
pub const PLANE_QUORUM: usize = 3;

/// Per-frame plane state in application units.
///
/// Geometry is always computed; only trust it when `detected` is set.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlaneEstimate {
    pub translations: [Vector3<f32>; 4],
    pub rotations: [Rotator; 4],
    /// Slots matched this frame.
    pub seen: [bool; 4],
    pub normal: Vector3<f32>,
    pub rotation: Rotator,
    pub midpoint: Vector3<f32>,
    /// Mean marker roll over the seen slots; `None` when nothing was seen.
    pub average_roll: Option<f32>,
    pub quorum: usize,
    pub detected: bool,
}

/// Normal, rotation and midpoint of the plane through slots 1..3.
///
/// Slot 1 is the pivot. The normal uses `v13 × v12` while the rotation uses
/// `v12 × v13`; both orders are load-bearing. A degenerate normal is zero.
pub fn plane_geometry(t: &[Vector3<f32>; 4]) -> (Vector3<f32>, Rotator, Vector3<f32>) {
    let v12 = t[1] - t[0];
    let v13 = t[2] - t[0];
    let normal = v13
        .cross(&v12)
        .try_normalize(1e-8)
        .unwrap_or_else(Vector3::zeros);
    let rotation = Rotator::from_direction(&v12.cross(&v13));
    let midpoint = t[1] + (t[2] - t[1]) * 0.5;
    (normal, rotation, midpoint)
}

/// Matches observations against four configured ids and fits the plane.
#[derive(Clone, Debug)]
pub struct PlaneMarkerAggregator {
    ids: [u32; 4],
    use_average_roll: bool,
    policy: StaleMarkerPolicy,
    last: PlaneEstimate,
}

impl PlaneMarkerAggregator {
    pub fn new(ids: [u32; 4], use_average_roll: bool, policy: StaleMarkerPolicy) -> Self {
        Self {
            ids,
            use_average_roll,
            policy,
            last: PlaneEstimate::default(),
        }
    }

    #[inline]
    pub fn ids(&self) -> [u32; 4] {
        self.ids
    }

    /// Estimate from the most recent [`ingest`](Self::ingest).
    #[inline]
    pub fn estimate(&self) -> &PlaneEstimate {
        &self.last
    }

    /// Fold one frame of observations into the plane estimate.
    ///
    /// Duplicate ids fill their slot once; the last observation wins.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip(self, observations), fields(n = observations.len()))
    )]
    pub fn ingest(&mut self, observations: &[MarkerObservation]) -> PlaneEstimate {
        let mut est = self.last;
        est.seen = [false; 4];
        if self.policy == StaleMarkerPolicy::Reset {
            est.translations = [Vector3::zeros(); 4];
            est.rotations = [Rotator::ZERO; 4];
        }

        for obs in observations {
            let Some(slot) = self.ids.iter().position(|&id| id == obs.id) else {
                continue;
            };
            est.translations[slot] = vector_from_camera_translation(&obs.translation);
            est.rotations[slot] = rotator_from_marker_rotation_vector(&obs.rotation_vector);
            est.seen[slot] = true;
        }

        est.quorum = est.seen.iter().filter(|&&s| s).count();
        est.average_roll = (est.quorum > 0).then(|| {
            let roll_sum: f32 = est
                .rotations
                .iter()
                .zip(est.seen)
                .filter(|(_, seen)| *seen)
                .map(|(r, _)| r.roll)
                .sum();
            roll_sum / est.quorum as f32
        });

        let (normal, mut rotation, midpoint) = plane_geometry(&est.translations);
        if self.use_average_roll {
            if let Some(roll) = est.average_roll {
                rotation.roll = roll;
            }
        }
        est.normal = normal;
        est.rotation = rotation;
        est.midpoint = midpoint;
        est.detected = est.quorum >= PLANE_QUORUM;

        log::debug!(
            "plane quorum {}/4 detected={} midpoint=({:.1}, {:.1}, {:.1}) rot=[{}]",
            est.quorum,
            est.detected,
            est.midpoint.x,
            est.midpoint.y,
            est.midpoint.z,
            est.rotation
        );

        self.last = est;
        est
    }
}
