//! Tracker configuration.

use std::path::Path;

use marker_anchor_extrinsics::{read_json, write_json, ConfigIoError};
use serde::{Deserialize, Serialize};

/// Plane marker ids used by the shipped marker sheet.
pub const DEFAULT_PLANE_IDS: [u32; 4] = [666, 683, 775, 819];
/// Vertical offset between the camera and the character origin, application units.
pub const DEFAULT_EYE_HEIGHT: f32 = 64.0;

/// Which detection drives the tracked pose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrackingMode {
    /// Plane fitted through four coplanar markers (quorum of three).
    PlaneMarkers { ids: [u32; 4] },
    /// One marker, marker rotation convention.
    SingleMarker { id: u32 },
    /// Multi-marker board, board rotation convention.
    Board,
}

impl Default for TrackingMode {
    fn default() -> Self {
        Self::PlaneMarkers {
            ids: DEFAULT_PLANE_IDS,
        }
    }
}

/// What happens to a plane-marker slot that was not seen this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaleMarkerPolicy {
    /// Keep the last translation and rotation.
    #[default]
    HoldLast,
    /// Zero the slot.
    Reset,
}

/// Entity moved by the tracker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingTarget {
    /// Session-anchored character motion.
    #[default]
    Character,
    /// A prop that sits on the marker.
    FollowProp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropOptions {
    pub spawn_at_marker: bool,
    pub faces_character: bool,
    pub follows_location: bool,
    pub follows_rotation: bool,
}

impl Default for PropOptions {
    fn default() -> Self {
        Self {
            spawn_at_marker: true,
            faces_character: true,
            follows_location: true,
            follows_rotation: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub mode: TrackingMode,
    /// Replace the plane roll with the mean roll of the seen markers.
    pub use_average_roll: bool,
    pub stale_markers: StaleMarkerPolicy,
    pub target: TrackingTarget,
    pub prop: PropOptions,
    pub eye_height: f32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            mode: TrackingMode::default(),
            use_average_roll: false,
            stale_markers: StaleMarkerPolicy::default(),
            target: TrackingTarget::default(),
            prop: PropOptions::default(),
            eye_height: DEFAULT_EYE_HEIGHT,
        }
    }
}

impl TrackerConfig {
    /// Plane ids when running in plane-marker mode.
    pub fn plane_ids(&self) -> Option<[u32; 4]> {
        match self.mode {
            TrackingMode::PlaneMarkers { ids } => Some(ids),
            _ => None,
        }
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigIoError> {
        read_json(path)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigIoError> {
        write_json(self, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_marker_sheet() {
        let cfg = TrackerConfig::default();
        assert_eq!(cfg.plane_ids(), Some([666, 683, 775, 819]));
        assert_eq!(cfg.eye_height, 64.0);
        assert_eq!(cfg.target, TrackingTarget::Character);
        assert_eq!(cfg.stale_markers, StaleMarkerPolicy::HoldLast);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: TrackerConfig = serde_json::from_str(
            r#"{ "mode": { "kind": "single_marker", "id": 12 }, "prop": { "faces_character": false } }"#,
        )
        .expect("parse");
        assert_eq!(cfg.mode, TrackingMode::SingleMarker { id: 12 });
        assert!(cfg.plane_ids().is_none());
        assert!(!cfg.prop.faces_character);
        assert!(cfg.prop.spawn_at_marker);
        assert_eq!(cfg.eye_height, DEFAULT_EYE_HEIGHT);
    }

    #[test]
    fn round_trips_through_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("tracker.json");
        let cfg = TrackerConfig {
            mode: TrackingMode::Board,
            use_average_roll: true,
            stale_markers: StaleMarkerPolicy::Reset,
            target: TrackingTarget::FollowProp,
            ..TrackerConfig::default()
        };
        cfg.write_json(&path).expect("write");
        assert_eq!(TrackerConfig::load_json(&path).expect("load"), cfg);
    }
}
