//! Session anchor and relative-motion engine.
//!
//! Once anchored, the character is placed where the physical camera sits
//! relative to the marker, re-expressed in the followed prop's frame.

use marker_anchor_core::{CameraPose, Rotator, TrackedPose, Transform};
use nalgebra::Vector3;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    prop::prop_rotation_from_normal, AnchorError, FrameInput, PrefilledAverage, RampAverage,
    TargetEstimate,
};

/// Baseline captured when the session starts. Never modified afterwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionAnchor {
    pub character_location: Vector3<f32>,
    pub character_rotation: Rotator,
    pub camera: CameraPose,
    pub camera_forward: Vector3<f32>,
    pub marker_translation: Vector3<f32>,
    pub marker_rotation: Rotator,
    pub marker_normal: Vector3<f32>,
    /// Marker in the world, oriented along its world-space normal.
    pub marker_world_transform: Transform,
    /// Where a prop spawned at the marker would sit.
    pub prop_transform: Transform,
}

impl SessionAnchor {
    pub fn capture(target: &TargetEstimate, input: &FrameInput) -> Self {
        let camera = input.camera;
        let world_location = camera.marker_world_location(&target.translation);
        let world_normal = camera.marker_world_direction(&target.normal);

        Self {
            character_location: input.character_location,
            character_rotation: input.character_rotation,
            camera,
            camera_forward: camera.forward_vector(),
            marker_translation: target.translation,
            marker_rotation: target.rotation,
            marker_normal: target.normal,
            marker_world_transform: Transform::new(
                Rotator::from_direction(&world_normal),
                world_location,
            ),
            prop_transform: Transform::new(prop_rotation_from_normal(&world_normal), world_location),
        }
    }

    #[inline]
    pub fn camera_location(&self) -> Vector3<f32> {
        self.camera.location
    }
}

/// Maps marker motion since the anchor onto character motion.
///
/// Idle until [`anchor`](Self::anchor) succeeds, anchored for the rest of
/// its lifetime.
#[derive(Clone, Debug)]
pub struct RelativeMotionEngine {
    eye_height: f32,
    anchor: Option<SessionAnchor>,
    translation_filter: RampAverage,
    location_filter: PrefilledAverage,
}

impl RelativeMotionEngine {
    pub fn new(eye_height: f32) -> Self {
        Self {
            eye_height,
            anchor: None,
            translation_filter: RampAverage::new(),
            location_filter: PrefilledAverage::new(),
        }
    }

    #[inline]
    pub fn anchor_state(&self) -> Option<&SessionAnchor> {
        self.anchor.as_ref()
    }

    #[inline]
    pub fn is_anchored(&self) -> bool {
        self.anchor.is_some()
    }

    /// Capture the session anchor. One-shot: a second call is refused.
    pub fn anchor(
        &mut self,
        target: &TargetEstimate,
        input: &FrameInput,
    ) -> Result<&SessionAnchor, AnchorError> {
        if self.is_anchored() {
            return Err(AnchorError::AlreadyAnchored);
        }
        if !target.detected {
            return Err(AnchorError::PlaneNotDetected);
        }

        let anchor = SessionAnchor::capture(target, input);
        log::info!(
            "session anchored: marker at ({:.1}, {:.1}, {:.1}) rot [{}], character at ({:.1}, {:.1}, {:.1})",
            anchor.marker_world_transform.translation.x,
            anchor.marker_world_transform.translation.y,
            anchor.marker_world_transform.translation.z,
            anchor.marker_rotation,
            anchor.character_location.x,
            anchor.character_location.y,
            anchor.character_location.z
        );
        Ok(&*self.anchor.insert(anchor))
    }

    /// Character pose for this frame, or `None` to hold.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip_all))]
    pub fn update(&mut self, target: &TargetEstimate, input: &FrameInput) -> Option<TrackedPose> {
        let Some(anchor) = &self.anchor else {
            return None;
        };
        if !target.detected {
            return None;
        }

        // plane pitch runs opposite to character pitch
        let mut delta = target.rotation - anchor.marker_rotation;
        delta.pitch = -delta.pitch;

        let adjusted = delta.rotate_vector(&target.translation);
        let smoothed = self.translation_filter.push(adjusted);

        let marker_world = anchor.marker_world_transform.translation;
        let implied_camera =
            marker_world - (anchor.camera.marker_world_location(&smoothed) - anchor.camera.location);
        let m = anchor
            .marker_world_transform
            .inverse_transform_position_no_scale(&implied_camera);

        let prop = input.followed_prop.unwrap_or(anchor.prop_transform);
        let mut world = prop.translation + prop.right_vector() * m.x - prop.forward_vector() * m.y
            + prop.up_vector() * m.z;
        world.z -= self.eye_height;

        let location = self.location_filter.push(world);
        let rotation = anchor.character_rotation + delta;
        log::trace!(
            "delta [{}] marker-space camera ({:.1}, {:.1}, {:.1})",
            delta,
            m.x,
            m.y,
            m.z
        );
        Some(TrackedPose::new(location, rotation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    /// Marker 1 m straight ahead of a camera at the origin, facing it.
    fn facing_target(distance: f32) -> TargetEstimate {
        TargetEstimate {
            detected: true,
            translation: Vector3::new(distance, 0.0, 0.0),
            rotation: Rotator::ZERO,
            normal: Vector3::new(-1.0, 0.0, 0.0),
        }
    }

    fn input() -> FrameInput {
        FrameInput {
            character_rotation: Rotator::new(0.0, 30.0, 0.0),
            ..FrameInput::default()
        }
    }

    #[test]
    fn anchoring_is_refused_without_detection() {
        let mut engine = RelativeMotionEngine::new(64.0);
        let target = TargetEstimate {
            detected: false,
            ..facing_target(100.0)
        };
        assert_eq!(
            engine.anchor(&target, &input()).err(),
            Some(AnchorError::PlaneNotDetected)
        );
        assert!(engine.anchor_state().is_none());
        assert!(engine.update(&facing_target(100.0), &input()).is_none());
    }

    #[test]
    fn anchoring_is_one_shot() {
        let mut engine = RelativeMotionEngine::new(64.0);
        let first = *engine.anchor(&facing_target(100.0), &input()).expect("anchor");
        assert_eq!(
            engine.anchor(&facing_target(50.0), &input()).err(),
            Some(AnchorError::AlreadyAnchored)
        );
        assert_eq!(engine.anchor_state(), Some(&first));
    }

    #[test]
    fn anchor_places_marker_and_prop_in_world() {
        let mut engine = RelativeMotionEngine::new(64.0);
        let anchor = *engine.anchor(&facing_target(100.0), &input()).expect("anchor");
        assert_abs_diff_eq!(
            anchor.marker_world_transform.translation,
            Vector3::new(100.0, 0.0, 0.0),
            epsilon = 1e-4
        );
        // marker forward points back at the camera
        assert_abs_diff_eq!(
            anchor.marker_world_transform.forward_vector(),
            Vector3::new(-1.0, 0.0, 0.0),
            epsilon = 1e-5
        );
        assert_abs_diff_eq!(anchor.camera_forward, Vector3::x(), epsilon = 1e-6);
    }

    #[test]
    fn still_scene_holds_a_fixed_pose() {
        let mut engine = RelativeMotionEngine::new(64.0);
        engine.anchor(&facing_target(100.0), &input()).expect("anchor");

        for _ in 0..15 {
            let pose = engine.update(&facing_target(100.0), &input()).expect("pose");
            assert_abs_diff_eq!(pose.location, Vector3::new(200.0, 0.0, -64.0), epsilon = 1e-3);
            assert_abs_diff_eq!(pose.rotation.yaw, 30.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn approaching_the_marker_moves_the_character() {
        let mut engine = RelativeMotionEngine::new(64.0);
        engine.anchor(&facing_target(100.0), &input()).expect("anchor");

        let pose = engine.update(&facing_target(50.0), &input()).expect("pose");
        assert_abs_diff_eq!(pose.location, Vector3::new(150.0, 0.0, -64.0), epsilon = 1e-3);
    }

    #[test]
    fn followed_prop_replaces_anchor_prop() {
        let mut engine = RelativeMotionEngine::new(0.0);
        engine.anchor(&facing_target(100.0), &input()).expect("anchor");

        let moved = FrameInput {
            followed_prop: Some(Transform::new(
                Rotator::new(0.0, -90.0, 0.0),
                Vector3::new(100.0, 500.0, 0.0),
            )),
            ..input()
        };
        let pose = engine.update(&facing_target(100.0), &moved).expect("pose");
        assert_abs_diff_eq!(pose.location, Vector3::new(200.0, 500.0, 0.0), epsilon = 1e-3);
    }

    #[test]
    fn undetected_frames_hold() {
        let mut engine = RelativeMotionEngine::new(64.0);
        engine.anchor(&facing_target(100.0), &input()).expect("anchor");
        let lost = TargetEstimate {
            detected: false,
            ..facing_target(10.0)
        };
        assert!(engine.update(&lost, &input()).is_none());
    }

    #[test]
    fn rotation_delta_inverts_pitch() {
        let mut engine = RelativeMotionEngine::new(64.0);
        engine.anchor(&facing_target(100.0), &input()).expect("anchor");
        let tilted = TargetEstimate {
            rotation: Rotator::new(10.0, 5.0, 0.0),
            ..facing_target(100.0)
        };
        let pose = engine.update(&tilted, &input()).expect("pose");
        assert_abs_diff_eq!(pose.rotation.pitch, -10.0, epsilon = 1e-4);
        assert_abs_diff_eq!(pose.rotation.yaw, 35.0, epsilon = 1e-4);
    }
}
