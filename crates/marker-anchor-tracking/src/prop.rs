//! Prop that sits on the tracked marker.

use marker_anchor_core::{CameraPose, Rotator};
use nalgebra::Vector3;

use crate::{PropOptions, TargetEstimate};

/// What the host should do with the followed prop this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PropCommand {
    Spawn {
        location: Vector3<f32>,
        rotation: Rotator,
    },
    /// `None` fields are left as they are.
    Move {
        location: Option<Vector3<f32>>,
        rotation: Option<Rotator>,
    },
}

/// Rotation that lays a prop flat against a surface with world normal direction `normal`.
pub fn prop_rotation_from_normal(normal: &Vector3<f32>) -> Rotator {
    let n = Rotator::from_direction(normal);
    Rotator::new(0.0, 90.0, 0.0) + Rotator::new(0.0, -n.yaw, -n.pitch)
}

/// Prop pose for a detected target seen from `camera`.
pub fn follow_prop(
    target: &TargetEstimate,
    camera: &CameraPose,
    options: &PropOptions,
    prop_exists: bool,
) -> PropCommand {
    let location = camera.marker_world_location(&target.translation);

    let mut rotation = Rotator::ZERO;
    if options.faces_character {
        rotation += camera.facing_rotation();
    }
    if options.follows_rotation {
        rotation = prop_rotation_from_normal(&camera.marker_world_direction(&target.normal));
    }

    if !prop_exists && options.spawn_at_marker {
        return PropCommand::Spawn { location, rotation };
    }
    PropCommand::Move {
        location: options.follows_location.then_some(location),
        rotation: options.follows_rotation.then_some(rotation),
    }
}
