//! What the host scene reports each frame, and the user-input hook.

use marker_anchor_core::{CameraPose, Rotator, Transform};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Host state sampled at the start of a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    pub camera: CameraPose,
    pub character_location: Vector3<f32>,
    pub character_rotation: Rotator,
    /// Transform of the prop being followed, once the host has spawned it.
    #[serde(default)]
    pub followed_prop: Option<Transform>,
    /// World location of the window picked for window-move mode.
    #[serde(default)]
    pub selected_window: Option<Vector3<f32>>,
}

/// Request raised by hand tracking, ray casts or key bindings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputAction {
    StartSession,
    ToggleWindowMove,
    /// Scale the selected window's distance from the camera.
    ZoomWindow(f32),
}

/// Per-frame input hook run between detection and tracking.
pub trait InputHandler {
    fn poll(&mut self, input: &FrameInput) -> Option<InputAction>;
}

/// No user input.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoInput;

impl InputHandler for NoInput {
    fn poll(&mut self, _input: &FrameInput) -> Option<InputAction> {
        None
    }
}

impl<F> InputHandler for F
where
    F: FnMut(&FrameInput) -> Option<InputAction>,
{
    fn poll(&mut self, input: &FrameInput) -> Option<InputAction> {
        self(input)
    }
}
