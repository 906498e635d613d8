//! Per-frame tracking state machine.

use marker_anchor_core::{FrameDetections, TrackedPose};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    follow_prop, window_pose, AnchorError, FrameInput, PlaneEstimate, PropCommand,
    RelativeMotionEngine, SessionAnchor, TargetEstimate, TargetSelector, TrackerConfig,
    TrackingTarget,
};

/// Result of one [`Tracker::update`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameOutput {
    /// Window-move mode: pose for the selected window.
    Window(TrackedPose),
    /// New pose for the tracked character.
    Character(TrackedPose),
    Prop(PropCommand),
    /// Nothing to apply this frame.
    Hold,
}

/// Owns all cross-frame tracking state.
#[derive(Clone, Debug)]
pub struct Tracker {
    config: TrackerConfig,
    selector: TargetSelector,
    engine: RelativeMotionEngine,
    window_move: bool,
    window_distance: Option<f32>,
    session_time: f32,
}

impl Tracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            selector: TargetSelector::new(&config),
            engine: RelativeMotionEngine::new(config.eye_height),
            config,
            window_move: false,
            window_distance: None,
            session_time: 0.0,
        }
    }

    #[inline]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Advance one frame.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip(self, detections, input), fields(markers = detections.markers.len()))
    )]
    pub fn update(&mut self, detections: &FrameDetections, input: &FrameInput, dt: f32) -> FrameOutput {
        if self.window_move {
            return self.window_frame(input);
        }

        let estimate = self.selector.update(detections);
        match self.config.target {
            TrackingTarget::FollowProp => {
                if !estimate.detected {
                    return FrameOutput::Hold;
                }
                FrameOutput::Prop(follow_prop(
                    &estimate,
                    &input.camera,
                    &self.config.prop,
                    input.followed_prop.is_some(),
                ))
            }
            TrackingTarget::Character => {
                if self.engine.is_anchored() {
                    self.session_time += dt;
                }
                match self.engine.update(&estimate, input) {
                    Some(pose) => FrameOutput::Character(pose),
                    None => FrameOutput::Hold,
                }
            }
        }
    }

    fn window_frame(&mut self, input: &FrameInput) -> FrameOutput {
        let Some(window) = input.selected_window else {
            return FrameOutput::Hold;
        };
        let distance = *self
            .window_distance
            .get_or_insert_with(|| (window - input.camera.location).norm());
        FrameOutput::Window(window_pose(&input.camera, distance))
    }

    /// Anchor the session on the estimate from the last [`update`](Self::update).
    ///
    /// Call it after `update` for the frame whose `input` is passed, so the
    /// plane and the host pose belong to the same frame.
    pub fn start_session(&mut self, input: &FrameInput) -> Result<&SessionAnchor, AnchorError> {
        let estimate = *self.selector.estimate();
        self.engine.anchor(&estimate, input)
    }

    /// Enter or leave window-move mode. Entering needs a selected window.
    ///
    /// Returns whether the mode is active afterwards.
    pub fn toggle_window_move_mode(&mut self, has_selected_window: bool) -> bool {
        if self.window_move {
            self.window_move = false;
        } else if has_selected_window {
            self.window_move = true;
            self.window_distance = None;
        }
        log::debug!("window move mode: {}", self.window_move);
        self.window_move
    }

    /// Scale the held window distance; see [`ZOOM_IN`](crate::ZOOM_IN) and [`ZOOM_OUT`](crate::ZOOM_OUT).
    pub fn zoom_window(&mut self, factor: f32) {
        if let Some(d) = self.window_distance.as_mut() {
            *d *= factor;
        }
    }

    #[inline]
    pub fn is_window_move_mode(&self) -> bool {
        self.window_move
    }

    #[inline]
    pub fn window_distance(&self) -> Option<f32> {
        self.window_distance
    }

    /// Whether the tracking reference was detected in the last frame.
    #[inline]
    pub fn is_detected(&self) -> bool {
        self.selector.estimate().detected
    }

    #[inline]
    pub fn is_anchored(&self) -> bool {
        self.engine.is_anchored()
    }

    #[inline]
    pub fn anchor(&self) -> Option<&SessionAnchor> {
        self.engine.anchor_state()
    }

    /// Plane estimate, in plane-marker mode.
    #[inline]
    pub fn plane(&self) -> Option<&PlaneEstimate> {
        self.selector.plane()
    }

    #[inline]
    pub fn estimate(&self) -> &TargetEstimate {
        self.selector.estimate()
    }

    /// Seconds accumulated while anchored.
    #[inline]
    pub fn session_time(&self) -> f32 {
        self.session_time
    }
}
