//! Detector-to-pose pipeline for one host tick.

use marker_anchor_core::FrameDetections;
use marker_anchor_extrinsics::{
    ExtrinsicsSolver, MarkerDetector, MarkerExtrinsicsAdapter, PlanarPoseSolver,
};

use crate::{AnchorError, FrameInput, FrameOutput, InputAction, InputHandler, NoInput, Tracker};

/// Adapter, input hook and tracker wired together.
#[derive(Debug)]
pub struct FrameDriver<D, S = PlanarPoseSolver, H = NoInput> {
    adapter: MarkerExtrinsicsAdapter<D, S>,
    tracker: Tracker,
    input: H,
    session_refusal: Option<AnchorError>,
}

impl<D: MarkerDetector, S: ExtrinsicsSolver> FrameDriver<D, S> {
    pub fn new(adapter: MarkerExtrinsicsAdapter<D, S>, tracker: Tracker) -> Self {
        Self {
            adapter,
            tracker,
            input: NoInput,
            session_refusal: None,
        }
    }
}

impl<D: MarkerDetector, S: ExtrinsicsSolver, H: InputHandler> FrameDriver<D, S, H> {
    pub fn with_input<H2: InputHandler>(self, input: H2) -> FrameDriver<D, S, H2> {
        FrameDriver {
            adapter: self.adapter,
            tracker: self.tracker,
            input,
            session_refusal: self.session_refusal,
        }
    }

    #[inline]
    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    #[inline]
    pub fn tracker_mut(&mut self) -> &mut Tracker {
        &mut self.tracker
    }

    #[inline]
    pub fn adapter_mut(&mut self) -> &mut MarkerExtrinsicsAdapter<D, S> {
        &mut self.adapter
    }

    /// Why the last tick's [`InputAction::StartSession`] was refused, if it was.
    #[inline]
    pub fn session_refusal(&self) -> Option<AnchorError> {
        self.session_refusal
    }

    /// Run one frame: detection, input hook, tracking.
    ///
    /// While a window is held detection is skipped and only the window
    /// bindings act; `StartSession` is ignored. A `StartSession` is applied
    /// after the tracker has seen this frame's detections, so the first
    /// character pose follows on the next tick.
    pub fn tick(&mut self, frame: &D::Frame, input: &FrameInput, dt: f32) -> FrameOutput {
        self.session_refusal = None;
        let holding_window = self.tracker.is_window_move_mode();
        let detections = if holding_window {
            FrameDetections::default()
        } else {
            self.adapter.detect(frame)
        };

        let start = match self.input.poll(input) {
            Some(InputAction::StartSession) => !holding_window,
            Some(InputAction::ToggleWindowMove) => {
                self.tracker
                    .toggle_window_move_mode(input.selected_window.is_some());
                false
            }
            Some(InputAction::ZoomWindow(factor)) => {
                self.tracker.zoom_window(factor);
                false
            }
            None => false,
        };

        let out = self.tracker.update(&detections, input, dt);
        if start {
            if let Err(err) = self.tracker.start_session(input) {
                log::warn!("start session refused: {err}");
                self.session_refusal = Some(err);
            }
        }
        out
    }
}
