//! Offline replay of recorded detections through a [`Tracker`].

use std::path::Path;

use marker_anchor_core::FrameDetections;
use marker_anchor_extrinsics::{read_json, write_json, ConfigIoError};
use marker_anchor_tracking::{FrameInput, FrameOutput, Tracker, TrackerConfig};
use serde::{Deserialize, Serialize};

/// One recorded host tick.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordedFrame {
    #[serde(default)]
    pub detections: FrameDetections,
    #[serde(default)]
    pub input: FrameInput,
    pub dt: f32,
    /// The user asked to start the session on this tick. Applied after the
    /// tick's update, like [`FrameDriver`](marker_anchor_tracking::FrameDriver).
    #[serde(default)]
    pub start_session: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    #[serde(default)]
    pub tracker: TrackerConfig,
    pub frames: Vec<RecordedFrame>,
}

impl Recording {
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigIoError> {
        read_json(path)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigIoError> {
        write_json(self, path)
    }

    /// Replay on a fresh tracker built from the recorded config.
    pub fn run(&self) -> Vec<FrameOutput> {
        let mut tracker = Tracker::new(self.tracker.clone());
        replay(&mut tracker, &self.frames)
    }
}

/// Feed `frames` through `tracker`, one output per frame.
pub fn replay(tracker: &mut Tracker, frames: &[RecordedFrame]) -> Vec<FrameOutput> {
    frames
        .iter()
        .enumerate()
        .map(|(i, frame)| {
            let out = tracker.update(&frame.detections, &frame.input, frame.dt);
            if frame.start_session {
                match tracker.start_session(&frame.input) {
                    Ok(_) => log::info!("session started at frame {i}"),
                    Err(err) => log::warn!("frame {i}: start session refused: {err}"),
                }
            }
            out
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use marker_anchor_core::MarkerObservation;
    use nalgebra::Vector3;

    fn wall(depth: f32) -> FrameDetections {
        let ids = [666, 683, 775, 819];
        let centers = [(-0.15, -0.1), (0.15, -0.1), (0.15, 0.1), (-0.15, 0.1)];
        FrameDetections::from_markers(
            ids.iter()
                .zip(centers)
                .map(|(&id, (x, y))| {
                    MarkerObservation::new(id, Vector3::new(x, y, depth), Vector3::zeros())
                })
                .collect(),
        )
    }

    #[test]
    fn recording_round_trips_and_replays() {
        let mut frames = vec![RecordedFrame {
            detections: wall(0.6),
            dt: 0.1,
            ..RecordedFrame::default()
        }];
        frames.push(RecordedFrame {
            start_session: true,
            ..frames[0].clone()
        });
        frames.push(frames[0].clone());
        frames.push(RecordedFrame {
            detections: FrameDetections::default(),
            ..frames[0].clone()
        });
        let recording = Recording {
            tracker: TrackerConfig::default(),
            frames,
        };

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        recording.write_json(&path).expect("write");
        let loaded = Recording::load_json(&path).expect("load");
        assert_eq!(loaded, recording);

        let out = loaded.run();
        assert_eq!(out.len(), 4);
        assert_eq!(out[0], FrameOutput::Hold);
        // anchored at the end of frame 1, tracked from frame 2 on
        assert_eq!(out[1], FrameOutput::Hold);
        assert!(matches!(out[2], FrameOutput::Character(_)));
        assert_eq!(out[3], FrameOutput::Hold);
    }

    #[test]
    fn minimal_frames_parse() {
        let rec: Recording = serde_json::from_str(r#"{ "frames": [ { "dt": 0.016 } ] }"#)
            .expect("parse");
        assert_eq!(rec.frames.len(), 1);
        assert!(rec.frames[0].detections.is_empty());
        assert_eq!(rec.run(), vec![FrameOutput::Hold]);
    }
}
