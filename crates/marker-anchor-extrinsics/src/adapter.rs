//! Detector → per-marker extrinsics for one frame.

use std::collections::BTreeSet;

use marker_anchor_core::{BoardObservation, FrameDetections, MarkerObservation};
use nalgebra::Point2;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    AdapterConfig, BoardConfig, BoardConfigError, CameraIntrinsics, ExtrinsicsSolver,
    IntrinsicsError, MarkerDetector, MarkerSizeTable, PlanarPoseSolver, RawMarker,
};

#[derive(thiserror::Error, Debug)]
pub enum AdapterInitError {
    #[error("camera intrinsics: {0}")]
    Intrinsics(#[from] IntrinsicsError),
    #[error("board layout: {0}")]
    Board(#[from] BoardConfigError),
}

/// Runs a [`MarkerDetector`] and turns its corners into camera-space poses.
#[derive(Debug)]
pub struct MarkerExtrinsicsAdapter<D, S = PlanarPoseSolver> {
    detector: D,
    solver: S,
    intrinsics: CameraIntrinsics,
    sizes: MarkerSizeTable,
    board: Option<BoardConfig>,
}

impl<D: MarkerDetector> MarkerExtrinsicsAdapter<D> {
    /// Adapter with the default [`PlanarPoseSolver`].
    pub fn new(detector: D, intrinsics: CameraIntrinsics, sizes: MarkerSizeTable) -> Self {
        Self {
            detector,
            solver: PlanarPoseSolver,
            intrinsics,
            sizes,
            board: None,
        }
    }

    /// Load intrinsics (rescaled to the target resolution) and the optional board.
    pub fn from_config(detector: D, config: &AdapterConfig) -> Result<Self, AdapterInitError> {
        let [width, height] = config.target_resolution;
        let intrinsics = CameraIntrinsics::load_json(&config.intrinsics_path)?.resized(width, height)?;
        log::info!(
            "loaded intrinsics from {} ({}x{}, fx={:.1}, fy={:.1})",
            config.intrinsics_path.display(),
            intrinsics.width,
            intrinsics.height,
            intrinsics.fx,
            intrinsics.fy
        );

        let board = match &config.board_path {
            Some(path) => {
                let board = BoardConfig::load_json(path)?;
                log::info!("loaded board with {} markers from {}", board.len(), path.display());
                Some(board)
            }
            None => None,
        };

        Ok(Self {
            detector,
            solver: PlanarPoseSolver,
            intrinsics,
            sizes: config.marker_sizes.clone(),
            board,
        })
    }
}

impl<D: MarkerDetector, S: ExtrinsicsSolver> MarkerExtrinsicsAdapter<D, S> {
    /// Swap the pose solver.
    pub fn with_solver<S2: ExtrinsicsSolver>(self, solver: S2) -> MarkerExtrinsicsAdapter<D, S2> {
        MarkerExtrinsicsAdapter {
            detector: self.detector,
            solver,
            intrinsics: self.intrinsics,
            sizes: self.sizes,
            board: self.board,
        }
    }

    pub fn with_board(mut self, board: BoardConfig) -> Self {
        self.board = Some(board);
        self
    }

    #[inline]
    pub fn intrinsics(&self) -> &CameraIntrinsics {
        &self.intrinsics
    }

    #[inline]
    pub fn marker_sizes(&self) -> &MarkerSizeTable {
        &self.sizes
    }

    #[inline]
    pub fn board(&self) -> Option<&BoardConfig> {
        self.board.as_ref()
    }

    #[inline]
    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    /// Detect markers in `frame` and solve their extrinsics.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self, frame)))]
    pub fn detect(&mut self, frame: &D::Frame) -> FrameDetections {
        let raw = self.detector.detect(frame);
        self.solve(&raw)
    }

    /// Solve extrinsics for already-detected markers.
    ///
    /// Markers the solver rejects are dropped; ids are not deduplicated.
    pub fn solve(&self, raw: &[RawMarker]) -> FrameDetections {
        let mut markers = Vec::with_capacity(raw.len());
        for m in raw {
            let size = self.sizes.size_for(m.id);
            match self.solver.solve_marker(&m.corners, size, &self.intrinsics) {
                Some(pose) => markers.push(MarkerObservation::new(
                    m.id,
                    pose.translation,
                    pose.rotation_vector,
                )),
                None => log::debug!("dropping marker {}: no pose from corners", m.id),
            }
        }

        let board = self.board.as_ref().and_then(|b| self.solve_board(b, raw));
        log::trace!(
            "frame: {} raw markers, {} solved, board={}",
            raw.len(),
            markers.len(),
            board.is_some()
        );

        FrameDetections { markers, board }
    }

    fn solve_board(&self, board: &BoardConfig, raw: &[RawMarker]) -> Option<BoardObservation> {
        let mut used = BTreeSet::new();
        let mut object: Vec<Point2<f64>> = Vec::new();
        let mut image: Vec<Point2<f32>> = Vec::new();

        for m in raw {
            let Some(layout) = board.marker(m.id) else {
                continue;
            };
            if !used.insert(m.id) {
                continue;
            }
            object.extend(layout.planar_corners());
            image.extend(m.corners);
        }

        if used.is_empty() {
            return None;
        }

        match self.solver.solve_planar(&object, &image, &self.intrinsics) {
            Some(pose) => Some(BoardObservation {
                translation: pose.translation,
                rotation_vector: pose.rotation_vector,
                markers_used: used.len(),
                coverage: used.len() as f32 / board.len() as f32,
            }),
            None => {
                log::warn!("board pose failed with {} markers", used.len());
                None
            }
        }
    }
}
