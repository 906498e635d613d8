//! Multi-marker board layout.

use std::collections::BTreeSet;
use std::path::Path;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::config::{read_json, write_json, ConfigIoError};

/// Out-of-plane tolerance for board corners, meters.
const PLANAR_TOLERANCE: f32 = 1e-5;

#[derive(thiserror::Error, Debug)]
pub enum BoardConfigError {
    #[error(transparent)]
    Io(#[from] ConfigIoError),
    #[error("board has no markers")]
    Empty,
    #[error("marker id {id} appears more than once")]
    DuplicateId { id: u32 },
    #[error("marker id {id} has non-finite corners")]
    NonFinite { id: u32 },
    #[error("marker id {id} is not on the board plane (z must be 0)")]
    NonPlanar { id: u32 },
}

/// One marker on the board: corners TL, TR, BR, BL in board coordinates, meters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardMarker {
    pub id: u32,
    pub corners: [[f32; 3]; 4],
}

impl BoardMarker {
    /// Corners projected onto the board plane.
    pub fn planar_corners(&self) -> [Point2<f64>; 4] {
        self.corners.map(|[x, y, _]| Point2::new(x as f64, y as f64))
    }
}

/// Physical layout of a planar multi-marker board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub markers: Vec<BoardMarker>,
}

impl BoardConfig {
    /// Validate and build a board.
    pub fn new(markers: Vec<BoardMarker>) -> Result<Self, BoardConfigError> {
        let board = Self { markers };
        board.validate()?;
        Ok(board)
    }

    /// Load and validate a board layout from JSON.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, BoardConfigError> {
        let board: Self = read_json(path)?;
        board.validate()?;
        Ok(board)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigIoError> {
        write_json(self, path)
    }

    pub fn validate(&self) -> Result<(), BoardConfigError> {
        if self.markers.is_empty() {
            return Err(BoardConfigError::Empty);
        }
        let mut seen = BTreeSet::new();
        for marker in &self.markers {
            if !seen.insert(marker.id) {
                return Err(BoardConfigError::DuplicateId { id: marker.id });
            }
            if marker.corners.iter().flatten().any(|v| !v.is_finite()) {
                return Err(BoardConfigError::NonFinite { id: marker.id });
            }
            if marker.corners.iter().any(|c| c[2].abs() > PLANAR_TOLERANCE) {
                return Err(BoardConfigError::NonPlanar { id: marker.id });
            }
        }
        Ok(())
    }

    pub fn marker(&self, id: u32) -> Option<&BoardMarker> {
        self.markers.iter().find(|m| m.id == id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
