//! JSON configuration helpers for the extrinsics adapter.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::MarkerSizeTable;

#[derive(thiserror::Error, Debug)]
pub enum ConfigIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Deserialize a JSON file.
pub fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ConfigIoError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Serialize `value` as pretty-printed JSON.
pub fn write_json<T: Serialize>(value: &T, path: impl AsRef<Path>) -> Result<(), ConfigIoError> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

fn default_target_resolution() -> [u32; 2] {
    [1280, 720]
}

/// Files and tables the adapter needs at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdapterConfig {
    /// Camera intrinsics JSON.
    pub intrinsics_path: PathBuf,
    /// Optional board layout JSON; not needed in plane-marker mode.
    #[serde(default)]
    pub board_path: Option<PathBuf>,
    /// Resolution the video source delivers; intrinsics are rescaled to it.
    #[serde(default = "default_target_resolution")]
    pub target_resolution: [u32; 2],
    #[serde(default)]
    pub marker_sizes: MarkerSizeTable,
}

impl AdapterConfig {
    pub fn new(intrinsics_path: impl Into<PathBuf>) -> Self {
        Self {
            intrinsics_path: intrinsics_path.into(),
            board_path: None,
            target_resolution: default_target_resolution(),
            marker_sizes: MarkerSizeTable::default(),
        }
    }

    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigIoError> {
        read_json(path)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigIoError> {
        write_json(self, path)
    }
}
