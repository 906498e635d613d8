//! Physical marker sizes by id.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Side length of the small printed markers, meters.
pub const DEFAULT_MARKER_SIZE: f32 = 0.034;
/// Side length of the large wall markers, meters.
pub const LARGE_MARKER_SIZE: f32 = 0.1056;
/// Ids printed at [`LARGE_MARKER_SIZE`].
pub const LARGE_MARKER_IDS: [u32; 4] = [698, 683, 795, 819];

/// Static id → side length table used when requesting extrinsics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkerSizeTable {
    /// Size for ids not listed in `sizes`, meters.
    pub default_size: f32,
    #[serde(default)]
    pub sizes: BTreeMap<u32, f32>,
}

impl Default for MarkerSizeTable {
    fn default() -> Self {
        let sizes = LARGE_MARKER_IDS
            .iter()
            .map(|&id| (id, LARGE_MARKER_SIZE))
            .collect();
        Self {
            default_size: DEFAULT_MARKER_SIZE,
            sizes,
        }
    }
}

impl MarkerSizeTable {
    /// Every id uses the same size.
    pub fn uniform(size: f32) -> Self {
        Self {
            default_size: size,
            sizes: BTreeMap::new(),
        }
    }

    pub fn with_size(mut self, id: u32, size: f32) -> Self {
        self.sizes.insert(id, size);
        self
    }

    #[inline]
    pub fn size_for(&self, id: u32) -> f32 {
        self.sizes.get(&id).copied().unwrap_or(self.default_size)
    }
}
