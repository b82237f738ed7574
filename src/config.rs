//! Configuration and defaults for regcollapse.
//!
//! This module contains the configuration structure and default values
//! that control how annotated regions are merged.

use crate::types::Layout;

/// Default proximity threshold, in bases, under which neighbouring regions merge.
pub const DEFAULT_MERGE_DISTANCE: i64 = 100;

/// Configuration for the merge stage.
#[derive(Debug, Clone)]
pub struct Config {
    /// Largest gap between an open interval's end and the next start that still merges.
    pub merge_distance: i64,
    /// Row layout of the merged table.
    pub layout: Layout,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            merge_distance: DEFAULT_MERGE_DISTANCE,
            layout: Layout::Long,
        }
    }
}

impl Config {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the merge distance in bases.
    ///
    /// Negative values are rejected and leave the config unchanged; returns
    /// whether the value was applied.
    pub fn set_merge_distance(&mut self, distance: i64) -> bool {
        if distance < 0 {
            return false;
        }
        self.merge_distance = distance;
        true
    }
}
