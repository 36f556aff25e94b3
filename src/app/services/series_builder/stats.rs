//! Build statistics and result structures for series assembly

use std::collections::BTreeMap;

use crate::app::models::Series;

/// Build result with the column-indexed series mapping and statistics
#[derive(Debug, Clone)]
pub struct BuildResult {
    /// Series keyed by their CSV column position (column 0 is time and
    /// never appears)
    pub series: BTreeMap<usize, Series>,

    /// Basic build statistics
    pub stats: BuildStats,
}

/// Simple build statistics
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BuildStats {
    /// Total number of data rows encountered (header excluded)
    pub rows_total: usize,

    /// Number of rows dropped for carrying a missing-value sentinel
    pub rows_skipped: usize,

    /// Number of datapoints appended across all series
    pub datapoints_appended: usize,
}

impl BuildStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self {
            rows_total: 0,
            rows_skipped: 0,
            datapoints_appended: 0,
        }
    }

    /// Number of rows that contributed datapoints
    pub fn rows_ingested(&self) -> usize {
        self.rows_total - self.rows_skipped
    }
}

impl Default for BuildStats {
    fn default() -> Self {
        Self::new()
    }
}
