//! Series builder for light-curve CSV records
//!
//! Consumes the decoded rows of one light-curve file and produces one
//! named series per measurement column, keyed by column position. The
//! first row is the header and the first column is always time; rows
//! carrying a missing-value sentinel are dropped whole.
//!
//! ## Architecture
//!
//! - [`builder`] - Header analysis, row filtering, and datapoint assembly
//! - [`stats`] - Build statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use lightcurve_ingestor::Labels;
//! use lightcurve_ingestor::app::services::series_builder;
//!
//! # fn example(records: Vec<csv::StringRecord>) -> lightcurve_ingestor::Result<()> {
//! let labels = Arc::new(Labels::new("kplr", "008462852", Some("KIC".to_string())));
//! let result = series_builder::build(&records, labels)?;
//!
//! println!(
//!     "Built {} series from {} rows",
//!     result.series.len(),
//!     result.stats.rows_total
//! );
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use builder::build;
pub use stats::{BuildResult, BuildStats};
