//! Test utilities for series builder testing
//!
//! Provides helpers for decoding inline CSV fixtures into records and
//! building the shared test label set.

use csv::StringRecord;
use std::sync::Arc;

use crate::app::models::Labels;

mod stats_tests;

/// Decode inline CSV content into raw records, header included
pub fn read_records(content: &str) -> Vec<StringRecord> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(content.as_bytes());

    reader
        .records()
        .collect::<std::result::Result<Vec<_>, _>>()
        .expect("test fixture must be valid CSV")
}

/// Shared label set for builder tests
pub fn test_labels() -> Arc<Labels> {
    Arc::new(Labels::new("kplr", "008462852", Some("KIC".to_string())))
}
