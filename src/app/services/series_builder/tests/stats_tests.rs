//! Tests for build statistics tracking

use super::{read_records, test_labels};
use crate::app::services::series_builder::{BuildStats, build};

#[test]
fn test_stats_count_rows_and_datapoints() {
    let records = read_records("TIME,FLUX,FLUX_ERR\n100,1.0,0.1\n200,nan,0.2\n300,3.0,0.3\n");
    let result = build(&records, test_labels()).unwrap();

    assert_eq!(result.stats.rows_total, 3);
    assert_eq!(result.stats.rows_skipped, 1);
    assert_eq!(result.stats.rows_ingested(), 2);
    // Two surviving rows × two measurement columns
    assert_eq!(result.stats.datapoints_appended, 4);
}

#[test]
fn test_stats_default_is_empty() {
    let stats = BuildStats::default();
    assert_eq!(stats.rows_total, 0);
    assert_eq!(stats.rows_skipped, 0);
    assert_eq!(stats.datapoints_appended, 0);
    assert_eq!(stats.rows_ingested(), 0);
}
