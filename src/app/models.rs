//! Core data structures for light-curve time series
//!
//! Defines the labels, datapoint, series, and batch types produced by the
//! series builder and consumed by the Warp10 client. Encoding into the
//! Warp10 input format lives here next to the data it serializes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::Arc;

use crate::constants::{TIME_UNITS_PER_SECOND, labels as label_keys};

/// Labels identifying the source object of a light-curve file
///
/// Derived once per input file from its filename and shared read-only
/// (via `Arc`) by every series built from that file. The key set is
/// fixed: campaign code, object identifier, and the optional catalog the
/// campaign maps to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Labels {
    pub campaign: String,
    pub id: String,
    pub catalog: Option<String>,
}

impl Labels {
    pub fn new(
        campaign: impl Into<String>,
        id: impl Into<String>,
        catalog: Option<String>,
    ) -> Self {
        Self {
            campaign: campaign.into(),
            id: id.into(),
            catalog,
        }
    }

    /// Key/value pairs in fixed wire order (campaign, id, catalog)
    pub fn as_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = vec![
            (label_keys::CAMPAIGN, self.campaign.as_str()),
            (label_keys::ID, self.id.as_str()),
        ];
        if let Some(catalog) = &self.catalog {
            pairs.push((label_keys::CATALOG, catalog.as_str()));
        }
        pairs
    }

    /// Encode as a Warp10 label block, e.g. `{campaign=kplr,id=008462852}`
    fn encode(&self) -> String {
        let body = self
            .as_pairs()
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join(",");
        format!("{{{}}}", body)
    }
}

/// A single timestamped measurement
///
/// Timestamps carry whole seconds only; ordering within a series follows
/// input row order and is not guaranteed sorted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Datapoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

impl Datapoint {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }

    /// Timestamp in Warp10 platform time units (microseconds)
    pub fn timestamp_units(&self) -> i64 {
        self.timestamp.timestamp() * TIME_UNITS_PER_SECOND
    }
}

/// A named, labeled, ordered sequence of timestamped measurements
///
/// One series exists per non-time CSV column with a non-empty header.
/// Created when the header row is parsed, populated row by row, and
/// immutable once handed to the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    class: String,
    labels: Arc<Labels>,
    datapoints: Vec<Datapoint>,
}

impl Series {
    /// Create an empty series with the given class name and shared labels
    pub fn new(class: impl Into<String>, labels: Arc<Labels>) -> Self {
        Self {
            class: class.into(),
            labels,
            datapoints: Vec::new(),
        }
    }

    /// Fully-qualified class name, e.g. "kepler.flux.raw"
    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn datapoints(&self) -> &[Datapoint] {
        &self.datapoints
    }

    pub fn len(&self) -> usize {
        self.datapoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datapoints.is_empty()
    }

    /// Append a datapoint, preserving insertion order
    pub fn add_datapoint(&mut self, timestamp: DateTime<Utc>, value: f64) {
        self.datapoints.push(Datapoint::new(timestamp, value));
    }

    /// Append this series' datapoints to `out` in the Warp10 input format
    fn write_input_format(&self, out: &mut String) {
        let labels = self.labels.encode();
        for datapoint in &self.datapoints {
            // writeln! to a String cannot fail
            let _ = writeln!(
                out,
                "{}// {}{} {}",
                datapoint.timestamp_units(),
                self.class,
                labels,
                format_value(datapoint.value)
            );
        }
    }
}

/// The set of all series derived from one input file
///
/// Transient: owned by a single dispatch operation and discarded after
/// the push completes, whatever the outcome.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    series: Vec<Series>,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect a column-indexed series mapping into a batch
    ///
    /// Series order follows ascending column index so the encoded output
    /// is deterministic.
    pub fn from_series(series: BTreeMap<usize, Series>) -> Self {
        Self {
            series: series.into_values().collect(),
        }
    }

    pub fn add_series(&mut self, series: Series) {
        self.series.push(series);
    }

    /// Number of series in the batch
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Total number of datapoints across all series
    pub fn datapoint_count(&self) -> usize {
        self.series.iter().map(Series::len).sum()
    }

    /// Encode the whole batch in the Warp10 input format, one line per
    /// datapoint
    pub fn to_input_format(&self) -> String {
        let mut out = String::new();
        for series in &self.series {
            series.write_input_format(&mut out);
        }
        out
    }
}

/// Format a measurement value for the wire
///
/// Whole values keep a trailing ".0" so the backend stores doubles, never
/// longs.
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}
