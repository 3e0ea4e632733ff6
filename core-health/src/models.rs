//! Domain models for health data
//!
//! Plain immutable records returned by providers. Timestamps are
//! milliseconds since the Unix epoch so they cross language bridges as
//! plain numbers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Metric type tag for aggregated step counts.
pub const STEP_COUNT_TYPE: &str = "step_count";

/// Unit label for step counts.
pub const STEPS_UNIT: &str = "steps";

/// A single scalar measurement aggregated over a time range.
///
/// `timestamp` is the reference instant for the value: by convention the
/// *end* of the queried range, not the time of an individual sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthMetric {
    /// Metric tag, e.g. `"step_count"`
    #[serde(rename = "type")]
    pub metric_type: String,
    pub value: f64,
    /// Unit label, e.g. `"steps"`
    pub unit: String,
    pub timestamp: i64,
    /// Origin platform, e.g. `"android"` or `"ios"`
    pub source: String,
}

impl HealthMetric {
    pub fn new(
        metric_type: impl Into<String>,
        value: f64,
        unit: impl Into<String>,
        timestamp: i64,
        source: impl Into<String>,
    ) -> Self {
        Self {
            metric_type: metric_type.into(),
            value,
            unit: unit.into(),
            timestamp,
            source: source.into(),
        }
    }

    /// Aggregated step count ending at `timestamp`.
    pub fn step_count(value: f64, timestamp: i64, source: impl Into<String>) -> Self {
        Self::new(STEP_COUNT_TYPE, value, STEPS_UNIT, timestamp, source)
    }
}

/// A single discrete heart rate sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartRateMeasurement {
    pub beats_per_minute: f64,
    /// Time of this sample (not the range end)
    pub timestamp: i64,
    /// Platform API the sample came from, e.g. `"HealthConnect"`
    pub source: String,
}

impl HeartRateMeasurement {
    pub fn new(beats_per_minute: f64, timestamp: i64, source: impl Into<String>) -> Self {
        Self {
            beats_per_minute,
            timestamp,
            source: source.into(),
        }
    }
}

impl fmt::Display for HeartRateMeasurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HeartRateMeasurement(bpm={}, timestamp={}, source={})",
            self.beats_per_minute, self.timestamp, self.source
        )
    }
}
