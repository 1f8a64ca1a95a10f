// File: crates/statgraph-core/src/series.rs
// Summary: Data points and the non-empty, caller-ordered series rendered by the chart.

use log::trace;

use crate::error::{ChartError, Result};
use crate::source::Payload;
use crate::time::{normalize, NormalizedInstant};

/// Name of the timestamp field in payload items.
pub const TIMESTAMP_FIELD: &str = "timestamp";

/// One reporting period: raw timestamp (compact or ISO-8601) and its value.
#[derive(Clone, Debug, PartialEq)]
pub struct DataPoint {
    pub timestamp: String,
    pub value: f64,
}

impl DataPoint {
    pub fn new(timestamp: impl Into<String>, value: f64) -> Self {
        Self { timestamp: timestamp.into(), value }
    }
}

/// Chronologically ordered points as delivered by the source. Never empty and
/// never re-sorted here.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    points: Vec<DataPoint>,
}

impl Series {
    pub fn new(points: Vec<DataPoint>) -> Result<Self> {
        if points.is_empty() {
            return Err(ChartError::EmptySeries);
        }
        Ok(Self { points })
    }

    /// Extract `(timestamp, value_field)` from every payload item, in order.
    pub fn from_payload(payload: &Payload, value_field: &str) -> Result<Self> {
        let points = payload
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let timestamp = item
                    .get(TIMESTAMP_FIELD)
                    .and_then(|v| v.as_str())
                    .ok_or(ChartError::MissingTimestamp { index })?;
                let value = item.get(value_field).and_then(|v| v.as_f64()).ok_or_else(|| {
                    ChartError::MissingValue { index, field: value_field.to_string() }
                })?;
                Ok(DataPoint::new(timestamp, value))
            })
            .collect::<Result<Vec<_>>>()?;
        trace!("payload yielded {} points for `{}`", points.len(), value_field);
        Self::new(points)
    }

    pub fn points(&self) -> &[DataPoint] { &self.points }

    pub fn len(&self) -> usize { self.points.len() }

    /// Whether the series holds no points.
    pub fn is_empty(&self) -> bool { self.points.is_empty() }

    pub fn iter(&self) -> std::slice::Iter<'_, DataPoint> { self.points.iter() }

    /// Largest value in the series.
    pub fn max_value(&self) -> f64 {
        self.points.iter().map(|p| p.value).fold(f64::NEG_INFINITY, f64::max)
    }

    /// Normalize every timestamp, in series order. The first malformed point aborts.
    pub fn instants(&self) -> Result<Vec<NormalizedInstant>> {
        self.points.iter().map(|p| normalize(&p.timestamp)).collect()
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a DataPoint;
    type IntoIter = std::slice::Iter<'a, DataPoint>;

    fn into_iter(self) -> Self::IntoIter { self.points.iter() }
}
