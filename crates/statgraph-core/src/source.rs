// File: crates/statgraph-core/src/source.rs
// Summary: Data-source contract (metric config -> JSON payload) and the payload shape.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::catalog::MetricConfig;
use crate::error::Result;

/// Metric payload: `{ "items": [ { "timestamp": "...", "<value field>": n, ... } ] }`.
///
/// Items are kept as raw JSON objects because the value field name depends on the metric.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Payload {
    pub items: Vec<Map<String, Value>>,
}

impl Payload {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader(reader: impl std::io::Read) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}

/// Resolves a metric config into a payload (typically an HTTP client).
///
/// Errors are the implementor's own and reach the caller unmodified; the chart
/// never retries or swallows them.
pub trait DataSource {
    type Error: std::error::Error + 'static;

    fn fetch(&self, metric: &MetricConfig) -> std::result::Result<Payload, Self::Error>;
}
