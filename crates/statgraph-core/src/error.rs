// File: crates/statgraph-core/src/error.rs
// Summary: Error types shared by the layout engine, the controller and the catalog.

use thiserror::Error;

/// Every failure that prevents a chart surface from being produced.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("malformed timestamp {raw:?}: {reason}")]
    MalformedTimestamp { raw: String, reason: &'static str },

    #[error("series has no data points")]
    EmptySeries,

    #[error("invalid display config: {0}")]
    InvalidDisplayConfig(String),

    #[error("item {index} has no string `timestamp` field")]
    MissingTimestamp { index: usize },

    #[error("item {index} has no numeric `{field}` field")]
    MissingValue { index: usize, field: String },

    #[error("unknown metric `{0}`")]
    UnknownMetric(String),

    #[error("metric `{0}` has no endpoint")]
    MissingEndpoint(String),

    #[error("endpoint template needs parameter `{0}`")]
    MissingParameter(String),

    #[error("surface error: {0}")]
    Surface(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ChartError {
    pub(crate) fn malformed(raw: &str, reason: &'static str) -> Self {
        Self::MalformedTimestamp { raw: raw.to_string(), reason }
    }
}

/// Failure of [`crate::Chart::fetch_and_render`]: either the data source or the render.
///
/// Source errors are carried unmodified so callers can match on their own type.
#[derive(Debug, Error)]
pub enum FetchRenderError<E>
where
    E: std::error::Error + 'static,
{
    #[error("data source failed")]
    Source(#[source] E),

    #[error(transparent)]
    Chart(#[from] ChartError),
}

pub type Result<T, E = ChartError> = std::result::Result<T, E>;
