// File: crates/demo/src/aqs.rs
// Summary: Blocking HTTP data source resolving metric configs against the metrics REST API.

use log::debug;
use reqwest::blocking::Client as HttpClient;
use reqwest::header::{HeaderValue, USER_AGENT};
use statgraph_core::{ChartError, DataSource, MetricCatalog, MetricConfig, Payload};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AqsError {
    #[error(transparent)]
    Endpoint(#[from] ChartError),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Fetches payloads from the URL the catalog resolves for each metric.
pub struct AqsSource {
    http_client: HttpClient,
    catalog: MetricCatalog,
}

impl AqsSource {
    pub fn new(catalog: MetricCatalog) -> Self {
        Self { http_client: HttpClient::new(), catalog }
    }
}

impl DataSource for AqsSource {
    type Error = AqsError;

    fn fetch(&self, metric: &MetricConfig) -> Result<Payload, AqsError> {
        let url = self.catalog.resolve_url(metric)?;
        debug!("GET {url}");
        let payload = self
            .http_client
            .get(&url)
            .header(USER_AGENT, HeaderValue::from_static(concat!("statgraph-demo/", env!("CARGO_PKG_VERSION"))))
            .send()?
            .error_for_status()?
            .json::<Payload>()?;
        Ok(payload)
    }
}
