// File: crates/statgraph-core/src/catalog.rs
// Summary: Metric catalog (value field, endpoint template, default parameters) and URL resolution.

use std::collections::BTreeMap;

use log::debug;

use crate::error::{ChartError, Result};

/// Base URL that endpoint templates are appended to.
pub const AQS_HOST: &str = "https://wikimedia.org/api/rest_v1/metrics";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Structure {
    Timeseries,
    Top,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Area {
    Reading,
    Content,
}

/// Static description of one metric.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricDefinition {
    pub full_name: String,
    pub description: String,
    /// Path template below [`AQS_HOST`], with `{{param}}` placeholders.
    pub endpoint: Option<String>,
    /// Item field holding the plotted number.
    pub value_field: String,
    pub structure: Structure,
    pub area: Area,
    pub unit: Option<String>,
    pub additive: bool,
    /// Parameters used when the caller does not supply them.
    pub defaults: BTreeMap<String, String>,
}

/// Identifies what to plot: the metric, the item field holding the value, and
/// the parameters filling the endpoint template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetricConfig {
    pub name: String,
    pub value_field: String,
    pub params: BTreeMap<String, String>,
}

impl MetricConfig {
    pub fn new(name: impl Into<String>, value_field: impl Into<String>) -> Self {
        Self { name: name.into(), value_field: value_field.into(), params: BTreeMap::new() }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

#[derive(Clone, Debug, Default)]
pub struct MetricCatalog {
    metrics: BTreeMap<String, MetricDefinition>,
}

impl MetricCatalog {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, name: impl Into<String>, def: MetricDefinition) {
        self.metrics.insert(name.into(), def);
    }

    pub fn get(&self, name: &str) -> Option<&MetricDefinition> { self.metrics.get(name) }

    pub fn names(&self) -> impl Iterator<Item = &str> { self.metrics.keys().map(String::as_str) }

    /// Build a [`MetricConfig`] for `name`: caller `params` overlay the metric defaults.
    pub fn config<I, K, V>(&self, name: &str, params: I) -> Result<MetricConfig>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let def = self.get(name).ok_or_else(|| ChartError::UnknownMetric(name.to_string()))?;
        let mut merged = def.defaults.clone();
        merged.extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        Ok(MetricConfig { name: name.to_string(), value_field: def.value_field.clone(), params: merged })
    }

    /// Absolute URL for `metric`, every `{{key}}` replaced from its params.
    pub fn resolve_url(&self, metric: &MetricConfig) -> Result<String> {
        let def = self
            .get(&metric.name)
            .ok_or_else(|| ChartError::UnknownMetric(metric.name.clone()))?;
        let template = def
            .endpoint
            .as_deref()
            .ok_or_else(|| ChartError::MissingEndpoint(metric.name.clone()))?;
        let path = fill_template(template, &metric.params)?;
        let url = format!("{AQS_HOST}{path}");
        debug!("resolved `{}` to {}", metric.name, url);
        Ok(url)
    }

    /// The page-view and editing metrics charts are usually drawn from.
    pub fn builtin() -> Self {
        let mut c = Self::new();
        let reading = |full_name: &str, description: &str, value_field: &str, structure: Structure| {
            MetricDefinition {
                full_name: full_name.into(),
                description: description.into(),
                endpoint: None,
                value_field: value_field.into(),
                structure,
                area: Area::Reading,
                unit: None,
                additive: true,
                defaults: params(&[("project", "all-projects"), ("granularity", "monthly")]),
            }
        };
        let content = |full_name: &str, description: &str, value_field: &str| MetricDefinition {
            full_name: full_name.into(),
            description: description.into(),
            endpoint: None,
            value_field: value_field.into(),
            structure: Structure::Timeseries,
            area: Area::Content,
            unit: None,
            additive: false,
            defaults: params(&[
                ("project", "all-projects"),
                ("editor_type", "all-editor-types"),
                ("page_type", "all-page-types"),
                ("granularity", "monthly"),
            ]),
        };

        let mut top = reading("Top Viewed Articles", "Most viewed articles", "views", Structure::Top);
        top.defaults.insert("access".into(), "all-access".into());
        c.insert("top-viewed-articles", top);

        let mut by_country = reading(
            "Page Views by Country",
            "Countries where this project is visited the most",
            "views",
            Structure::Top,
        );
        by_country.defaults.insert("access".into(), "all-access".into());
        c.insert("page-views-by-country", by_country);

        let mut total = reading(
            "Total Page Views",
            "Viewing of article content, excluding bot traffic",
            "views",
            Structure::Timeseries,
        );
        total.endpoint = Some(
            "/pageviews/aggregate/{{project}}/{{access}}/{{agent_type}}/{{granularity}}/{{start}}/{{end}}"
                .into(),
        );
        total.defaults.insert("access".into(), "all-access".into());
        total.defaults.insert("agent_type".into(), "user".into());
        c.insert("total-page-views", total);

        let mut devices = reading(
            "Unique Devices",
            "Distinct devices visiting a project in a given period",
            "devices",
            Structure::Timeseries,
        );
        devices.additive = false;
        devices.defaults.insert("access-site".into(), "all-sites".into());
        c.insert("unique-devices", devices);

        let mut abs_bytes = content(
            "Absolute bytes diff",
            "Sum of absolute byte differences of every edit",
            "abs_bytes_diff",
        );
        abs_bytes.unit = Some("bytes".into());
        c.insert("absolute-bytes-diff", abs_bytes);

        let mut edited = content("Edited pages", "Pages edited, excluding redirects", "edited_pages");
        edited.additive = true;
        edited.defaults.insert("activity_level".into(), "all-activity-levels".into());
        c.insert("edited-pages", edited);

        let mut net_bytes = content(
            "Net bytes difference",
            "Sum of byte differences of every edit",
            "net_bytes_diff",
        );
        net_bytes.unit = Some("bytes".into());
        c.insert("net-bytes-difference", net_bytes);

        c
    }
}

fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

fn fill_template(template: &str, params: &BTreeMap<String, String>) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find("{{") {
        let Some(close) = rest[open..].find("}}") else { break };
        let key = rest[open + 2..open + close].trim();
        let value = params.get(key).ok_or_else(|| ChartError::MissingParameter(key.to_string()))?;
        out.push_str(&rest[..open]);
        out.push_str(value);
        rest = &rest[open + close + 2..];
    }
    out.push_str(rest);
    Ok(out)
}
