// File: crates/statgraph-core/src/lib.rs
// Summary: Core library entry point; exports the layout engine, chart controller and surface API.

pub mod catalog;
pub mod chart;
pub mod color;
pub mod config;
pub mod error;
pub mod format;
pub mod layout;
pub mod painter;
pub mod scale;
pub mod series;
pub mod source;
pub mod surface;
pub mod ticks;
pub mod time;

pub use catalog::{MetricCatalog, MetricConfig, MetricDefinition};
pub use chart::{Chart, ChartLayout};
pub use color::Rgba;
pub use config::{DisplayConfig, GraphType};
pub use error::{ChartError, FetchRenderError, Result};
pub use format::format_si;
pub use layout::{resolve_geometry, resolve_plot_height, resolve_y_axis_width, PlotGeometry};
pub use scale::{build_band_scale, build_value_scale, BandScale, ValueScale};
pub use series::{DataPoint, Series};
pub use source::{DataSource, Payload};
pub use surface::{DrawOp, DrawingSurface, RecordingSurface, TextAlign, TextMeasure};
pub use ticks::{select_labeled_ticks, LabeledTick};
pub use time::{normalize, NormalizedInstant};
