// File: crates/statgraph-core/src/chart.rs
// Summary: Chart controller: validates, lays out and paints one series onto a caller-allocated surface.

use log::{debug, warn};

use crate::catalog::MetricConfig;
use crate::color::Rgba;
use crate::config::{DisplayConfig, GraphType};
use crate::error::{FetchRenderError, Result};
use crate::layout::{resolve_layout, resolve_plot_height, AxisLayout};
use crate::painter::{paint_bars, paint_line, paint_x_axis, paint_y_axis};
use crate::scale::{build_band_scale, build_value_scale, BandScale, ValueScale};
use crate::series::Series;
use crate::source::{DataSource, Payload};
use crate::surface::{DrawingSurface, TextMeasure};
use crate::ticks::{select_labeled_ticks, LabeledTick};
use crate::time::NormalizedInstant;

/// Everything the painter needs for one render, resolved in two passes:
/// height first (value scale), then width (measured Y axis, band scale).
#[derive(Clone, Debug)]
pub struct ChartLayout {
    pub instants: Vec<NormalizedInstant>,
    pub value: ValueScale,
    pub axes: AxisLayout,
    pub band: BandScale,
    pub x_ticks: Vec<LabeledTick>,
}

impl ChartLayout {
    /// `instants` are the normalized timestamps of `series`, in the same order.
    /// `measure` must already use the label font.
    pub fn resolve<M>(
        display: &DisplayConfig,
        series: &Series,
        instants: Vec<NormalizedInstant>,
        measure: &M,
    ) -> Self
    where
        M: TextMeasure + ?Sized,
    {
        let plot_height = resolve_plot_height(display);
        let value = build_value_scale(series, plot_height);
        let axes = resolve_layout(display, &value, measure);
        let band = build_band_scale(&instants, axes.geometry.band_range());
        let x_ticks = if display.add_x_axis { select_labeled_ticks(&band, measure) } else { Vec::new() };
        Self { instants, value, axes, band, x_ticks }
    }

    /// Paint axes first (Y, then X), then the series on top.
    pub fn paint<S>(&self, surface: &mut S, display: &DisplayConfig, series: &Series, color: Rgba)
    where
        S: DrawingSurface + ?Sized,
    {
        if display.add_y_axis {
            paint_y_axis(surface, &self.axes.y_axis, &self.value);
        }
        if display.add_x_axis {
            paint_x_axis(surface, &self.x_ticks, &self.axes.geometry, display.font_px());
        }
        match display.graph_type {
            GraphType::Bar => paint_bars(surface, &self.band, &self.value, series, &self.instants, color),
            GraphType::Line => paint_line(surface, &self.band, &self.value, series, &self.instants, color),
        }
    }
}

/// A metric to plot and how to draw it. Holds no state between renders.
#[derive(Clone, Debug, PartialEq)]
pub struct Chart {
    pub metric: MetricConfig,
    pub display: DisplayConfig,
}

impl Chart {
    pub fn new(metric: MetricConfig, display: DisplayConfig) -> Self {
        Self { metric, display }
    }

    /// Render `series` onto a fresh surface obtained from `alloc(width, height)`.
    ///
    /// The config is validated and every timestamp normalized before `alloc`
    /// runs, so a bad input never touches a surface.
    pub fn render<S, F>(&self, series: &Series, alloc: F) -> Result<S>
    where
        S: DrawingSurface,
        F: FnOnce(u32, u32) -> Result<S>,
    {
        self.display.validate()?;
        let color = self.display.series_color()?;
        let instants = series.instants().map_err(|e| {
            warn!("render of `{}` aborted: {}", self.metric.name, e);
            e
        })?;

        let mut surface = alloc(self.display.width, self.display.height)?;
        surface.clear();
        surface.set_font_size(self.display.font_px());

        let layout = ChartLayout::resolve(&self.display, series, instants, &surface);
        debug!(
            "render `{}`: {} points, {} bands, {} x labels",
            self.metric.name,
            series.len(),
            layout.band.len(),
            layout.x_ticks.len()
        );
        layout.paint(&mut surface, &self.display, series, color);
        Ok(surface)
    }

    /// Extract the metric's value field from `payload`, then [`Chart::render`].
    pub fn render_payload<S, F>(&self, payload: &Payload, alloc: F) -> Result<S>
    where
        S: DrawingSurface,
        F: FnOnce(u32, u32) -> Result<S>,
    {
        let series = Series::from_payload(payload, &self.metric.value_field)?;
        self.render(&series, alloc)
    }

    /// Fetch the payload from `source`, then [`Chart::render_payload`].
    ///
    /// An invalid display config fails before the source is queried.
    pub fn fetch_and_render<D, S, F>(&self, source: &D, alloc: F) -> Result<S, FetchRenderError<D::Error>>
    where
        D: DataSource,
        S: DrawingSurface,
        F: FnOnce(u32, u32) -> Result<S>,
    {
        self.display.validate()?;
        let payload = source.fetch(&self.metric).map_err(FetchRenderError::Source)?;
        Ok(self.render_payload(&payload, alloc)?)
    }
}
