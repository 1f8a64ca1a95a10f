// File: crates/statgraph-core/src/layout.rs
// Summary: Two-pass axis layout: plot height first, then the measured Y-axis width.

use log::debug;

use crate::config::DisplayConfig;
use crate::format::format_si;
use crate::scale::{Value, ValueScale};
use crate::surface::TextMeasure;

/// Length of the Y-axis tick guide, also the gap between labels and plot.
pub const TICK_GUIDE_WIDTH: f64 = 2.0;

/// Vertical room taken by the X axis, in multiples of the font size.
const X_AXIS_HEIGHT_EM: f64 = 1.5;

/// Pixel geometry of the plot area. Recomputed on every render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotGeometry {
    pub plot_height: f64,
    /// Horizontal room left for the bands, `width - y_axis_width`.
    pub plot_width: f64,
    pub y_axis_width: f64,
}

impl PlotGeometry {
    /// Pixel range handed to the band scale.
    pub fn band_range(&self) -> (f64, f64) {
        (self.y_axis_width, self.y_axis_width + self.plot_width)
    }
}

/// Y-axis ticks with their formatted labels; empty when the axis is off.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct YAxisLayout {
    pub ticks: Vec<Value>,
    pub labels: Vec<String>,
    pub width: f64,
}

impl YAxisLayout {
    pub fn is_empty(&self) -> bool { self.ticks.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (Value, &str)> {
        self.ticks.iter().copied().zip(self.labels.iter().map(String::as_str))
    }
}

pub fn resolve_plot_height(config: &DisplayConfig) -> f64 {
    let height = config.height as f64;
    if config.add_x_axis {
        height - config.font_px() * X_AXIS_HEIGHT_EM
    } else {
        height
    }
}

/// Requested Y tick count: one tick per two lines of text.
pub fn y_tick_count(plot_height: f64, font_size: f64) -> f64 {
    plot_height / (font_size * 2.0)
}

/// Y ticks, their SI labels and the axis width (widest label + guide).
pub fn resolve_y_axis<M>(value_scale: &ValueScale, config: &DisplayConfig, measure: &M) -> YAxisLayout
where
    M: TextMeasure + ?Sized,
{
    if !config.add_y_axis {
        return YAxisLayout::default();
    }
    let plot_height = value_scale.baseline_px() - value_scale.top_px;
    let count = y_tick_count(plot_height, config.font_px());
    let ticks = value_scale.ticks(count);
    let labels: Vec<String> = ticks.iter().map(|&v| format_si(v)).collect();
    let widest = labels.iter().map(|l| measure.measure_text(l)).fold(0.0, f64::max);
    let width = widest + TICK_GUIDE_WIDTH;
    debug!("y axis: {} ticks (requested {:.2}), width {:.1}px", ticks.len(), count, width);
    YAxisLayout { ticks, labels, width }
}

/// Width of the Y axis as it will be drawn; 0 when the axis is off.
pub fn resolve_y_axis_width<M>(value_scale: &ValueScale, config: &DisplayConfig, measure: &M) -> f64
where
    M: TextMeasure + ?Sized,
{
    resolve_y_axis(value_scale, config, measure).width
}

/// Both layout passes for one render.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisLayout {
    pub geometry: PlotGeometry,
    pub y_axis: YAxisLayout,
}

/// Resolve the Y axis and the geometry it leaves for the bands.
///
/// `value_scale` must already span `[0, plot_height]`, see [`resolve_plot_height`].
pub fn resolve_layout<M>(config: &DisplayConfig, value_scale: &ValueScale, measure: &M) -> AxisLayout
where
    M: TextMeasure + ?Sized,
{
    let plot_height = value_scale.baseline_px() - value_scale.top_px;
    let y_axis = resolve_y_axis(value_scale, config, measure);
    let width = config.width as f64;
    let geometry = PlotGeometry {
        plot_height,
        plot_width: (width - y_axis.width).max(0.0),
        y_axis_width: y_axis.width,
    };
    debug!(
        "geometry: plot {:.1}x{:.1}, y axis {:.1}px",
        geometry.plot_width, geometry.plot_height, geometry.y_axis_width
    );
    AxisLayout { geometry, y_axis }
}

pub fn resolve_geometry<M>(config: &DisplayConfig, value_scale: &ValueScale, measure: &M) -> PlotGeometry
where
    M: TextMeasure + ?Sized,
{
    resolve_layout(config, value_scale, measure).geometry
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(add_x_axis: bool, add_y_axis: bool) -> DisplayConfig {
        DisplayConfig { add_x_axis, add_y_axis, ..DisplayConfig::default() }
    }

    fn chars(s: &str) -> f64 { s.chars().count() as f64 * 6.0 }

    #[test]
    fn x_axis_reserves_one_and_a_half_lines() {
        assert_eq!(resolve_plot_height(&config(true, true)), 134.5);
        assert_eq!(resolve_plot_height(&config(false, true)), 151.0);
    }

    #[test]
    fn y_axis_width_comes_from_the_widest_label() {
        let cfg = config(true, true);
        let scale = ValueScale::new_linear(0.0, 134.5, 0.0, 50.0);
        let y = resolve_y_axis(&scale, &cfg, &chars);
        assert_eq!(y.labels, vec!["0.0", "10", "20", "30", "40", "50"]);
        assert_eq!(y.width, 3.0 * 6.0 + TICK_GUIDE_WIDTH);
        assert_eq!(resolve_y_axis_width(&scale, &cfg, &chars), y.width);
    }

    #[test]
    fn y_axis_width_does_not_depend_on_chart_width() {
        let scale = ValueScale::new_linear(0.0, 134.5, 0.0, 1234.0);
        let narrow = DisplayConfig { width: 120, ..config(true, true) };
        let wide = DisplayConfig { width: 1200, ..config(true, true) };
        assert_eq!(
            resolve_y_axis_width(&scale, &narrow, &chars),
            resolve_y_axis_width(&scale, &wide, &chars)
        );
    }

    #[test]
    fn disabled_y_axis_gives_bands_the_full_width() {
        let cfg = config(true, false);
        let scale = ValueScale::new_linear(0.0, 134.5, 0.0, 50.0);
        let layout = resolve_layout(&cfg, &scale, &chars);
        assert!(layout.y_axis.is_empty());
        assert_eq!(layout.geometry.y_axis_width, 0.0);
        assert_eq!(layout.geometry.band_range(), (0.0, 400.0));
    }

    #[test]
    fn geometry_splits_width_between_axis_and_bands() {
        let cfg = config(true, true);
        let scale = ValueScale::new_linear(0.0, 134.5, 0.0, 50.0);
        let g = resolve_geometry(&cfg, &scale, &chars);
        assert_eq!(g.plot_height, 134.5);
        assert_eq!(g.y_axis_width, 20.0);
        assert_eq!(g.plot_width, 380.0);
        assert_eq!(g.band_range(), (20.0, 400.0));
    }

    #[test]
    fn tick_count_is_one_per_two_lines() {
        assert!((y_tick_count(134.5, 11.0) - 6.113636).abs() < 1e-5);
    }
}
