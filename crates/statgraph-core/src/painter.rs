// File: crates/statgraph-core/src/painter.rs
// Summary: Paints axes, bars and the line polyline onto a drawing surface.

use crate::color::Rgba;
use crate::layout::{PlotGeometry, YAxisLayout, TICK_GUIDE_WIDTH};
use crate::scale::{BandScale, ValueScale};
use crate::series::Series;
use crate::surface::{DrawingSurface, TextAlign};
use crate::ticks::LabeledTick;
use crate::time::NormalizedInstant;

/// Axis guides and labels.
pub const AXIS_INK: Rgba = Rgba::BLACK;

/// Length of the X-axis guide mark below the plot.
pub const X_GUIDE_LENGTH: f64 = 3.0;

/// One filled bar per point, from the value down to the baseline.
///
/// `instants` holds the normalized timestamp of each point, in series order.
pub fn paint_bars<S>(
    surface: &mut S,
    band: &BandScale,
    value: &ValueScale,
    series: &Series,
    instants: &[NormalizedInstant],
    color: Rgba,
) where
    S: DrawingSurface + ?Sized,
{
    surface.set_fill_color(color);
    let baseline = value.baseline_px();
    let width = band.band_width();
    for (point, instant) in series.iter().zip(instants) {
        let Some(x) = band.band_start(instant) else { continue };
        let y = value.to_px(point.value);
        surface.fill_rect(x, y, width, baseline - y);
    }
}

/// A single polyline through the band centers, stroked once.
pub fn paint_line<S>(
    surface: &mut S,
    band: &BandScale,
    value: &ValueScale,
    series: &Series,
    instants: &[NormalizedInstant],
    color: Rgba,
) where
    S: DrawingSurface + ?Sized,
{
    surface.set_stroke_color(color);
    surface.begin_path();
    let mut started = false;
    for (point, instant) in series.iter().zip(instants) {
        let Some(x) = band.center(instant) else { continue };
        let y = value.to_px(point.value);
        if started {
            surface.line_to(x, y);
        } else {
            surface.move_to(x, y);
            started = true;
        }
    }
    surface.stroke();
}

/// Tick guides at the right edge of the axis, labels right-aligned before them.
pub fn paint_y_axis<S>(surface: &mut S, y_axis: &YAxisLayout, value: &ValueScale)
where
    S: DrawingSurface + ?Sized,
{
    if y_axis.is_empty() {
        return;
    }
    let right = y_axis.width;
    let guide_left = right - TICK_GUIDE_WIDTH;
    surface.set_stroke_color(AXIS_INK);
    surface.set_fill_color(AXIS_INK);
    surface.set_text_align(TextAlign::Right);
    for (tick, label) in y_axis.iter() {
        let y = value.to_px(tick);
        surface.begin_path();
        surface.move_to(guide_left, y);
        surface.line_to(right, y);
        surface.stroke();
        surface.fill_text(label, guide_left, y);
    }
}

/// Guide marks under the plot and centered month labels along the bottom edge.
pub fn paint_x_axis<S>(surface: &mut S, ticks: &[LabeledTick], geometry: &PlotGeometry, font_size: f64)
where
    S: DrawingSurface + ?Sized,
{
    let text_y = surface.height() as f64 - font_size / 2.0;
    surface.set_stroke_color(AXIS_INK);
    surface.set_fill_color(AXIS_INK);
    surface.set_text_align(TextAlign::Center);
    for tick in ticks {
        surface.begin_path();
        surface.move_to(tick.center_x, geometry.plot_height);
        surface.line_to(tick.center_x, geometry.plot_height + X_GUIDE_LENGTH);
        surface.stroke();
        surface.fill_text(&tick.label, tick.center_x, text_y);
    }
}
