// File: crates/statgraph-core/src/scale.rs
// Summary: Value (linear, inverted) and time (band) scales, plus "nice" linear tick generation.

use std::collections::HashMap;

use crate::series::Series;
use crate::time::NormalizedInstant;

/// Value Y coordinate (e.g., page views).
pub type Value = f64;

/// Fraction of each band step left empty between bands.
pub const BAND_PADDING: f64 = 0.1;

/// Tick factor thresholds: sqrt(50), sqrt(10), sqrt(2).
const E10: f64 = 7.0710678118654755;
const E5: f64 = 3.1622776601683795;
const E2: f64 = 1.4142135623730951;

/// Upper bound on the requested tick count; larger requests get a coarser step.
const MAX_TICK_COUNT: f64 = 1_000.0;

/// Vertical value scale mapping `[vmin, vmax]` to `[bottom_px, top_px]` (inverted).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueScale {
    pub top_px: f64,
    pub bottom_px: f64,
    pub vmin: Value,
    pub vmax: Value,
}

impl ValueScale {
    pub fn new_linear(top_px: f64, bottom_px: f64, vmin: Value, vmax: Value) -> Self {
        Self { top_px, bottom_px, vmin, vmax }
    }

    /// Pixel Y for `v`. A collapsed domain maps everything to the baseline.
    #[inline]
    pub fn to_px(&self, v: Value) -> f64 {
        let span = self.vmax - self.vmin;
        if span == 0.0 || !span.is_finite() {
            return self.bottom_px;
        }
        self.bottom_px - (v - self.vmin) / span * (self.bottom_px - self.top_px)
    }

    /// Pixel Y of the domain minimum.
    pub fn baseline_px(&self) -> f64 { self.bottom_px }

    pub fn domain(&self) -> (Value, Value) { (self.vmin, self.vmax) }

    /// Round tick values inside the domain, roughly `count` of them.
    pub fn ticks(&self, count: f64) -> Vec<Value> {
        nice_ticks(self.vmin, self.vmax, count)
    }
}

/// Value scale over `[0, max(values)]` onto `[plot_height, 0]`.
pub fn build_value_scale(series: &Series, plot_height: f64) -> ValueScale {
    ValueScale::new_linear(0.0, plot_height, 0.0, series.max_value())
}

/// Evenly spaced ticks on multiples of 1, 2 or 5 x 10^n, all within `[start, stop]`.
///
/// Ticks follow the direction of the input (descending when `stop < start`).
pub fn nice_ticks(start: f64, stop: f64, count: f64) -> Vec<f64> {
    if !(count > 0.0) || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let count = count.min(MAX_TICK_COUNT);
    let reverse = stop < start;
    let (i1, i2, inc) = if reverse { tick_range(stop, start, count) } else { tick_range(start, stop, count) };
    if !(i2 >= i1) {
        return Vec::new();
    }
    let n = (i2 - i1 + 1.0) as usize;
    (0..n)
        .map(|i| {
            let k = if reverse { i2 - i as f64 } else { i1 + i as f64 };
            if inc < 0.0 { k / -inc } else { k * inc }
        })
        .collect()
}

/// Tick index range and increment. A negative increment means "divide by -inc",
/// which keeps decimal steps exact.
fn tick_range(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powi(power as i32);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let scale = 10f64.powi(-power as i32) / factor;
        i1 = js_round(start * scale);
        i2 = js_round(stop * scale);
        if i1 / scale < start { i1 += 1.0; }
        if i2 / scale > stop { i2 -= 1.0; }
        inc = -scale;
    } else {
        let scale = 10f64.powi(power as i32) * factor;
        i1 = js_round(start / scale);
        i2 = js_round(stop / scale);
        if i1 * scale < start { i1 += 1.0; }
        if i2 * scale > stop { i2 -= 1.0; }
        inc = scale;
    }
    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_range(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

/// Round half toward positive infinity.
#[inline]
fn js_round(x: f64) -> f64 { (x + 0.5).floor() }

/// Discrete time scale: one fixed-width band per distinct instant.
///
/// The range is split into equal steps; each band takes `1 - BAND_PADDING` of
/// its step and sits centered in it.
#[derive(Clone, Debug)]
pub struct BandScale {
    domain: Vec<NormalizedInstant>,
    index: HashMap<NormalizedInstant, usize>,
    left: f64,
    right: f64,
}

impl BandScale {
    /// Bands for the distinct `instants` (first-seen order) over `[left, right]`.
    pub fn new(instants: impl IntoIterator<Item = NormalizedInstant>, range: (f64, f64)) -> Self {
        let mut domain = Vec::new();
        let mut index = HashMap::new();
        for t in instants {
            index.entry(t).or_insert_with(|| {
                domain.push(t);
                domain.len() - 1
            });
        }
        let (left, right) = range;
        Self { domain, index, left, right: right.max(left) }
    }

    pub fn domain(&self) -> &[NormalizedInstant] { &self.domain }

    pub fn len(&self) -> usize { self.domain.len() }

    pub fn is_empty(&self) -> bool { self.domain.is_empty() }

    pub fn range(&self) -> (f64, f64) { (self.left, self.right) }

    /// Distance between the starts (and centers) of neighbouring bands.
    pub fn step(&self) -> f64 {
        if self.domain.is_empty() {
            return 0.0;
        }
        (self.right - self.left) / self.domain.len() as f64
    }

    pub fn band_width(&self) -> f64 { self.step() * (1.0 - BAND_PADDING) }

    /// Left edge of the band at domain position `index`.
    pub fn band_start_at(&self, index: usize) -> f64 {
        let step = self.step();
        self.left + step * index as f64 + step * BAND_PADDING * 0.5
    }

    pub fn center_at(&self, index: usize) -> f64 {
        self.band_start_at(index) + self.band_width() * 0.5
    }

    pub fn position(&self, instant: &NormalizedInstant) -> Option<usize> {
        self.index.get(instant).copied()
    }

    /// Left edge of the band for `instant`, `None` when it is not in the domain.
    pub fn band_start(&self, instant: &NormalizedInstant) -> Option<f64> {
        self.position(instant).map(|i| self.band_start_at(i))
    }

    pub fn center(&self, instant: &NormalizedInstant) -> Option<f64> {
        self.position(instant).map(|i| self.center_at(i))
    }
}

/// Band scale over `[left, right]` for the given instants.
pub fn build_band_scale(instants: &[NormalizedInstant], range: (f64, f64)) -> BandScale {
    BandScale::new(instants.iter().copied(), range)
}
