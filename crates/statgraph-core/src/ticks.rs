// File: crates/statgraph-core/src/ticks.rs
// Summary: Greedy left-to-right selection of X-axis date labels that do not collide.

use log::{debug, trace};

use crate::scale::BandScale;
use crate::surface::TextMeasure;
use crate::time::NormalizedInstant;

/// Minimum gap kept between neighbouring labels, in pixels.
pub const LABEL_PADDING: f64 = 3.0;

/// An X-axis tick that gets both a label and a guide mark.
#[derive(Clone, Debug, PartialEq)]
pub struct LabeledTick {
    /// Position of the tick in the band domain.
    pub index: usize,
    pub instant: NormalizedInstant,
    pub label: String,
    pub center_x: f64,
    pub half_width: f64,
}

impl LabeledTick {
    /// Horizontal pixel span covered by the label.
    pub fn span(&self) -> (f64, f64) {
        (self.center_x - self.half_width, self.center_x + self.half_width)
    }
}

/// Walk the band domain left to right and keep every label that fits in the
/// room left since the previously kept one. Skipped ticks hand their step over
/// to the next candidate.
pub fn select_labeled_ticks<M>(band: &BandScale, measure: &M) -> Vec<LabeledTick>
where
    M: TextMeasure + ?Sized,
{
    let step = band.step();
    let mut available = band.band_width() / 2.0 - LABEL_PADDING;
    let mut kept = Vec::new();

    for (index, instant) in band.domain().iter().enumerate() {
        let label = instant.month_year_label();
        let half_width = measure.measure_text(&label) / 2.0;
        if half_width < available {
            trace!("x tick {index} `{label}` kept (half {half_width:.1} < {available:.1})");
            available = step - half_width - LABEL_PADDING;
            kept.push(LabeledTick {
                index,
                instant: *instant,
                label,
                center_x: band.center_at(index),
                half_width,
            });
        } else {
            trace!("x tick {index} `{label}` skipped (half {half_width:.1} >= {available:.1})");
            available += step;
        }
    }

    debug!("x axis: {} of {} ticks labeled", kept.len(), band.len());
    kept
}
