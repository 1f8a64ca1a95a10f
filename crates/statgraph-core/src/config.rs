// File: crates/statgraph-core/src/config.rs
// Summary: Display configuration with documented defaults, JSON overlay and one-shot validation.

use serde::Deserialize;

use crate::color::Rgba;
use crate::error::{ChartError, Result};

/// Default surface width in pixels.
pub const WIDTH: u32 = 400;
/// Default surface height in pixels.
pub const HEIGHT: u32 = 151;
/// Default series color.
pub const COLOR: &str = "#e7231d";
/// Default label font size in pixels.
pub const FONT_SIZE: u32 = 11;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphType {
    #[default]
    Bar,
    Line,
}

/// How a chart is drawn. Fields missing from a JSON document take the defaults,
/// so a partial object overlays `400x151`, red, both axes, 11px, bars.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DisplayConfig {
    pub width: u32,
    pub height: u32,
    pub color: String,
    pub add_x_axis: bool,
    pub add_y_axis: bool,
    pub font_size: u32,
    pub graph_type: GraphType,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            color: COLOR.to_string(),
            add_x_axis: true,
            add_y_axis: true,
            font_size: FONT_SIZE,
            graph_type: GraphType::Bar,
        }
    }
}

impl DisplayConfig {
    /// Overlay the fields present in `json` onto the defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reject configs that cannot produce a surface. Runs before any allocation.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ChartError::InvalidDisplayConfig(format!(
                "surface must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if self.font_size == 0 {
            return Err(ChartError::InvalidDisplayConfig("font size must be positive".into()));
        }
        if self.add_x_axis && f64::from(self.height) <= f64::from(self.font_size) * 1.5 {
            return Err(ChartError::InvalidDisplayConfig(format!(
                "height {} leaves no plot area under a {}px x-axis",
                self.height, self.font_size
            )));
        }
        self.series_color().map(|_| ())
    }

    pub fn series_color(&self) -> Result<Rgba> {
        Rgba::parse(&self.color)
            .ok_or_else(|| ChartError::InvalidDisplayConfig(format!("unknown color {:?}", self.color)))
    }

    pub fn font_px(&self) -> f64 { f64::from(self.font_size) }
}
