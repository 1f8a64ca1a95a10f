// File: crates/statgraph-core/src/surface.rs
// Summary: Drawing-surface capability (canvas-like primitives + text measurement) and a recording surface.

use crate::color::Rgba;

/// Default glyph advance of [`RecordingSurface`], as a fraction of the font size.
pub const DEFAULT_CHAR_ADVANCE_EM: f64 = 0.6;

/// Width of a single line of text in pixels, bound to the measurer's active font.
pub trait TextMeasure {
    fn measure_text(&self, text: &str) -> f64;
}

impl<F> TextMeasure for F
where
    F: Fn(&str) -> f64,
{
    fn measure_text(&self, text: &str) -> f64 { self(text) }
}

/// Horizontal anchoring of [`DrawingSurface::fill_text`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// A fixed-size pixel target, origin top-left, Y growing downward.
///
/// The API mirrors a 2-D canvas context: paint state is set first, then primitives
/// use it. Text is always vertically centered on the `y` passed to `fill_text`.
pub trait DrawingSurface: TextMeasure {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Reset every pixel to transparent.
    fn clear(&mut self);

    fn set_font_size(&mut self, px: f64);
    fn set_fill_color(&mut self, color: Rgba);
    fn set_stroke_color(&mut self, color: Rgba);
    fn set_text_align(&mut self, align: TextAlign);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    /// Stroke the current path with the stroke color.
    fn stroke(&mut self);

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
}

/// One call made against a [`RecordingSurface`], with the paint state it used.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Clear,
    FontSize(f64),
    Stroke { color: Rgba, points: Vec<(f64, f64)> },
    FillRect { x: f64, y: f64, w: f64, h: f64, color: Rgba },
    FillText { text: String, x: f64, y: f64, align: TextAlign, color: Rgba },
}

/// Headless surface that records draw calls instead of rasterizing them.
///
/// Text is measured with a fixed per-character advance, which makes layout
/// deterministic across platforms.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    font_size: f64,
    char_advance_em: f64,
    fill: Rgba,
    stroke: Rgba,
    align: TextAlign,
    path: Vec<(f64, f64)>,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            font_size: 10.0,
            char_advance_em: DEFAULT_CHAR_ADVANCE_EM,
            fill: Rgba::BLACK,
            stroke: Rgba::BLACK,
            align: TextAlign::Left,
            path: Vec::new(),
            ops: Vec::new(),
        }
    }

    pub fn with_char_advance(mut self, em: f64) -> Self {
        self.char_advance_em = em;
        self
    }

    pub fn ops(&self) -> &[DrawOp] { &self.ops }

    pub fn fill_rects(&self) -> Vec<(f64, f64, f64, f64)> {
        self.ops
            .iter()
            .filter_map(|op| match *op {
                DrawOp::FillRect { x, y, w, h, .. } => Some((x, y, w, h)),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Stroked paths, in paint order.
    pub fn strokes(&self) -> Vec<&[(f64, f64)]> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Stroke { points, .. } => Some(points.as_slice()),
                _ => None,
            })
            .collect()
    }
}

impl TextMeasure for RecordingSurface {
    fn measure_text(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.font_size * self.char_advance_em
    }
}

impl DrawingSurface for RecordingSurface {
    fn width(&self) -> u32 { self.width }
    fn height(&self) -> u32 { self.height }

    fn clear(&mut self) {
        self.ops.clear();
        self.ops.push(DrawOp::Clear);
    }

    fn set_font_size(&mut self, px: f64) {
        self.font_size = px;
        self.ops.push(DrawOp::FontSize(px));
    }

    fn set_fill_color(&mut self, color: Rgba) { self.fill = color; }
    fn set_stroke_color(&mut self, color: Rgba) { self.stroke = color; }
    fn set_text_align(&mut self, align: TextAlign) { self.align = align; }

    fn begin_path(&mut self) { self.path.clear(); }
    fn move_to(&mut self, x: f64, y: f64) { self.path.push((x, y)); }
    fn line_to(&mut self, x: f64, y: f64) { self.path.push((x, y)); }

    fn stroke(&mut self) {
        self.ops.push(DrawOp::Stroke { color: self.stroke, points: self.path.clone() });
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ops.push(DrawOp::FillRect { x, y, w, h, color: self.fill });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.ops.push(DrawOp::FillText {
            text: text.to_string(),
            x,
            y,
            align: self.align,
            color: self.fill,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_measure_text() {
        let m = |s: &str| s.len() as f64 * 2.0;
        assert_eq!(m.measure_text("abc"), 6.0);
    }

    #[test]
    fn recording_measures_with_active_font() {
        let mut s = RecordingSurface::new(10, 10);
        s.set_font_size(10.0);
        assert!((s.measure_text("June 2022") - 54.0).abs() < 1e-9);
        s.set_font_size(20.0);
        assert!((s.measure_text("ab") - 24.0).abs() < 1e-9);
    }

    #[test]
    fn char_advance_scales_measurement() {
        let mut s = RecordingSurface::new(10, 10).with_char_advance(1.0);
        s.set_font_size(8.0);
        assert_eq!(s.measure_text("abcd"), 32.0);
    }

    #[test]
    fn recording_captures_paint_state() {
        let red = Rgba::opaque(255, 0, 0);
        let mut s = RecordingSurface::new(10, 10);
        s.set_stroke_color(red);
        s.begin_path();
        s.move_to(0.0, 0.0);
        s.line_to(5.0, 5.0);
        s.stroke();
        s.set_fill_color(red);
        s.set_text_align(TextAlign::Right);
        s.fill_text("x", 1.0, 2.0);
        assert_eq!(s.strokes(), vec![&[(0.0, 0.0), (5.0, 5.0)][..]]);
        assert_eq!(
            s.ops().last(),
            Some(&DrawOp::FillText { text: "x".into(), x: 1.0, y: 2.0, align: TextAlign::Right, color: red })
        );
    }
}
