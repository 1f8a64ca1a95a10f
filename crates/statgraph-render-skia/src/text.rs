// File: crates/statgraph-render-skia/src/text.rs
// Summary: Text shaper using Skia textlayout; measures and paints single-line labels.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextStyle};
use statgraph_core::TextAlign;

/// Families tried in order for axis labels.
const LABEL_FAMILIES: [&str; 6] = ["Helvetica", "Arial", "Segoe UI", "Roboto", "DejaVu Sans", "sans-serif"];

pub struct TextShaper {
    fonts: FontCollection,
}

impl Default for TextShaper {
    fn default() -> Self { Self::new() }
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        // Use system manager fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(size: f32, color: skia::Color) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        ts.set_font_families(&LABEL_FAMILIES);
        ts
    }

    /// Lay out `text` on a single unbounded line.
    pub fn layout(&self, text: &str, size: f32, color: skia::Color) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(skia::textlayout::TextAlign::Left);
        pstyle.set_max_lines(1);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        builder.push_style(&Self::make_style(size, color));
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(f32::MAX);
        paragraph
    }

    pub fn measure_width(&self, text: &str, size: f32) -> f32 {
        self.layout(text, size, skia::Color::TRANSPARENT).max_intrinsic_width()
    }

    /// Paint `text` anchored horizontally at `x` per `align`, vertically centered on `y`.
    pub fn draw_aligned(
        &self,
        canvas: &skia::Canvas,
        text: &str,
        (x, y): (f32, f32),
        align: TextAlign,
        size: f32,
        color: skia::Color,
    ) {
        let p = self.layout(text, size, color);
        let width = p.max_intrinsic_width();
        let left = match align {
            TextAlign::Left => x,
            TextAlign::Center => x - width / 2.0,
            TextAlign::Right => x - width,
        };
        p.paint(canvas, (left, y - p.height() / 2.0));
    }
}
