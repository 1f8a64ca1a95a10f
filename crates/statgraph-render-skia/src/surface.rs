// File: crates/statgraph-render-skia/src/surface.rs
// Summary: CPU raster DrawingSurface backed by a Skia n32 premultiplied surface.

use std::path::Path;

use log::debug;
use skia_safe as skia;
use statgraph_core::{ChartError, DrawingSurface, Result, Rgba, TextAlign, TextMeasure};

use crate::text::TextShaper;

/// Stroke width of guides and line series, in pixels.
const STROKE_WIDTH: f32 = 1.0;

pub struct SkiaSurface {
    surface: skia::Surface,
    shaper: TextShaper,
    width: u32,
    height: u32,
    font_size: f32,
    fill: skia::Color,
    stroke: skia::Color,
    align: TextAlign,
    path: skia::Path,
}

fn to_skia(c: Rgba) -> skia::Color { skia::Color::from_argb(c.a, c.r, c.g, c.b) }

impl SkiaSurface {
    /// Allocate a transparent `width x height` raster surface.
    ///
    /// Matches the allocator signature of `Chart::render`, so it can be passed directly.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let too_big = || ChartError::Surface(format!("{width}x{height} exceeds the raster limits"));
        let w = i32::try_from(width).map_err(|_| too_big())?;
        let h = i32::try_from(height).map_err(|_| too_big())?;
        let mut surface = skia::surfaces::raster_n32_premul((w, h))
            .ok_or_else(|| ChartError::Surface(format!("failed to create {width}x{height} raster surface")))?;
        surface.canvas().clear(skia::Color::TRANSPARENT);
        debug!("allocated {width}x{height} raster surface");
        Ok(Self {
            surface,
            shaper: TextShaper::new(),
            width,
            height,
            font_size: 10.0,
            fill: skia::Color::BLACK,
            stroke: skia::Color::BLACK,
            align: TextAlign::Left,
            path: skia::Path::new(),
        })
    }

    /// Encode the current pixels as PNG.
    pub fn png_bytes(&mut self) -> Result<Vec<u8>> {
        let image = self.surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| ChartError::Surface("encode PNG failed".into()))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Encode as PNG and write to `path`, creating parent directories.
    pub fn write_png(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.png_bytes()?;
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path.as_ref(), bytes)?;
        Ok(())
    }

    /// Unpremultiplied RGBA8 pixels, row-major: `(pixels, width, height, stride)`.
    pub fn to_rgba8(&mut self) -> Result<(Vec<u8>, u32, u32, usize)> {
        let info = skia::ImageInfo::new(
            (self.width as i32, self.height as i32),
            skia::ColorType::RGBA8888,
            skia::AlphaType::Unpremul,
            None,
        );
        let stride = self.width as usize * 4;
        let mut pixels = vec![0u8; stride * self.height as usize];
        if !self.surface.read_pixels(&info, &mut pixels, stride, (0, 0)) {
            return Err(ChartError::Surface("read pixels failed".into()));
        }
        Ok((pixels, self.width, self.height, stride))
    }

    fn paint(color: skia::Color, style: skia::paint::Style) -> skia::Paint {
        let mut paint = skia::Paint::default();
        paint.set_anti_alias(true);
        paint.set_color(color);
        paint.set_style(style);
        paint.set_stroke_width(STROKE_WIDTH);
        paint
    }
}

impl TextMeasure for SkiaSurface {
    fn measure_text(&self, text: &str) -> f64 {
        self.shaper.measure_width(text, self.font_size) as f64
    }
}

impl DrawingSurface for SkiaSurface {
    fn width(&self) -> u32 { self.width }
    fn height(&self) -> u32 { self.height }

    fn clear(&mut self) {
        self.surface.canvas().clear(skia::Color::TRANSPARENT);
    }

    fn set_font_size(&mut self, px: f64) { self.font_size = px as f32; }
    fn set_fill_color(&mut self, color: Rgba) { self.fill = to_skia(color); }
    fn set_stroke_color(&mut self, color: Rgba) { self.stroke = to_skia(color); }
    fn set_text_align(&mut self, align: TextAlign) { self.align = align; }

    fn begin_path(&mut self) { self.path = skia::Path::new(); }

    fn move_to(&mut self, x: f64, y: f64) {
        self.path.move_to((x as f32, y as f32));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.path.line_to((x as f32, y as f32));
    }

    fn stroke(&mut self) {
        let paint = Self::paint(self.stroke, skia::paint::Style::Stroke);
        self.surface.canvas().draw_path(&self.path, &paint);
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let paint = Self::paint(self.fill, skia::paint::Style::Fill);
        let rect = skia::Rect::from_xywh(x as f32, y as f32, w as f32, h as f32);
        self.surface.canvas().draw_rect(rect, &paint);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        let canvas = self.surface.canvas();
        self.shaper
            .draw_aligned(canvas, text, (x as f32, y as f32), self.align, self.font_size, self.fill);
    }
}
