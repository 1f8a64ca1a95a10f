// File: crates/statgraph-render-skia/src/lib.rs
// Summary: Skia renderer crate; hosts the CPU raster surface and paragraph-based text shaping.

pub mod surface;
pub mod text;

pub use surface::SkiaSurface;
pub use text::TextShaper;
