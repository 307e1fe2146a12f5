//! SVG to PNG conversion.
//!
//! [`Rasterize`] is the seam the composer flattens through; [`ResvgRasterizer`]
//! is the production implementation backed by resvg.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use log::{debug, warn};
use thiserror::Error;

pub const WHITE: Rgba<u8> = Rgba([0xff, 0xff, 0xff, 0xff]);

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to parse SVG for rasterization: {0}")]
    Parse(#[from] usvg::Error),
    #[error("cannot allocate a {width}x{height} pixmap")]
    Pixmap { width: u32, height: u32 },
    #[error("failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),
}

pub trait Rasterize {
    /// Render SVG markup to PNG bytes at `scale` × its natural pixel size
    /// (96 px per inch), over an opaque `background`.
    fn rasterize(
        &self,
        svg: &str,
        scale: f32,
        background: Rgba<u8>,
    ) -> Result<Vec<u8>, RenderError>;
}

pub struct ResvgRasterizer {
    options: usvg::Options<'static>,
}

impl ResvgRasterizer {
    /// Loads the system font database. Without fonts, text renders as nothing.
    pub fn new() -> Self {
        let mut options = usvg::Options::default();
        options.fontdb_mut().load_system_fonts();
        let faces = options.fontdb.len();
        if faces == 0 {
            warn!("no system fonts found; printed labels will be missing from raster output");
        } else {
            debug!("loaded {} font faces", faces);
        }
        Self { options }
    }

    /// Rasterizer with an empty font database.
    pub fn without_fonts() -> Self {
        Self {
            options: usvg::Options::default(),
        }
    }

    pub fn has_fonts(&self) -> bool {
        !self.options.fontdb.is_empty()
    }
}

impl Default for ResvgRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterize for ResvgRasterizer {
    fn rasterize(
        &self,
        svg: &str,
        scale: f32,
        background: Rgba<u8>,
    ) -> Result<Vec<u8>, RenderError> {
        let tree = usvg::Tree::from_str(svg, &self.options)?;
        let size = tree.size();
        let width = (size.width() * scale).ceil() as u32;
        let height = (size.height() * scale).ceil() as u32;
        let mut pixmap = tiny_skia::Pixmap::new(width, height)
            .ok_or(RenderError::Pixmap { width, height })?;
        let Rgba([r, g, b, a]) = background;
        pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));
        resvg::render(
            &tree,
            tiny_skia::Transform::from_scale(scale, scale),
            &mut pixmap.as_mut(),
        );
        debug!("rasterized {}x{} px at {}x", width, height, scale);
        encode_png(&pixmap)
    }
}

fn encode_png(pixmap: &tiny_skia::Pixmap) -> Result<Vec<u8>, RenderError> {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(img).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SQUARE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="1in" height="0.5in" viewBox="0 0 1 0.5">
<rect x="0" y="0" width="0.5" height="0.5" fill="black"/>
</svg>"#;

    #[test]
    fn renders_png_at_scaled_size() {
        let png = ResvgRasterizer::without_fonts()
            .rasterize(SQUARE, 2.0, WHITE)
            .unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
        let img = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (192, 96));
        assert_eq!(*img.get_pixel(10, 10), Rgba([0, 0, 0, 255]));
        assert_eq!(*img.get_pixel(180, 10), WHITE);
    }

    #[test]
    fn output_is_deterministic() {
        let r = ResvgRasterizer::without_fonts();
        assert_eq!(
            r.rasterize(SQUARE, 1.0, WHITE).unwrap(),
            r.rasterize(SQUARE, 1.0, WHITE).unwrap()
        );
    }

    #[test]
    fn malformed_svg_is_an_error() {
        let err = ResvgRasterizer::without_fonts()
            .rasterize("<svg", 1.0, WHITE)
            .unwrap_err();
        assert!(matches!(err, RenderError::Parse(_)));
    }
}
