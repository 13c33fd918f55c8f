//! PNG, JPG and PDF renditions of the SVG drawing.
//!
//! The SVG document is parsed once with `usvg`; raster formats are painted
//! onto a white `tiny-skia` pixmap by `resvg`, and PDF pages are produced
//! by `svg2pdf` from the same tree.

use std::{
    fmt,
    sync::{Arc, OnceLock},
};

use image::{DynamicImage, RgbaImage, codecs::jpeg::JpegEncoder};
use resvg::{
    tiny_skia::{Color, Pixmap, Transform},
    usvg::{self, fontdb},
};
use tracing::debug;

use crate::{error::ExportError, format::OutputFormat};

const JPEG_QUALITY: u8 = 90;

static FONTS: OnceLock<Arc<fontdb::Database>> = OnceLock::new();

fn fonts() -> Arc<fontdb::Database> {
    Arc::clone(FONTS.get_or_init(|| {
        let mut database = fontdb::Database::new();
        database.load_system_fonts();
        debug!(faces = database.len(), "system fonts loaded");
        Arc::new(database)
    }))
}

fn render_error(format: OutputFormat, message: impl fmt::Display) -> ExportError {
    ExportError::Render {
        format,
        message: message.to_string(),
    }
}

fn parse(svg: &str, format: OutputFormat) -> Result<usvg::Tree, ExportError> {
    let mut options = usvg::Options::default();
    options.fontdb = fonts();
    usvg::Tree::from_str(svg, &options).map_err(|err| render_error(format, err))
}

fn paint(svg: &str, format: OutputFormat) -> Result<Pixmap, ExportError> {
    let tree = parse(svg, format)?;
    let size = tree.size().to_int_size();
    let mut pixmap = Pixmap::new(size.width(), size.height())
        .ok_or_else(|| render_error(format, "drawing has no area"))?;
    pixmap.fill(Color::WHITE);
    resvg::render(&tree, Transform::default(), &mut pixmap.as_mut());
    debug!(width = size.width(), height = size.height(), "drawing rasterised");
    Ok(pixmap)
}

/// Rasterises an SVG document to PNG bytes.
///
/// # Errors
/// Returns [`ExportError::Render`] when the document cannot be parsed or
/// encoded.
pub fn render_png(svg: &str) -> Result<Vec<u8>, ExportError> {
    paint(svg, OutputFormat::Png)?
        .encode_png()
        .map_err(|err| render_error(OutputFormat::Png, err))
}

/// Rasterises an SVG document to baseline JPEG bytes on a white background.
///
/// # Errors
/// Returns [`ExportError::Render`] when the document cannot be parsed or
/// encoded.
pub fn render_jpg(svg: &str) -> Result<Vec<u8>, ExportError> {
    let pixmap = paint(svg, OutputFormat::Jpg)?;
    // The background is opaque, so premultiplied and straight RGBA agree.
    let rgba = RgbaImage::from_raw(pixmap.width(), pixmap.height(), pixmap.data().to_vec())
        .ok_or_else(|| render_error(OutputFormat::Jpg, "pixel buffer size mismatch"))?;
    let rgb = DynamicImage::ImageRgba8(rgba).into_rgb8();

    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY)
        .encode_image(&rgb)
        .map_err(|err| render_error(OutputFormat::Jpg, err))?;
    Ok(bytes)
}

/// Converts an SVG document to a single-page PDF.
///
/// # Errors
/// Returns [`ExportError::Render`] when the document cannot be parsed or
/// converted.
pub fn render_pdf(svg: &str) -> Result<Vec<u8>, ExportError> {
    let tree = parse(svg, OutputFormat::Pdf)?;
    svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(|err| render_error(OutputFormat::Pdf, err))
}
