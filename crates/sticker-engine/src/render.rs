//! Sticker composition.
//!
//! Layout:
//! ```text
//! ┌──────────────────────────┐
//! │       PROPERTY OF        │  header band
//! │     TRANS CONTINENT      │
//! ├══════════════════════════┤  divider (straddles the boundary)
//! │                          │
//! │        ┌────────┐        │
//! │        │   QR   │        │  body
//! │        └────────┘        │
//! │     100/200/300/400      │
//! └──────────────────────────┘
//! ```
//!
//! Each call paints onto its own fresh canvas: header fill, divider, body
//! fill, header text, QR blit, code text, in that order.

use ab_glyph::FontRef;
use image::{DynamicImage, RgbaImage};
use tracing::debug;

use crate::code_number::format_code_number;
use crate::compose;
use crate::export;
use crate::layout::{LayoutSpec, Palette, QrScaling, StickerGeometry};
use crate::text::{self, Baseline};
use crate::{Result, StickerError};

/// A finished sticker image, exactly `width × height` pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSticker {
    image: RgbaImage,
}

impl RenderedSticker {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Encode as PNG bytes.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        export::encode_png(&DynamicImage::ImageRgba8(self.image.clone()))
    }
}

/// Compose a sticker from a square QR bitmap and a raw code number.
///
/// The code number is grouped with the layout's [`CodeFormat`] before it is
/// drawn. With no QR bitmap nothing is composed and
/// [`StickerError::MissingQrBitmap`] is returned.
///
/// [`CodeFormat`]: crate::code_number::CodeFormat
pub fn compose_sticker(
    qr: Option<&DynamicImage>,
    code_number: &str,
    layout: &LayoutSpec,
    font: &FontRef<'_>,
) -> Result<RenderedSticker> {
    let qr = check_qr(qr)?;
    let geometry = StickerGeometry::compute(layout)?;
    debug!(?geometry, "Composing sticker");

    let mut canvas = RgbaImage::new(geometry.width, geometry.height);
    paint_bands(&mut canvas, &geometry, &layout.palette);
    draw_header(&mut canvas, &geometry, layout, font);
    place_qr(&mut canvas, qr, &geometry, layout.qr_scaling);
    draw_code(&mut canvas, &geometry, layout, code_number, font);

    Ok(RenderedSticker { image: canvas })
}

/// The QR bitmap must be present, non-empty and square.
fn check_qr(qr: Option<&DynamicImage>) -> Result<&DynamicImage> {
    let qr = qr.ok_or(StickerError::MissingQrBitmap)?;
    let (width, height) = (qr.width(), qr.height());
    if width == 0 || height == 0 {
        return Err(StickerError::EmptyQr);
    }
    if width != height {
        return Err(StickerError::NonSquareQr { width, height });
    }
    Ok(qr)
}

/// Header band, divider, then the body from just below the divider.
pub(crate) fn paint_bands(canvas: &mut RgbaImage, g: &StickerGeometry, palette: &Palette) {
    compose::fill_band(canvas, 0, g.header_height, palette.header);
    compose::fill_band(canvas, g.divider_y, g.divider_thickness, palette.divider);
    let body_rows = (g.height as i32 - g.body_top).max(0) as u32;
    compose::fill_band(canvas, g.body_top, body_rows, palette.body);
}

fn draw_header(canvas: &mut RgbaImage, g: &StickerGeometry, layout: &LayoutSpec, font: &FontRef<'_>) {
    let scale = text::em_scale(font, g.header_font_px as f32);
    let (line1, line2) = layout.header_lines();
    let color = layout.palette.header_text;
    text::draw_centered_text(canvas, font, scale, g.line1_center_y, Baseline::Middle, line1, color);
    text::draw_centered_text(canvas, font, scale, g.line2_center_y, Baseline::Middle, line2, color);
}

pub(crate) fn place_qr(
    canvas: &mut RgbaImage,
    qr: &DynamicImage,
    g: &StickerGeometry,
    scaling: QrScaling,
) {
    let scaled = compose::scale_square(qr, g.qr_size, scaling.filter());
    compose::overlay(canvas, &scaled, g.qr_x, g.qr_y);
}

fn draw_code(
    canvas: &mut RgbaImage,
    g: &StickerGeometry,
    layout: &LayoutSpec,
    code_number: &str,
    font: &FontRef<'_>,
) {
    let formatted = format_code_number(code_number, &layout.code_format);
    let scale = text::em_scale(font, g.code_font_px as f32);
    text::draw_centered_text(
        canvas,
        font,
        scale,
        g.code_baseline_y,
        Baseline::Alphabetic,
        &formatted,
        layout.palette.code_text,
    );
}
