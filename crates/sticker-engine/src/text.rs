//! Text measurement and centred drawing for sticker labels.

use ab_glyph::{Font, FontRef, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;

/// Where the `y` coordinate passed to [`draw_centered_text`] sits relative
/// to the glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Baseline {
    /// `y` is the vertical middle of the line box.
    Middle,
    /// `y` is the alphabetic baseline.
    Alphabetic,
}

/// Convert an em size in pixels (CSS `font-size`) to an ab_glyph scale.
///
/// `PxScale` measures ascent-to-descent height, which is usually taller
/// than the em square.
pub fn em_scale(font: &FontRef<'_>, em_px: f32) -> PxScale {
    match font.units_per_em() {
        Some(units) if units > 0.0 => PxScale::from(em_px * font.height_unscaled() / units),
        _ => PxScale::from(em_px),
    }
}

/// Measure the pixel width of a string at the given font and scale.
pub fn measure_text_width(font: &FontRef<'_>, scale: PxScale, text: &str) -> u32 {
    let scaled = font.as_scaled(scale);
    let mut width = 0.0f32;
    let mut prev_glyph: Option<ab_glyph::GlyphId> = None;

    for ch in text.chars() {
        let glyph_id = scaled.glyph_id(ch);
        if let Some(prev) = prev_glyph {
            width += scaled.kern(prev, glyph_id);
        }
        width += scaled.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }

    width.ceil() as u32
}

/// Top edge of the line box whose anchor lands on `y`.
///
/// `draw_text_mut` places the baseline one ascent below the `y` it is given.
pub fn line_top(font: &FontRef<'_>, scale: PxScale, y: i32, baseline: Baseline) -> i32 {
    let scaled = font.as_scaled(scale);
    match baseline {
        Baseline::Alphabetic => y - scaled.ascent().round() as i32,
        Baseline::Middle => y - ((scaled.ascent() - scaled.descent()) / 2.0).round() as i32,
    }
}

/// Draw text horizontally centred on the image, anchored vertically at `y`.
///
/// Text wider than the image stays centred and is clipped on both sides.
pub fn draw_centered_text(
    img: &mut RgbaImage,
    font: &FontRef<'_>,
    scale: PxScale,
    y: i32,
    baseline: Baseline,
    text: &str,
    color: Rgba<u8>,
) {
    if text.is_empty() {
        return;
    }
    let text_width = measure_text_width(font, scale, text) as i32;
    let x = (img.width() as i32 - text_width) / 2;
    let top = line_top(font, scale, y, baseline);
    draw_text_mut(img, color, x, top, scale, font, text);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font;

    fn with_font(f: impl FnOnce(&FontRef<'_>)) {
        // Rendering tests need a real font.
        let Ok(data) = font::load_font_data(None) else {
            eprintln!("skipping: no bold system font installed");
            return;
        };
        let font = font::parse_font(&data).unwrap();
        f(&font);
    }

    #[test]
    fn empty_text_has_zero_width() {
        with_font(|font| {
            assert_eq!(measure_text_width(font, PxScale::from(32.0), ""), 0);
        });
    }

    #[test]
    fn longer_text_is_wider() {
        with_font(|font| {
            let scale = PxScale::from(32.0);
            let short = measure_text_width(font, scale, "123");
            let long = measure_text_width(font, scale, "123/456/789/012");
            assert!(long > short);
        });
    }

    #[test]
    fn em_scale_is_at_least_em_size() {
        with_font(|font| {
            let scale = em_scale(font, 42.0);
            assert!(scale.y >= 42.0);
        });
    }

    #[test]
    fn middle_anchor_sits_above_alphabetic() {
        with_font(|font| {
            let scale = PxScale::from(40.0);
            let middle = line_top(font, scale, 100, Baseline::Middle);
            let alpha = line_top(font, scale, 100, Baseline::Alphabetic);
            assert!(middle > alpha);
            assert!(middle < 100);
        });
    }

    #[test]
    fn centered_text_draws_near_middle() {
        with_font(|font| {
            let white = Rgba([255, 255, 255, 255]);
            let mut img = RgbaImage::from_pixel(200, 80, Rgba([0, 0, 0, 255]));
            draw_centered_text(
                &mut img,
                font,
                PxScale::from(40.0),
                40,
                Baseline::Middle,
                "IIII",
                white,
            );
            let lit: Vec<u32> = img
                .enumerate_pixels()
                .filter(|(_, _, p)| p[0] > 128)
                .map(|(x, _, _)| x)
                .collect();
            assert!(!lit.is_empty());
            let min = *lit.iter().min().unwrap();
            let max = *lit.iter().max().unwrap();
            assert!(min > 20 && max < 180, "text spans {min}..{max}");
        });
    }

    #[test]
    fn empty_text_draws_nothing() {
        with_font(|font| {
            let mut img = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255]));
            let before = img.clone();
            draw_centered_text(
                &mut img,
                font,
                PxScale::from(12.0),
                5,
                Baseline::Alphabetic,
                "",
                Rgba([255, 255, 255, 255]),
            );
            assert_eq!(img, before);
        });
    }
}
