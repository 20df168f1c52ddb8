//! Raster primitives used by the sticker renderer: solid bands, scaled
//! blits and alpha overlay.

use image::imageops::FilterType;
use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use tracing::debug;

/// Fill a full-width horizontal band. Rows outside the image are clipped.
pub fn fill_band(img: &mut RgbaImage, y: i32, height: u32, color: Rgba<u8>) {
    if height == 0 || img.width() == 0 {
        return;
    }
    draw_filled_rect_mut(img, Rect::at(0, y).of_size(img.width(), height), color);
}

/// Scale a square bitmap to `size × size`. The source is left untouched.
pub fn scale_square(src: &DynamicImage, size: u32, filter: FilterType) -> DynamicImage {
    if src.width() == size && src.height() == size {
        debug!(size, "QR bitmap already at target size, skipping resize");
        return src.clone();
    }
    debug!(
        orig = src.width(),
        target = size,
        ?filter,
        "Scaling QR bitmap"
    );
    src.resize_exact(size, size, filter)
}

/// Overlay `top` image onto `base` at the given position.
///
/// The `top` image is alpha-composited over the base.
pub fn overlay(base: &mut RgbaImage, top: &DynamicImage, x: u32, y: u32) {
    let top_rgba = top.to_rgba8();
    for (dx, dy, pixel) in top_rgba.enumerate_pixels() {
        let target_x = x + dx;
        let target_y = y + dy;
        if target_x < base.width() && target_y < base.height() {
            let alpha = pixel[3] as f32 / 255.0;
            if alpha > 0.99 {
                base.put_pixel(target_x, target_y, *pixel);
            } else if alpha > 0.01 {
                let bg = base.get_pixel(target_x, target_y);
                let blended = blend_pixel(bg, pixel, alpha);
                base.put_pixel(target_x, target_y, blended);
            }
        }
    }
}

fn blend_pixel(bg: &Rgba<u8>, fg: &Rgba<u8>, alpha: f32) -> Rgba<u8> {
    let inv = 1.0 - alpha;
    Rgba([
        (fg[0] as f32 * alpha + bg[0] as f32 * inv) as u8,
        (fg[1] as f32 * alpha + bg[1] as f32 * inv) as u8,
        (fg[2] as f32 * alpha + bg[2] as f32 * inv) as u8,
        255,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    #[test]
    fn fill_band_covers_exact_rows() {
        let mut img = RgbaImage::new(10, 10);
        fill_band(&mut img, 3, 2, RED);
        assert_eq!(img.get_pixel(0, 2), &Rgba([0, 0, 0, 0]));
        assert_eq!(img.get_pixel(0, 3), &RED);
        assert_eq!(img.get_pixel(9, 4), &RED);
        assert_eq!(img.get_pixel(0, 5), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn fill_band_clips_negative_start() {
        let mut img = RgbaImage::new(4, 4);
        fill_band(&mut img, -2, 3, RED);
        assert_eq!(img.get_pixel(0, 0), &RED);
        assert_eq!(img.get_pixel(0, 1), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn scale_square_hits_target_for_any_source() {
        for side in [21, 100, 390, 1000] {
            let src = DynamicImage::ImageLuma8(GrayImage::from_pixel(side, side, Luma([0])));
            let out = scale_square(&src, 390, FilterType::Nearest);
            assert_eq!((out.width(), out.height()), (390, 390));
        }
    }

    #[test]
    fn scale_square_does_not_touch_source() {
        let src = DynamicImage::ImageLuma8(GrayImage::from_pixel(25, 25, Luma([7])));
        let before = src.clone();
        let _ = scale_square(&src, 50, FilterType::Triangle);
        assert_eq!(src, before);
    }

    #[test]
    fn overlay_opaque_replaces_pixels() {
        let mut base = RgbaImage::from_pixel(4, 4, RED);
        let top = DynamicImage::ImageLuma8(GrayImage::from_pixel(2, 2, Luma([0])));
        overlay(&mut base, &top, 1, 1);
        assert_eq!(base.get_pixel(1, 1), &Rgba([0, 0, 0, 255]));
        assert_eq!(base.get_pixel(0, 0), &RED);
    }

    #[test]
    fn overlay_does_not_panic_on_out_of_bounds() {
        let mut base = RgbaImage::new(100, 100);
        let top = DynamicImage::ImageRgba8(RgbaImage::new(50, 50));
        overlay(&mut base, &top, 80, 80); // partially out of bounds
    }
}
