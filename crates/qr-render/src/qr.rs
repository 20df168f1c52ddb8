//! QR code generation.

use std::str::FromStr;

use image::{DynamicImage, GrayImage, Luma};
use qrcode::QrCode;
use serde::Deserialize;
use tracing::debug;

use crate::{QrError, Result};

/// Error-correction level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum EcLevel {
    L,
    #[default]
    M,
    Q,
    H,
}

impl From<EcLevel> for qrcode::EcLevel {
    fn from(level: EcLevel) -> Self {
        match level {
            EcLevel::L => Self::L,
            EcLevel::M => Self::M,
            EcLevel::Q => Self::Q,
            EcLevel::H => Self::H,
        }
    }
}

impl FromStr for EcLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" => Ok(Self::L),
            "M" => Ok(Self::M),
            "Q" => Ok(Self::Q),
            "H" => Ok(Self::H),
            other => Err(format!("unknown error-correction level '{other}'")),
        }
    }
}

/// QR rendering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct QrOptions {
    /// Desired bitmap width. The actual width is the largest whole multiple
    /// of the module count that fits, and never below one pixel per module.
    pub target_width: u32,
    pub ec_level: EcLevel,
    /// Light border width in modules.
    pub quiet_zone: u32,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            target_width: 256,
            ec_level: EcLevel::M,
            quiet_zone: 4,
        }
    }
}

impl QrOptions {
    /// Builder: set target width.
    pub fn with_target_width(mut self, val: u32) -> Self {
        self.target_width = val;
        self
    }

    /// Builder: set error-correction level.
    pub fn with_ec_level(mut self, val: EcLevel) -> Self {
        self.ec_level = val;
        self
    }

    /// Builder: set quiet-zone width in modules.
    pub fn with_quiet_zone(mut self, val: u32) -> Self {
        self.quiet_zone = val;
        self
    }
}

/// Generate a square QR bitmap from a payload string.
pub fn generate_qr(data: &str, options: &QrOptions) -> Result<DynamicImage> {
    if options.target_width == 0 {
        return Err(QrError::InvalidWidth(options.target_width));
    }
    let code = QrCode::with_error_correction_level(data.as_bytes(), options.ec_level.into())?;
    let modules = code.to_colors();
    let module_count = code.width() as u32;
    let total_modules = module_count + options.quiet_zone * 2;

    let scale = (options.target_width / total_modules).max(1);
    let img_size = total_modules * scale;
    let offset = options.quiet_zone * scale;

    debug!(
        module_count,
        scale,
        img_size,
        payload_len = data.len(),
        "Rendering QR bitmap"
    );

    let mut img = GrayImage::from_pixel(img_size, img_size, Luma([255u8]));

    for (i, color) in modules.iter().enumerate() {
        let x = (i as u32) % module_count;
        let y = (i as u32) / module_count;

        if *color == qrcode::Color::Dark {
            for dx in 0..scale {
                for dy in 0..scale {
                    img.put_pixel(offset + x * scale + dx, offset + y * scale + dy, Luma([0u8]));
                }
            }
        }
    }

    Ok(DynamicImage::ImageLuma8(img))
}
