//! Sticker layout configuration and derived geometry.
//!
//! Every measurement is a fraction of the configured width or height,
//! rounded half-up to whole pixels, so a given [`LayoutSpec`] always yields
//! the same [`StickerGeometry`].
//!
//! Two layout variants are in circulation and neither is documented as
//! canonical, so both are kept as [`StickerStyle`] presets:
//!
//! | ratio | `Standard` | `TallHeader` |
//! |---|---|---|
//! | header height / H | 0.18 | 0.30 |
//! | QR nudge / usable body | 0.16 | 0.12 |
//! | code gap / H | 0.085 | 0.065 |

use std::str::FromStr;

use image::Rgba;
use image::imageops::FilterType;
use serde::Deserialize;
use tracing::warn;

use crate::code_number::CodeFormat;
use crate::{DEFAULT_HEIGHT, DEFAULT_WIDTH, MAX_DIMENSION, Result, StickerError};

/// Header text used when none is configured. Lines are split on `\n`.
pub const DEFAULT_HEADER_TEXT: &str = "PROPERTY OF\nTRANS CONTINENT";

/// Header band height as a fraction of total height (standard style).
pub const STANDARD_HEADER_RATIO: f64 = 0.18;

/// Header band height as a fraction of total height (tall-header style).
pub const TALL_HEADER_RATIO: f64 = 0.30;

/// Space reserved at the bottom of the body, as a fraction of total height.
/// Excluded from the area the QR nudge is measured against.
pub const FOOTER_RESERVE_RATIO: f64 = 0.06;

/// Divider thickness as a fraction of total height.
pub const DIVIDER_RATIO: f64 = 0.009;

/// How far the divider is lifted above the header/body boundary, as a
/// fraction of its own thickness.
pub const DIVIDER_LIFT: f64 = 0.3;

/// Header font em size as a fraction of header height.
pub const HEADER_FONT_RATIO: f64 = 0.28;

/// Vertical centre of the first header line, as a fraction of header height.
pub const HEADER_LINE1_CENTER: f64 = 0.40;

/// Vertical centre of the second header line, as a fraction of header height.
pub const HEADER_LINE2_CENTER: f64 = 0.78;

/// QR square side as a fraction of total width.
pub const QR_SIZE_RATIO: f64 = 0.65;

/// QR offset below the header, as a fraction of the usable body height
/// (standard style).
pub const STANDARD_QR_NUDGE: f64 = 0.16;

/// QR offset below the header (tall-header style).
pub const TALL_HEADER_QR_NUDGE: f64 = 0.12;

/// Gap from the QR bottom edge to the code baseline, as a fraction of total
/// height (standard style).
pub const STANDARD_CODE_GAP: f64 = 0.085;

/// Gap from the QR bottom edge to the code baseline (tall-header style).
pub const TALL_HEADER_CODE_GAP: f64 = 0.065;

/// Code-number font em size as a fraction of total height.
pub const CODE_FONT_RATIO: f64 = 0.055;

/// Layout ratios. See the module-level constants for what each one means.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Proportions {
    pub header_ratio: f64,
    pub footer_reserve_ratio: f64,
    pub divider_ratio: f64,
    pub divider_lift: f64,
    pub header_font_ratio: f64,
    pub line1_center: f64,
    pub line2_center: f64,
    pub qr_size_ratio: f64,
    pub qr_nudge_ratio: f64,
    pub code_gap_ratio: f64,
    pub code_font_ratio: f64,
}

impl Proportions {
    pub const STANDARD: Self = Self {
        header_ratio: STANDARD_HEADER_RATIO,
        footer_reserve_ratio: FOOTER_RESERVE_RATIO,
        divider_ratio: DIVIDER_RATIO,
        divider_lift: DIVIDER_LIFT,
        header_font_ratio: HEADER_FONT_RATIO,
        line1_center: HEADER_LINE1_CENTER,
        line2_center: HEADER_LINE2_CENTER,
        qr_size_ratio: QR_SIZE_RATIO,
        qr_nudge_ratio: STANDARD_QR_NUDGE,
        code_gap_ratio: STANDARD_CODE_GAP,
        code_font_ratio: CODE_FONT_RATIO,
    };

    pub const TALL_HEADER: Self = Self {
        header_ratio: TALL_HEADER_RATIO,
        qr_nudge_ratio: TALL_HEADER_QR_NUDGE,
        code_gap_ratio: TALL_HEADER_CODE_GAP,
        ..Self::STANDARD
    };
}

impl Default for Proportions {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Named layout variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StickerStyle {
    /// Slim 18% header, QR pushed lower.
    #[default]
    Standard,
    /// 30% header, QR closer to the divider.
    TallHeader,
}

impl StickerStyle {
    pub fn proportions(self) -> Proportions {
        match self {
            Self::Standard => Proportions::STANDARD,
            Self::TallHeader => Proportions::TALL_HEADER,
        }
    }
}

impl FromStr for StickerStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "tall-header" | "tall" => Ok(Self::TallHeader),
            other => Err(format!("unknown sticker style '{other}'")),
        }
    }
}

/// Band and text colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub header: Rgba<u8>,
    pub divider: Rgba<u8>,
    pub body: Rgba<u8>,
    pub header_text: Rgba<u8>,
    pub code_text: Rgba<u8>,
}

impl Palette {
    /// Navy header, white divider, red body, white text.
    pub const TRANS_CONTINENT: Self = Self {
        header: Rgba([0x0B, 0x2A, 0x5B, 255]),
        divider: Rgba([255, 255, 255, 255]),
        body: Rgba([0xE0, 0x22, 0x22, 255]),
        header_text: Rgba([255, 255, 255, 255]),
        code_text: Rgba([255, 255, 255, 255]),
    };

    /// Black header on a white body, for monochrome label printers.
    pub const MONOCHROME: Self = Self {
        header: Rgba([0, 0, 0, 255]),
        divider: Rgba([255, 255, 255, 255]),
        body: Rgba([255, 255, 255, 255]),
        header_text: Rgba([255, 255, 255, 255]),
        code_text: Rgba([0, 0, 0, 255]),
    };
}

impl Default for Palette {
    fn default() -> Self {
        Self::TRANS_CONTINENT
    }
}

impl FromStr for Palette {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trans-continent" | "brand" => Ok(Self::TRANS_CONTINENT),
            "monochrome" | "mono" => Ok(Self::MONOCHROME),
            other => Err(format!("unknown palette '{other}'")),
        }
    }
}

/// Resampling used when scaling the QR bitmap to its target square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QrScaling {
    /// Bilinear smoothing.
    #[default]
    Smooth,
    /// Nearest neighbour, keeps module edges hard.
    Crisp,
}

impl QrScaling {
    pub fn filter(self) -> FilterType {
        match self {
            Self::Smooth => FilterType::Triangle,
            Self::Crisp => FilterType::Nearest,
        }
    }
}

/// Partial override of the default layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutOverrides {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub header_text: Option<String>,
}

/// Full rendering configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSpec {
    pub width: u32,
    pub height: u32,
    pub header_text: String,
    pub palette: Palette,
    pub proportions: Proportions,
    pub code_format: CodeFormat,
    pub qr_scaling: QrScaling,
}

impl Default for LayoutSpec {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            header_text: DEFAULT_HEADER_TEXT.to_string(),
            palette: Palette::default(),
            proportions: Proportions::default(),
            code_format: CodeFormat::default(),
            qr_scaling: QrScaling::default(),
        }
    }
}

impl LayoutSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: switch to a named style's proportions.
    pub fn with_style(mut self, style: StickerStyle) -> Self {
        self.proportions = style.proportions();
        self
    }

    /// Builder: set custom proportions.
    pub fn with_proportions(mut self, proportions: Proportions) -> Self {
        self.proportions = proportions;
        self
    }

    /// Builder: set palette.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Builder: set code-number format.
    pub fn with_code_format(mut self, code_format: CodeFormat) -> Self {
        self.code_format = code_format;
        self
    }

    /// Builder: set QR scaling filter.
    pub fn with_qr_scaling(mut self, qr_scaling: QrScaling) -> Self {
        self.qr_scaling = qr_scaling;
        self
    }

    /// Apply whichever of width, height and header text the overrides set.
    pub fn with_overrides(mut self, overrides: &LayoutOverrides) -> Self {
        if let Some(width) = overrides.width {
            self.width = width;
        }
        if let Some(height) = overrides.height {
            self.height = height;
        }
        if let Some(text) = &overrides.header_text {
            self.header_text = text.clone();
        }
        self
    }

    /// The two header lines. A missing second line is empty; lines past the
    /// second are ignored.
    pub fn header_lines(&self) -> (&str, &str) {
        let mut lines = self.header_text.split('\n');
        let first = lines.next().unwrap_or_default();
        let second = lines.next().unwrap_or_default();
        (first.trim_end_matches('\r'), second.trim_end_matches('\r'))
    }
}

/// Half-up rounding (`floor(v + 0.5)`), so .5 always rounds toward +inf.
fn round_px(v: f64) -> i32 {
    (v + 0.5).floor() as i32
}

/// Pixel measurements derived from a [`LayoutSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StickerGeometry {
    pub width: u32,
    pub height: u32,
    pub header_height: u32,
    pub footer_reserve: u32,
    pub body_height: u32,
    pub divider_y: i32,
    pub divider_thickness: u32,
    /// First row of the body fill (just below the divider).
    pub body_top: i32,
    pub header_font_px: u32,
    pub line1_center_y: i32,
    pub line2_center_y: i32,
    pub qr_size: u32,
    pub qr_x: u32,
    pub qr_y: u32,
    pub code_font_px: u32,
    /// Alphabetic baseline of the code-number text.
    pub code_baseline_y: i32,
}

impl StickerGeometry {
    /// Derive all measurements, rejecting layouts the QR cannot be placed in.
    pub fn compute(spec: &LayoutSpec) -> Result<Self> {
        let (w, h) = (spec.width, spec.height);
        if w == 0 || h == 0 {
            return Err(StickerError::InvalidLayout(format!(
                "sticker size must be non-zero, got {w}x{h}"
            )));
        }
        if w > MAX_DIMENSION || h > MAX_DIMENSION {
            return Err(StickerError::InvalidLayout(format!(
                "sticker size {w}x{h} exceeds {MAX_DIMENSION}px"
            )));
        }
        let p = &spec.proportions;
        let (wf, hf) = (f64::from(w), f64::from(h));

        let header_height = round_px(hf * p.header_ratio).clamp(0, h as i32) as u32;
        let footer_reserve = round_px(hf * p.footer_reserve_ratio).max(0) as u32;
        let body_height = h - header_height;

        let divider_thickness = round_px(hf * p.divider_ratio).max(0) as u32;
        let divider_y =
            header_height as i32 - round_px(f64::from(divider_thickness) * p.divider_lift);
        let body_top = divider_y + divider_thickness as i32;

        let header_font_px = round_px(f64::from(header_height) * p.header_font_ratio).max(1) as u32;
        let line1_center_y = round_px(f64::from(header_height) * p.line1_center);
        let line2_center_y = round_px(f64::from(header_height) * p.line2_center);

        let qr_size = round_px(wf * p.qr_size_ratio);
        if qr_size <= 0 || qr_size as u32 > w {
            return Err(StickerError::InvalidLayout(format!(
                "QR size {qr_size}px does not fit a {w}px wide sticker"
            )));
        }
        let qr_size = qr_size as u32;
        let qr_x = round_px(f64::from(w - qr_size) / 2.0) as u32;
        let usable_body = f64::from(body_height) - f64::from(footer_reserve);
        let qr_y =
            round_px(f64::from(header_height) + usable_body * p.qr_nudge_ratio).max(0) as u32;

        let code_font_px = round_px(hf * p.code_font_ratio).max(1) as u32;
        let code_baseline_y = (qr_y + qr_size) as i32 + round_px(hf * p.code_gap_ratio);

        if qr_y + qr_size > h {
            warn!(qr_y, qr_size, height = h, "QR square extends past the sticker bottom");
        }

        Ok(Self {
            width: w,
            height: h,
            header_height,
            footer_reserve,
            body_height,
            divider_y,
            divider_thickness,
            body_top,
            header_font_px,
            line1_center_y,
            line2_center_y,
            qr_size,
            qr_x,
            qr_y,
            code_font_px,
            code_baseline_y,
        })
    }
}
