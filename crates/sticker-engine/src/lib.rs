//! Asset sticker composition engine.
//!
//! Formats asset fields into a QR payload, groups the 12-character code
//! number for display, and composites a fixed-size banded sticker image
//! around a pre-rendered QR bitmap.

pub mod code_number;
pub mod compose;
pub mod export;
pub mod font;
pub mod layout;
pub mod payload;
pub mod render;
pub mod text;

// Re-exports for convenience
pub use code_number::{CodeFormat, GroupScheme, format_code_number};
pub use export::{ExportKind, encode_png, export_file_name};
pub use layout::{LayoutOverrides, LayoutSpec, Palette, Proportions, StickerGeometry, StickerStyle};
pub use payload::{AssetFields, PayloadMode, PayloadPolicy, build_payload};
pub use render::{RenderedSticker, compose_sticker};

/// Default sticker width in pixels.
pub const DEFAULT_WIDTH: u32 = 600;

/// Default sticker height in pixels.
pub const DEFAULT_HEIGHT: u32 = 840;

/// Largest accepted sticker width or height in pixels.
pub const MAX_DIMENSION: u32 = 16_384;

/// Errors that can occur while composing or exporting a sticker.
#[derive(Debug, thiserror::Error)]
pub enum StickerError {
    #[error("No QR bitmap available, sticker composition skipped")]
    MissingQrBitmap,

    #[error("QR bitmap must be square, got {width}x{height}")]
    NonSquareQr { width: u32, height: u32 },

    #[error("QR bitmap has zero size")]
    EmptyQr,

    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    #[error("No usable font found (set a font path or install a bold system font)")]
    FontNotFound,

    #[error("Invalid font data (only TTF/OTF supported)")]
    InvalidFont,

    #[error("Image encode error: {0}")]
    Encode(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for sticker operations.
pub type Result<T> = std::result::Result<T, StickerError>;
