//! QR bitmap rendering for asset stickers.
//!
//! Encodes a payload string into a square grayscale bitmap that the
//! sticker engine scales and composites.

pub mod qr;

pub use qr::{EcLevel, QrOptions, generate_qr};

/// Errors that can occur while rendering a QR bitmap.
#[derive(Debug, thiserror::Error)]
pub enum QrError {
    #[error("QR encode error: {0}")]
    Encode(#[from] qrcode::types::QrError),

    #[error("Invalid QR target width: {0}")]
    InvalidWidth(u32),
}

/// Result type alias for QR rendering.
pub type Result<T> = std::result::Result<T, QrError>;
