//! PNG encoding and export file naming.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat};

use crate::Result;

/// Which image is being exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Sticker,
    Qr,
}

impl ExportKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sticker => "sticker",
            Self::Qr => "qr",
        }
    }
}

/// File name for an exported image: `<kind>-<raw code>.png`.
///
/// Uses the raw code number, not the grouped display form. With no code
/// number the kind name stands in, e.g. `sticker-sticker.png`.
pub fn export_file_name(kind: ExportKind, raw_code: &str) -> String {
    let code = if raw_code.is_empty() {
        kind.as_str()
    } else {
        raw_code
    };
    let name = format!("{}-{code}", kind.as_str());
    if name.ends_with(".png") {
        name
    } else {
        format!("{name}.png")
    }
}

/// Encode an image as PNG bytes.
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    image.write_to(&mut cursor, ImageFormat::Png)?;
    Ok(cursor.into_inner())
}
