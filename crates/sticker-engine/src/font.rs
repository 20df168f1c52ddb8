//! Bold font discovery for sticker text.

use std::path::Path;

use ab_glyph::FontRef;
use tracing::{debug, info};

use crate::{Result, StickerError};

const VALID_EXTENSIONS: &[&str] = &["ttf", "otf", "ttc"];

/// Read font data from `custom` if given, else from the first bold system
/// font that exists. Regular weights are never picked up implicitly; with no
/// bold face installed this is [`StickerError::FontNotFound`].
pub fn load_font_data(custom: Option<&Path>) -> Result<Vec<u8>> {
    if let Some(path) = custom {
        let valid = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| VALID_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()));
        if !valid {
            return Err(StickerError::InvalidFont);
        }
        let data = std::fs::read(path)?;
        info!(path = %path.display(), "Using configured sticker font");
        return Ok(data);
    }
    load_system_font_data()
}

/// Parse TTF/OTF bytes.
pub fn parse_font(data: &[u8]) -> Result<FontRef<'_>> {
    FontRef::try_from_slice(data).map_err(|_| StickerError::InvalidFont)
}

fn load_system_font_data() -> Result<Vec<u8>> {
    for path in system_font_candidates() {
        match std::fs::read(path) {
            Ok(data) => {
                info!(path = %path, "Using system font for sticker text");
                return Ok(data);
            }
            Err(e) => debug!(path = %path, "Font candidate unavailable: {e}"),
        }
    }
    Err(StickerError::FontNotFound)
}

fn system_font_candidates() -> &'static [&'static str] {
    #[cfg(target_os = "macos")]
    {
        &[
            "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
            "/Library/Fonts/Arial Bold.ttf",
            "/System/Library/Fonts/Supplemental/Verdana Bold.ttf",
        ]
    }
    #[cfg(target_os = "windows")]
    {
        &[
            "C:\\Windows\\Fonts\\arialbd.ttf",
            "C:\\Windows\\Fonts\\segoeuib.ttf",
            "C:\\Windows\\Fonts\\verdanab.ttf",
        ]
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        &[
            "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
            "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
            "/usr/share/fonts/liberation-sans/LiberationSans-Bold.ttf",
            "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans-Bold.ttf",
            "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
        ]
    }
}
