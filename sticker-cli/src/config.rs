//! Runtime configuration loaded from `.env` + environment.

use std::path::PathBuf;
use std::str::FromStr;

use qr_render::{EcLevel, QrOptions};
use sticker_engine::code_number::{self, CodeFormat, GroupScheme};
use sticker_engine::layout::{DEFAULT_HEADER_TEXT, QrScaling};
use sticker_engine::{
    DEFAULT_HEIGHT, DEFAULT_WIDTH, LayoutOverrides, LayoutSpec, Palette, PayloadMode,
    PayloadPolicy, StickerStyle,
};

/// Load .env from multiple candidate paths.
pub fn load_dotenv() {
    let candidates = [".env", "../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::debug!("No .env file found, using system environment variables");
}

/// Rendering and output settings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub width: u32,
    pub height: u32,
    pub header_text: String,
    pub style: StickerStyle,
    pub palette: Palette,
    pub code_format: CodeFormat,
    pub qr_scaling: QrScaling,
    pub payload_mode: PayloadMode,
    pub payload_heading: Option<String>,
    pub payload_trailer: Option<String>,
    pub omit_empty_secondary: bool,
    pub qr_width: u32,
    pub qr_ec_level: EcLevel,
    pub font_path: Option<PathBuf>,
    pub output_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            header_text: DEFAULT_HEADER_TEXT.into(),
            style: StickerStyle::default(),
            palette: Palette::default(),
            code_format: CodeFormat::default(),
            qr_scaling: QrScaling::default(),
            payload_mode: PayloadMode::default(),
            payload_heading: None,
            payload_trailer: None,
            omit_empty_secondary: false,
            qr_width: 512,
            qr_ec_level: EcLevel::M,
            font_path: None,
            output_dir: PathBuf::from("."),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn load() -> Self {
        Self::load_from(|key| std::env::var(key).ok())
    }

    /// Load configuration through a key lookup. Unset or unparsable values
    /// keep their defaults.
    pub fn load_from(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let g = |key: &str| -> String { lookup(key).unwrap_or_default().trim().to_string() };
        let defaults = Self::default();

        let scheme = parse_or(&g("STICKER_CODE_GROUPING"), "STICKER_CODE_GROUPING", GroupScheme::default());
        let separator = {
            let raw = lookup("STICKER_CODE_SEPARATOR").unwrap_or_default();
            if raw.is_empty() {
                defaults.code_format.separator
            } else {
                code_number::parse_separator(&raw).unwrap_or_else(|| {
                    tracing::warn!(value = %raw, "Ignoring invalid STICKER_CODE_SEPARATOR");
                    defaults.code_format.separator
                })
            }
        };

        Self {
            width: parse_or(&g("STICKER_WIDTH"), "STICKER_WIDTH", defaults.width),
            height: parse_or(&g("STICKER_HEIGHT"), "STICKER_HEIGHT", defaults.height),
            header_text: {
                let t = g("STICKER_HEADER_TEXT");
                if t.is_empty() {
                    defaults.header_text
                } else {
                    unescape_newlines(&t)
                }
            },
            style: parse_or(&g("STICKER_STYLE"), "STICKER_STYLE", defaults.style),
            palette: parse_or(&g("STICKER_PALETTE"), "STICKER_PALETTE", defaults.palette),
            code_format: CodeFormat::new(scheme, separator),
            qr_scaling: if g("STICKER_QR_CRISP") == "true" {
                QrScaling::Crisp
            } else {
                QrScaling::Smooth
            },
            payload_mode: parse_or(&g("STICKER_PAYLOAD_MODE"), "STICKER_PAYLOAD_MODE", defaults.payload_mode),
            payload_heading: non_empty(g("STICKER_PAYLOAD_HEADING")),
            payload_trailer: non_empty(g("STICKER_PAYLOAD_TRAILER")),
            omit_empty_secondary: g("STICKER_OMIT_EMPTY_SECONDARY") == "true",
            qr_width: parse_or(&g("STICKER_QR_WIDTH"), "STICKER_QR_WIDTH", defaults.qr_width),
            qr_ec_level: parse_or(&g("STICKER_QR_EC_LEVEL"), "STICKER_QR_EC_LEVEL", defaults.qr_ec_level),
            font_path: non_empty(g("STICKER_FONT_PATH")).map(PathBuf::from),
            output_dir: non_empty(g("STICKER_OUTPUT_DIR"))
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
        }
    }

    /// Size and header text as overrides on top of the style defaults.
    pub fn layout_overrides(&self) -> LayoutOverrides {
        LayoutOverrides {
            width: Some(self.width),
            height: Some(self.height),
            header_text: Some(self.header_text.clone()),
        }
    }

    pub fn layout(&self) -> LayoutSpec {
        LayoutSpec::new()
            .with_style(self.style)
            .with_palette(self.palette)
            .with_code_format(self.code_format)
            .with_qr_scaling(self.qr_scaling)
            .with_overrides(&self.layout_overrides())
    }

    pub fn payload_policy(&self) -> PayloadPolicy {
        PayloadPolicy {
            mode: self.payload_mode,
            heading: self.payload_heading.clone(),
            trailer: self.payload_trailer.clone(),
            omit_empty_secondary: self.omit_empty_secondary,
        }
    }

    pub fn qr_options(&self) -> QrOptions {
        QrOptions::default()
            .with_target_width(self.qr_width)
            .with_ec_level(self.qr_ec_level)
    }
}

fn parse_or<T: FromStr>(s: &str, key: &str, default: T) -> T {
    if s.is_empty() {
        return default;
    }
    s.parse().unwrap_or_else(|_| {
        tracing::warn!(key, value = s, "Ignoring invalid setting");
        default
    })
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

/// `.env` files cannot hold raw newlines, so `\n` is accepted as an escape.
pub(crate) fn unescape_newlines(s: &str) -> String {
    s.replace("\\n", "\n")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::load_from(|key| map.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = load(&[]);
        assert_eq!((config.width, config.height), (600, 840));
        assert_eq!(config.header_text, "PROPERTY OF\nTRANS CONTINENT");
        assert_eq!(config.style, StickerStyle::Standard);
        assert_eq!(config.code_format, CodeFormat::SLASHED);
        assert_eq!(config.payload_mode, PayloadMode::CompactPretty);
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert!(config.font_path.is_none());
    }

    #[test]
    fn reads_every_setting() {
        let config = load(&[
            ("STICKER_WIDTH", "450"),
            ("STICKER_HEIGHT", "630"),
            ("STICKER_HEADER_TEXT", "ASSET OF\\nACME"),
            ("STICKER_STYLE", "tall-header"),
            ("STICKER_PALETTE", "monochrome"),
            ("STICKER_CODE_GROUPING", "registry"),
            ("STICKER_CODE_SEPARATOR", " "),
            ("STICKER_QR_CRISP", "true"),
            ("STICKER_PAYLOAD_MODE", "structured"),
            ("STICKER_PAYLOAD_HEADING", "PROPERTY OF ACME"),
            ("STICKER_OMIT_EMPTY_SECONDARY", "true"),
            ("STICKER_QR_WIDTH", "300"),
            ("STICKER_QR_EC_LEVEL", "h"),
            ("STICKER_FONT_PATH", "/fonts/Bold.ttf"),
            ("STICKER_OUTPUT_DIR", "out"),
        ]);
        assert_eq!((config.width, config.height), (450, 630));
        assert_eq!(config.header_text, "ASSET OF\nACME");
        assert_eq!(config.style, StickerStyle::TallHeader);
        assert_eq!(config.palette, Palette::MONOCHROME);
        assert_eq!(config.code_format, CodeFormat::new(GroupScheme::Registry, ' '));
        assert_eq!(config.qr_scaling, QrScaling::Crisp);
        assert_eq!(config.payload_mode, PayloadMode::Structured);
        assert_eq!(config.payload_heading.as_deref(), Some("PROPERTY OF ACME"));
        assert!(config.payload_policy().omit_empty_secondary);
        assert_eq!(config.qr_width, 300);
        assert_eq!(config.qr_ec_level, EcLevel::H);
        assert_eq!(config.font_path, Some(PathBuf::from("/fonts/Bold.ttf")));
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = load(&[
            ("STICKER_WIDTH", "wide"),
            ("STICKER_STYLE", "baroque"),
            ("STICKER_CODE_SEPARATOR", "::"),
        ]);
        assert_eq!(config.width, 600);
        assert_eq!(config.style, StickerStyle::Standard);
        assert_eq!(config.code_format.separator, '/');
    }

    #[test]
    fn layout_reflects_config() {
        let config = load(&[("STICKER_STYLE", "tall-header"), ("STICKER_WIDTH", "500")]);
        let layout = config.layout();
        assert_eq!(layout.width, 500);
        assert_eq!(layout.proportions, StickerStyle::TallHeader.proportions());
    }

    #[test]
    fn layout_goes_through_overrides() {
        let config = load(&[
            ("STICKER_HEIGHT", "630"),
            ("STICKER_HEADER_TEXT", "ASSET OF\\nACME"),
        ]);
        let overrides = config.layout_overrides();
        assert_eq!(overrides.width, Some(600));
        assert_eq!(overrides.height, Some(630));
        assert_eq!(overrides.header_text.as_deref(), Some("ASSET OF\nACME"));
        assert_eq!(config.layout(), LayoutSpec::new().with_overrides(&overrides));
    }

    #[test]
    fn every_payload_label_by_default() {
        assert!(!load(&[]).payload_policy().omit_empty_secondary);
    }
}
