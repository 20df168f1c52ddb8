//! Asset sticker command-line driver.
//!
//! Collects asset fields, prints the payload, renders the QR bitmap and
//! composes the sticker, then writes `qr-<code>.png` and
//! `sticker-<code>.png` into the output directory.

mod config;
mod output;
mod validation;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sticker_engine::payload::{AssetFields, Field};
use sticker_engine::{
    ExportKind, PayloadMode, StickerStyle, build_payload, compose_sticker, encode_png,
    export_file_name, font,
};

use config::{AppConfig, unescape_newlines};

#[derive(Debug, Parser)]
#[command(name = "asset-sticker", version, about = "Render asset QR stickers")]
struct Cli {
    #[arg(long, env = "ASSET_NAME")]
    asset_name: Option<String>,

    #[arg(long, env = "ASSET_SPECIFICATION")]
    specification: Option<String>,

    #[arg(long, env = "ASSET_COLOUR")]
    colour: Option<String>,

    #[arg(long, env = "ASSET_DATE")]
    date: Option<String>,

    #[arg(long, env = "ASSET_USER")]
    user: Option<String>,

    #[arg(long, env = "ASSET_LOCATION")]
    location: Option<String>,

    #[arg(long = "email", env = "ASSET_EMAIL_OFFICE_ACTIVATION")]
    email_office_activation: Option<String>,

    #[arg(long, env = "ASSET_CODE_NUMBER")]
    code_number: Option<String>,

    #[arg(long, env = "ASSET_SECONDARY_CODE")]
    secondary_code: Option<String>,

    /// Output directory (overrides STICKER_OUTPUT_DIR).
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// TTF/OTF font for sticker text (overrides STICKER_FONT_PATH).
    #[arg(long)]
    font: Option<PathBuf>,

    /// Layout style: standard | tall-header.
    #[arg(long)]
    style: Option<StickerStyle>,

    /// Payload layout: structured | compact | compact-pretty.
    #[arg(long)]
    payload_mode: Option<PayloadMode>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Two header lines separated by `\n`.
    #[arg(long)]
    header_text: Option<String>,

    /// Only write the QR image.
    #[arg(long)]
    qr_only: bool,
}

impl Cli {
    fn fields(&self) -> AssetFields {
        AssetFields {
            asset_name: self.asset_name.clone(),
            specification: self.specification.clone(),
            colour: self.colour.clone(),
            date: self.date.clone(),
            user: self.user.clone(),
            location: self.location.clone(),
            email_office_activation: self.email_office_activation.clone(),
            code_number: self.code_number.clone(),
            secondary_code: self.secondary_code.clone(),
        }
    }

    /// Command-line flags win over environment settings.
    fn apply(&self, config: &mut AppConfig) {
        if let Some(dir) = &self.out_dir {
            config.output_dir = dir.clone();
        }
        if let Some(font) = &self.font {
            config.font_path = Some(font.clone());
        }
        if let Some(style) = self.style {
            config.style = style;
        }
        if let Some(mode) = self.payload_mode {
            config.payload_mode = mode;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(text) = &self.header_text {
            config.header_text = unescape_newlines(text);
        }
    }
}

/// Files written by one run.
#[derive(Debug)]
struct Written {
    qr: PathBuf,
    sticker: Option<PathBuf>,
}

fn run(fields: &AssetFields, config: &AppConfig, qr_only: bool) -> anyhow::Result<(String, Written)> {
    validation::validate_fields(fields)?;

    let payload = build_payload(fields, &config.payload_policy());
    let qr = qr_render::generate_qr(&payload, &config.qr_options())?;

    // Validation guarantees a trimmed 12-digit code.
    let code = fields.value(Field::CodeNumber);
    let qr_path = output::write_png(
        &config.output_dir,
        &export_file_name(ExportKind::Qr, code),
        &encode_png(&qr)?,
    )?;

    if qr_only {
        return Ok((payload, Written { qr: qr_path, sticker: None }));
    }

    let font_data = font::load_font_data(config.font_path.as_deref())?;
    let font = font::parse_font(&font_data)?;
    let sticker = compose_sticker(Some(&qr), code, &config.layout(), &font)?;
    let sticker_path = output::write_png(
        &config.output_dir,
        &export_file_name(ExportKind::Sticker, code),
        &sticker.to_png()?,
    )?;

    Ok((
        payload,
        Written {
            qr: qr_path,
            sticker: Some(sticker_path),
        },
    ))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    config::load_dotenv();
    let cli = Cli::parse();
    let mut config = AppConfig::load();
    cli.apply(&mut config);

    let (payload, written) = run(&cli.fields(), &config, cli.qr_only)?;
    println!("{payload}");
    tracing::info!(qr = %written.qr.display(), sticker = ?written.sticker, "Done");
    Ok(())
}
