use anyhow::{Context, Result};

use crate::layout::FontSize;
use crate::templates::ResumeTemplate;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub default_template: ResumeTemplate,
    pub default_font_size: FontSize,
    /// Country code printed before bare phone numbers by templates that ask for it.
    pub default_dial_code: String,
    /// Load the PDF engine at startup instead of on first use.
    pub pdf_preload: bool,
    pub max_body_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let font_size = var("DEFAULT_FONT_SIZE", "10")
            .parse::<u8>()
            .context("DEFAULT_FONT_SIZE must be a number")?;

        Ok(Config {
            port: var("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG", "info"),
            default_template: var("DEFAULT_TEMPLATE", "modern")
                .parse::<ResumeTemplate>()
                .context("DEFAULT_TEMPLATE must be 'modern' or 'identity'")?,
            default_font_size: FontSize::try_from(font_size)
                .context("DEFAULT_FONT_SIZE is not a supported size")?,
            default_dial_code: var("DEFAULT_DIAL_CODE", "+91"),
            pdf_preload: parse_bool(&var("PDF_PRELOAD", "false"))
                .context("PDF_PRELOAD must be true or false")?,
            max_body_bytes: var("MAX_BODY_BYTES", "2097152")
                .parse::<usize>()
                .context("MAX_BODY_BYTES must be a byte count")?,
        })
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => anyhow::bail!("unrecognized boolean '{other}'"),
    }
}
