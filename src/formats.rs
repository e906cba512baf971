//! Lossy output formats and how a destination path selects one.

use crate::error::{CompressionError, Result};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Lossy formats the compressor can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LossyFormat {
    /// Lossy WebP through libwebp
    #[default]
    WebP,
    /// Baseline JPEG
    Jpeg,
}

impl LossyFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            LossyFormat::WebP => "webp",
            LossyFormat::Jpeg => "jpg",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            LossyFormat::WebP => "image/webp",
            LossyFormat::Jpeg => "image/jpeg",
        }
    }
}

impl fmt::Display for LossyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LossyFormat::WebP => "WebP",
            LossyFormat::Jpeg => "JPEG",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for LossyFormat {
    type Err = CompressionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "webp" => Ok(LossyFormat::WebP),
            "jpeg" | "jpg" => Ok(LossyFormat::Jpeg),
            _ => Err(CompressionError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Override wins, then the destination extension. Anything unrecognised
/// falls back to WebP.
pub fn determine_output_format(
    output_path: &Path,
    format_override: Option<&str>,
) -> Result<LossyFormat> {
    if let Some(fmt_str) = format_override {
        return LossyFormat::from_str(fmt_str);
    }

    let format = output_path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| LossyFormat::from_str(ext).ok())
        .unwrap_or_default();
    Ok(format)
}
