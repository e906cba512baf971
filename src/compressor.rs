use crate::constants::{
    DEFAULT_QUALITY, MAX_IMAGE_DIMENSION, MAX_QUALITY, MIN_JPEG_QUALITY, MIN_QUALITY,
};
use crate::error::{CompressionError, Result};
use crate::formats::{determine_output_format, LossyFormat};
use crate::source::ImageSource;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GenericImageView, ImageReader};
use log::{debug, info};
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Checks a caller-supplied quality, falling back to the default when absent.
///
/// # Example
/// ```
/// use webp_squeeze::compressor::validate_quality;
///
/// assert_eq!(validate_quality(None).unwrap(), 75);
/// assert!(validate_quality(Some(101)).is_err());
/// ```
pub fn validate_quality(quality: Option<i32>) -> Result<u8> {
    match quality {
        None => Ok(DEFAULT_QUALITY),
        Some(q) if (MIN_QUALITY..=MAX_QUALITY).contains(&q) => Ok(q as u8),
        Some(q) => Err(CompressionError::InvalidQuality(q)),
    }
}

/// Settings shared by every file of a batch.
#[derive(Debug, Clone)]
pub struct CompressionOptions {
    pub quality: u8,
    pub format: Option<LossyFormat>,
}

impl CompressionOptions {
    pub fn new(quality: Option<i32>, format: Option<&str>) -> Result<Self> {
        let quality = validate_quality(quality)?;
        let format = format.map(str::parse::<LossyFormat>).transpose()?;
        Ok(Self { quality, format })
    }
}

/// One image to compress and where to put it.
#[derive(Debug)]
pub struct CompressionRequest {
    pub source: ImageSource,
    pub quality: u8,
    pub destination: PathBuf,
    pub format: LossyFormat,
}

impl CompressionRequest {
    /// Builds a validated request. The output format follows the destination
    /// extension; use [`CompressionRequest::with_format`] to force one.
    pub fn new(
        source: impl Into<ImageSource>,
        quality: Option<i32>,
        destination: impl Into<PathBuf>,
    ) -> Result<Self> {
        let quality = validate_quality(quality)?;
        let destination = destination.into();
        if destination.as_os_str().is_empty() {
            return Err(CompressionError::MissingDestination);
        }
        let format = determine_output_format(&destination, None)?;

        Ok(Self {
            source: source.into(),
            quality,
            destination,
            format,
        })
    }

    pub fn with_format(mut self, format: LossyFormat) -> Self {
        self.format = format;
        self
    }
}

/// Outcome of a successful compression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionResult {
    pub original_size_bytes: u64,
    pub compressed_size_bytes: u64,
    pub output_location: PathBuf,
    pub format: LossyFormat,
    pub quality: u8,
}

impl CompressionResult {
    pub fn original_kb(&self) -> u64 {
        self.original_size_bytes / 1024
    }

    pub fn compressed_kb(&self) -> u64 {
        self.compressed_size_bytes / 1024
    }

    /// Percentage of the original size saved. Negative when the output grew.
    pub fn savings_percent(&self) -> f64 {
        if self.original_size_bytes == 0 {
            return 0.0;
        }
        let before = self.original_size_bytes as f64;
        (before - self.compressed_size_bytes as f64) / before * 100.0
    }
}

/// Decodes `request.source`, re-encodes it lossily and replaces the file at
/// `request.destination`.
///
/// # Returns
/// * `Ok(CompressionResult)` - sizes measured from the bytes read and the file
///   left on disk
/// * `Err(CompressionError)` - nothing is reported and no partial file is left
///   at the destination
pub fn compress(request: CompressionRequest) -> Result<CompressionResult> {
    let CompressionRequest {
        source,
        quality,
        destination,
        format,
    } = request;

    debug!("Reading source {:?}", source);
    let data = source.read_all()?;
    let original_size = data.len() as u64;

    let img = decode_image(&data)?;
    drop(data);
    debug!(
        "Decoded {}x{} image ({} bytes)",
        img.width(),
        img.height(),
        original_size
    );

    let encoded = encode_lossy(&img, format, quality)?;
    write_atomically(&destination, &encoded)?;

    let compressed_size = fs::metadata(&destination)?.len();
    info!(
        "Compressed {} -> {} bytes as {} (quality {}) into {:?}",
        original_size, compressed_size, format, quality, destination
    );

    Ok(CompressionResult {
        original_size_bytes: original_size,
        compressed_size_bytes: compressed_size,
        output_location: destination,
        format,
        quality,
    })
}

/// Decodes an in-memory image, guessing the container from its content.
pub fn decode_image(data: &[u8]) -> Result<DynamicImage> {
    let reader = ImageReader::new(Cursor::new(data)).with_guessed_format()?;
    if reader.format().is_none() {
        return Err(CompressionError::Decode(
            "unrecognised image format".to_string(),
        ));
    }

    let img = reader.decode()?;

    let (width, height) = img.dimensions();
    if width > MAX_IMAGE_DIMENSION || height > MAX_IMAGE_DIMENSION {
        return Err(CompressionError::InvalidDimensions(
            width,
            height,
            MAX_IMAGE_DIMENSION,
        ));
    }

    Ok(img)
}

/// Encodes `img` in `format` at `quality` (0-100).
pub fn encode_lossy(img: &DynamicImage, format: LossyFormat, quality: u8) -> Result<Vec<u8>> {
    match format {
        LossyFormat::WebP => {
            let quality = f32::from(quality);
            let encoded = if img.color().has_alpha() {
                let rgba = img.to_rgba8();
                webp::Encoder::from_rgba(rgba.as_raw(), rgba.width(), rgba.height())
                    .encode_simple(false, quality)
            } else {
                let rgb = img.to_rgb8();
                webp::Encoder::from_rgb(rgb.as_raw(), rgb.width(), rgb.height())
                    .encode_simple(false, quality)
            }
            .map_err(|e| CompressionError::Encode(format!("{:?}", e)))?;
            Ok(encoded.to_vec())
        }
        LossyFormat::Jpeg => {
            let rgb = img.to_rgb8();
            let mut buf = Vec::new();
            let encoder = JpegEncoder::new_with_quality(&mut buf, quality.max(MIN_JPEG_QUALITY));
            rgb.write_with_encoder(encoder)?;
            Ok(buf)
        }
    }
}

/// Writes through a temp file in the destination directory and renames it
/// into place, so the destination only ever holds a complete file.
fn write_atomically(destination: &Path, bytes: &[u8]) -> Result<()> {
    let parent = match destination.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent)
        .map_err(|_| CompressionError::DirectoryCreationFailed(parent.clone()))?;

    // Dropping the temp file on any early return removes it
    let mut tmp = NamedTempFile::new_in(&parent)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(destination).map_err(|e| e.error)?;

    Ok(())
}
