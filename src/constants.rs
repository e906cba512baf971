pub const DEFAULT_QUALITY: u8 = 75;
pub const MIN_QUALITY: i32 = 0;
pub const MAX_QUALITY: i32 = 100;

/// The JPEG encoder rejects quality 0.
pub const MIN_JPEG_QUALITY: u8 = 1;

pub const DEFAULT_OUTPUT_FILE: &str = "output.webp";

pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;
pub const MAX_IMAGE_DIMENSION: u32 = 16_383;
pub const MAX_BATCH_FILES: usize = 10_000;

pub const DEFAULT_CONFIG_FILE: &str = "webp-squeeze.toml";
pub const CONFIG_PATH_ENV: &str = "WEBP_SQUEEZE_CONFIG";
pub const QUALITY_ENV: &str = "WEBP_SQUEEZE_QUALITY";
pub const LOG_LEVEL_ENV: &str = "WEBP_SQUEEZE_LOG_LEVEL";
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "bmp", "tiff", "tif", "gif"];

// Common output message prefixes
pub const ORIGINAL_SIZE_PREFIX: &str = "📊 Original size:";
pub const COMPRESSED_SIZE_PREFIX: &str = "📈 Compressed size:";
pub const COMPRESSION_RATIO_PREFIX: &str = "🎯 Compression ratio:";
pub const SUCCESS_PREFIX: &str = "✅";
pub const WARNING_PREFIX: &str = "⚠️ ";
