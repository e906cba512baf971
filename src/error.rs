use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of every failure a compression call can surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input could not be parsed as a raster image.
    Decode,
    /// Reading the source or writing the destination failed.
    Io,
    /// The request itself was malformed.
    InvalidArgument,
}

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Encoder rejected image: {0}")]
    Encode(String),

    #[error("Invalid quality value: {0}. Must be between 0 and 100")]
    InvalidQuality(i32),

    #[error("Destination path is missing")]
    MissingDestination,

    #[error("Invalid image dimensions: {0}x{1}. Maximum allowed: {2}x{2}")]
    InvalidDimensions(u32, u32, u32),

    #[error("File too large: {0} bytes. Maximum allowed: {1} bytes")]
    FileTooLarge(u64, u64),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to create output directory: {0}")]
    DirectoryCreationFailed(PathBuf),

    #[error("No image files found in input path: {0}")]
    NoImageFilesFound(String),

    #[error("Walkdir error: {0}")]
    WalkdirError(#[from] walkdir::Error),

    #[error("Batch file count limit exceeded: {0} files, maximum allowed {1}")]
    BatchFileLimitExceeded(usize, usize),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CompressionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CompressionError::Decode(_)
            | CompressionError::Encode(_)
            | CompressionError::InvalidDimensions(..) => ErrorKind::Decode,
            CompressionError::InvalidQuality(_)
            | CompressionError::MissingDestination
            | CompressionError::UnsupportedFormat(_)
            | CompressionError::BatchFileLimitExceeded(..)
            | CompressionError::Config(_) => ErrorKind::InvalidArgument,
            CompressionError::Io(_)
            | CompressionError::FileTooLarge(..)
            | CompressionError::FileNotFound(_)
            | CompressionError::DirectoryCreationFailed(_)
            | CompressionError::NoImageFilesFound(_)
            | CompressionError::WalkdirError(_) => ErrorKind::Io,
        }
    }
}

impl From<image::ImageError> for CompressionError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => CompressionError::Io(e),
            image::ImageError::Encoding(e) => CompressionError::Encode(e.to_string()),
            other => CompressionError::Decode(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, CompressionError>;
