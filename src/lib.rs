pub mod batch;
pub mod cli;
pub mod compressor;
pub mod config;
pub mod constants;
pub mod error;
pub mod formats;
pub mod logger;
pub mod report;
pub mod source;

pub use batch::{
    batch_compress_images, collect_image_files, generate_output_path, is_image_file,
    plan_output_paths, BatchSummary,
};
pub use compressor::{
    compress, decode_image, encode_lossy, validate_quality, CompressionOptions,
    CompressionRequest, CompressionResult,
};
pub use error::{CompressionError, ErrorKind, Result};
pub use formats::{determine_output_format, LossyFormat};
pub use source::ImageSource;
