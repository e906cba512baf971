use crate::constants::MAX_FILE_SIZE;
use crate::error::{CompressionError, Result};
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Raw encoded image bytes supplied by the caller.
///
/// The compressor consumes the source; nothing is kept once the call returns.
pub enum ImageSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
    Reader(Box<dyn Read + Send>),
}

impl ImageSource {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        ImageSource::Path(path.into())
    }

    pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Self {
        ImageSource::Reader(Box::new(reader))
    }

    /// Reads the whole source into memory.
    ///
    /// The buffer length is the exact number of bytes read, which is what the
    /// compressor reports as the original size.
    pub fn read_all(self) -> Result<Vec<u8>> {
        match self {
            ImageSource::Path(path) => read_file(&path),
            ImageSource::Bytes(bytes) => {
                check_size(bytes.len() as u64)?;
                Ok(bytes)
            }
            ImageSource::Reader(reader) => {
                let mut buf = Vec::new();
                // One byte past the limit is enough to detect an oversized stream.
                reader.take(MAX_FILE_SIZE + 1).read_to_end(&mut buf)?;
                check_size(buf.len() as u64)?;
                Ok(buf)
            }
        }
    }
}

impl From<Vec<u8>> for ImageSource {
    fn from(bytes: Vec<u8>) -> Self {
        ImageSource::Bytes(bytes)
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        ImageSource::Path(path)
    }
}

impl From<&Path> for ImageSource {
    fn from(path: &Path) -> Self {
        ImageSource::Path(path.to_path_buf())
    }
}

impl fmt::Debug for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Path(path) => f.debug_tuple("Path").field(path).finish(),
            ImageSource::Bytes(bytes) => write!(f, "Bytes({} bytes)", bytes.len()),
            ImageSource::Reader(_) => f.write_str("Reader(..)"),
        }
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(CompressionError::FileNotFound(path.to_path_buf()));
    }

    // Check file size before reading to avoid pulling huge files into memory
    check_size(fs::metadata(path)?.len())?;
    Ok(fs::read(path)?)
}

fn check_size(len: u64) -> Result<()> {
    if len > MAX_FILE_SIZE {
        return Err(CompressionError::FileTooLarge(len, MAX_FILE_SIZE));
    }
    Ok(())
}
