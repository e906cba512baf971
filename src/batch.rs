use crate::compressor::{compress, CompressionOptions, CompressionRequest};
use crate::constants::{IMAGE_EXTENSIONS, MAX_BATCH_FILES};
use crate::error::{CompressionError, Result};
use crate::formats::LossyFormat;
use crate::source::ImageSource;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use walkdir::WalkDir;

/// Totals for one batch run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    pub processed: usize,
    pub failed: usize,
    pub total_original_bytes: u64,
    pub total_compressed_bytes: u64,
    pub elapsed: Duration,
}

impl BatchSummary {
    pub fn compression_ratio(&self) -> f64 {
        if self.total_original_bytes == 0 {
            return 0.0;
        }
        let before = self.total_original_bytes as f64;
        (before - self.total_compressed_bytes as f64) / before * 100.0
    }

    pub fn files_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.processed as f64 / secs
    }
}

/// Compresses every image found at `input` into `output`.
///
/// # Arguments
/// * `input` - A file, a directory or a glob pattern
/// * `output` - Directory receiving `<stem>.<ext>` for each input
/// * `options` - Quality and optional format shared by all files
/// * `recursive` - Descend into subdirectories when `input` is a directory
/// * `show_progress` - Draw the progress bar on stderr
///
/// A file that fails to compress is logged and counted; it does not stop the
/// rest of the batch.
pub fn batch_compress_images(
    input: &str,
    output: &Path,
    options: &CompressionOptions,
    recursive: bool,
    show_progress: bool,
) -> Result<BatchSummary> {
    info!("Starting batch compression of {} into {:?}", input, output);
    let start_time = Instant::now();

    let image_files = collect_image_files(input, recursive)?;
    let total_files = image_files.len();

    if total_files == 0 {
        warn!("No image files found in {}", input);
        return Ok(BatchSummary::default());
    }

    info!(
        "Found {} image files, using {} threads",
        total_files,
        rayon::current_num_threads().min(total_files)
    );

    fs::create_dir_all(output)
        .map_err(|_| CompressionError::DirectoryCreationFailed(output.to_path_buf()))?;

    let format = options.format.unwrap_or_default();
    let jobs = plan_output_paths(&image_files, output, format)?;
    let progress = new_progress_bar(total_files as u64, show_progress);

    let processed_count = AtomicUsize::new(0);
    let failed_count = AtomicUsize::new(0);
    let total_size_before = AtomicU64::new(0);
    let total_size_after = AtomicU64::new(0);

    jobs.par_iter().for_each(|(input_path, output_path)| {
        match process_single_image(input_path, output_path, format, options.quality) {
            Ok((before_size, after_size)) => {
                total_size_before.fetch_add(before_size, Ordering::Relaxed);
                total_size_after.fetch_add(after_size, Ordering::Relaxed);
                processed_count.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                error!("Failed to process {:?}: {}", input_path, e);
                failed_count.fetch_add(1, Ordering::Relaxed);
            }
        }
        progress.inc(1);
    });

    progress.finish_with_message("done");

    Ok(BatchSummary {
        processed: processed_count.into_inner(),
        failed: failed_count.into_inner(),
        total_original_bytes: total_size_before.into_inner(),
        total_compressed_bytes: total_size_after.into_inner(),
        elapsed: start_time.elapsed(),
    })
}

pub fn collect_image_files(input: &str, recursive: bool) -> Result<Vec<PathBuf>> {
    let mut image_files = Vec::new();
    let input_path = Path::new(input);

    if input_path.is_file() {
        image_files.push(
            input_path
                .canonicalize()
                .map_err(|_| CompressionError::NoImageFilesFound(input.to_string()))?,
        );
    } else if input_path.is_dir() {
        let max_depth = if recursive { usize::MAX } else { 1 };
        let walker = WalkDir::new(input_path).max_depth(max_depth).into_iter();

        // Depth 0 is the root itself, which may legitimately be "." or ".."
        for entry in walker.filter_entry(|e| {
            e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.')
        }) {
            let entry = entry?;
            let path = entry.path();

            if path.is_file() && is_image_file(path) {
                if let Ok(canonical_path) = path.canonicalize() {
                    image_files.push(canonical_path);
                }
            }
        }
    } else if let Ok(glob_pattern) = glob(input) {
        for entry in glob_pattern.flatten() {
            if entry.is_file() && is_image_file(&entry) {
                if let Ok(canonical_path) = entry.canonicalize() {
                    image_files.push(canonical_path);
                }
            }
        }
    } else {
        return Err(CompressionError::NoImageFilesFound(input.to_string()));
    }

    if image_files.len() > MAX_BATCH_FILES {
        return Err(CompressionError::BatchFileLimitExceeded(
            image_files.len(),
            MAX_BATCH_FILES,
        ));
    }

    image_files.sort();
    Ok(image_files)
}

pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn new_progress_bar(len: u64, show_progress: bool) -> ProgressBar {
    if !show_progress {
        return ProgressBar::hidden();
    }

    let progress = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        progress.set_style(style.progress_chars("#>-"));
    }
    progress
}

/// Pairs every input with its own output path.
///
/// The first input (in sorted order) keeps `<stem>.<ext>`. Later inputs that
/// would land on a taken name get `<file name>.<ext>`, then `<stem>-<n>.<ext>`,
/// so no two jobs ever write the same destination.
pub fn plan_output_paths(
    image_files: &[PathBuf],
    output_dir: &Path,
    format: LossyFormat,
) -> Result<Vec<(PathBuf, PathBuf)>> {
    let mut taken = HashSet::new();
    let mut jobs = Vec::with_capacity(image_files.len());

    for input_path in image_files {
        let natural = generate_output_path(input_path, output_dir, format)?;
        let mut output_path = natural.clone();

        if taken.contains(&output_path) {
            let file_name = input_path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            output_path = output_dir.join(format!("{}.{}", file_name, format.extension()));
        }

        if taken.contains(&output_path) {
            let stem = input_path
                .file_stem()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            let mut n = 1;
            loop {
                let candidate = output_dir.join(format!("{}-{}.{}", stem, n, format.extension()));
                if !taken.contains(&candidate) {
                    output_path = candidate;
                    break;
                }
                n += 1;
            }
        }

        if output_path != natural {
            warn!(
                "Output name for {:?} already taken, writing {:?} instead",
                input_path, output_path
            );
        }
        taken.insert(output_path.clone());
        jobs.push((input_path.clone(), output_path));
    }

    Ok(jobs)
}

fn process_single_image(
    input_path: &Path,
    output_path: &Path,
    format: LossyFormat,
    quality: u8,
) -> Result<(u64, u64)> {
    let request = CompressionRequest::new(
        ImageSource::from_path(input_path),
        Some(i32::from(quality)),
        output_path,
    )?
    .with_format(format);
    let result = compress(request)?;

    Ok((result.original_size_bytes, result.compressed_size_bytes))
}

pub fn generate_output_path(
    input_path: &Path,
    output_dir: &Path,
    format: LossyFormat,
) -> Result<PathBuf> {
    let file_stem = input_path
        .file_stem()
        .ok_or_else(|| CompressionError::UnsupportedFormat("Invalid file name".to_string()))?;

    let output_filename = format!("{}.{}", file_stem.to_string_lossy(), format.extension());
    Ok(output_dir.join(output_filename))
}
