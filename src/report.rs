use crate::batch::BatchSummary;
use crate::compressor::CompressionResult;
use crate::constants::{
    COMPRESSED_SIZE_PREFIX, COMPRESSION_RATIO_PREFIX, ORIGINAL_SIZE_PREFIX, SUCCESS_PREFIX,
    WARNING_PREFIX,
};

/// Lines shown after a single compression, sizes in KB like the mobile app showed them.
pub fn result_lines(result: &CompressionResult) -> Vec<String> {
    let ratio = result.savings_percent();
    let mut lines = vec![
        format!("📁 Output: {}", result.output_location.display()),
        format!(
            "{} {} KB ({} bytes)",
            ORIGINAL_SIZE_PREFIX,
            result.original_kb(),
            result.original_size_bytes
        ),
        format!(
            "{} {} KB ({} bytes)",
            COMPRESSED_SIZE_PREFIX,
            result.compressed_kb(),
            result.compressed_size_bytes
        ),
        format!("🎨 Format: {} at quality {}", result.format, result.quality),
        format!("{} {:.1}%", COMPRESSION_RATIO_PREFIX, ratio),
    ];

    if result.compressed_size_bytes < result.original_size_bytes {
        lines.push(format!(
            "{} Successfully reduced file size by {:.1}%",
            SUCCESS_PREFIX, ratio
        ));
    } else if result.compressed_size_bytes == result.original_size_bytes {
        lines.push(format!("{} File size unchanged", WARNING_PREFIX));
    } else {
        lines.push(format!(
            "{} File size increased by {:.1}%",
            WARNING_PREFIX,
            ratio.abs()
        ));
    }
    lines
}

pub fn summary_lines(summary: &BatchSummary) -> Vec<String> {
    let mut lines = vec![
        "📊 Batch Compression Summary:".to_string(),
        format!("  📁 Total files processed: {}", summary.processed),
        format!(
            "  {} {} bytes",
            ORIGINAL_SIZE_PREFIX, summary.total_original_bytes
        ),
        format!(
            "  {} {} bytes",
            COMPRESSED_SIZE_PREFIX, summary.total_compressed_bytes
        ),
        format!(
            "  {} {:.1}%",
            COMPRESSION_RATIO_PREFIX,
            summary.compression_ratio()
        ),
        format!("  ⏱️  Total time: {:?}", summary.elapsed),
        format!("  ⚡ Average speed: {:.2} files/second", summary.files_per_second()),
    ];
    if summary.failed > 0 {
        lines.push(format!("  {} Failed files: {}", WARNING_PREFIX, summary.failed));
    }
    lines
}

pub fn print_result(result: &CompressionResult) {
    for line in result_lines(result) {
        println!("{}", line);
    }
}

pub fn print_summary(summary: &BatchSummary) {
    for line in summary_lines(summary) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::LossyFormat;
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn test_result_lines_show_kb() {
        let result = CompressionResult {
            original_size_bytes: 512_000,
            compressed_size_bytes: 102_400,
            output_location: PathBuf::from("/tmp/out.webp"),
            format: LossyFormat::WebP,
            quality: 75,
        };
        let lines = result_lines(&result);
        assert!(lines[1].contains("500 KB"));
        assert!(lines[2].contains("100 KB"));
        assert!(lines.iter().any(|l| l.contains("WebP at quality 75")));
        assert!(lines.last().unwrap().contains("reduced file size by 80.0%"));
    }

    #[test]
    fn test_result_lines_warn_on_growth() {
        let result = CompressionResult {
            original_size_bytes: 100,
            compressed_size_bytes: 150,
            output_location: PathBuf::from("out.webp"),
            format: LossyFormat::WebP,
            quality: 100,
        };
        assert!(result_lines(&result)
            .last()
            .unwrap()
            .contains("increased by 50.0%"));
    }

    #[test]
    fn test_result_lines_equal_sizes() {
        let result = CompressionResult {
            original_size_bytes: 2048,
            compressed_size_bytes: 2048,
            output_location: PathBuf::from("out.webp"),
            format: LossyFormat::WebP,
            quality: 75,
        };
        let lines = result_lines(&result);
        assert!(lines.last().unwrap().contains("File size unchanged"));
        assert!(!lines.iter().any(|l| l.contains("increased")));
    }

    #[test]
    fn test_summary_lines_failed_count() {
        let summary = BatchSummary {
            processed: 3,
            failed: 2,
            total_original_bytes: 10,
            total_compressed_bytes: 5,
            elapsed: Duration::from_millis(10),
        };
        let lines = summary_lines(&summary);
        assert!(lines.iter().any(|l| l.contains("Failed files: 2")));

        let clean = BatchSummary { failed: 0, ..summary };
        assert!(!summary_lines(&clean).iter().any(|l| l.contains("Failed")));
    }
}
