use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "webp-squeeze",
    about = "Re-encode images into lossy WebP and report how much space it saved",
    long_about = "webp-squeeze decodes an image (JPEG, PNG, WebP, GIF, BMP, TIFF), re-encodes it \
                  with a lossy encoder at the requested quality and replaces the destination file \
                  atomically. Original and compressed sizes are reported after every run.",
    version,
    after_help = "EXAMPLES:\n  \
    webp-squeeze compress photo.jpg\n  \
    webp-squeeze compress photo.png small.webp -q 60\n  \
    webp-squeeze batch \"./images/*.jpg\" ./compressed -r -q 80 -f jpeg"
)]
pub struct Args {
    #[arg(short = 's', long, global = true, help = "Only print errors")]
    pub quiet: bool,

    #[arg(short = 'v', long, global = true, help = "Print debug diagnostics")]
    pub verbose: bool,

    #[arg(
        long,
        global = true,
        help = "Settings file (default: webp-squeeze.toml)",
        long_help = "TOML file providing default_quality, default_output and log_level. \
                     Can also be set through WEBP_SQUEEZE_CONFIG."
    )]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(
        about = "Compress a single image file",
        long_about = "Compress a single image. The output format follows the output extension \
                      (.webp or .jpg/.jpeg) unless --format is given; anything else becomes WebP."
    )]
    Compress {
        #[arg(help = "Input image file path")]
        input: PathBuf,

        #[arg(help = "Output file path (default: output.webp)")]
        output: Option<PathBuf>,

        #[arg(
            short = 'q',
            long,
            allow_negative_numbers = true,
            help = "Compression quality (0-100, default: 75)",
            long_help = "Lossy encoder quality from 0 (smallest) to 100 (best fidelity)."
        )]
        quality: Option<i32>,

        #[arg(short = 'f', long, help = "Output format (webp, jpeg)")]
        format: Option<String>,
    },

    #[command(
        about = "Compress multiple images in parallel",
        long_about = "Compress every image found in a directory, file pattern or glob. \
                      Each output is written as <stem>.<format extension> in the output directory; \
                      inputs sharing a stem get <file name>.<ext> or <stem>-<n>.<ext>. \
                      Exits non-zero if any file failed."
    )]
    Batch {
        #[arg(
            help = "Input directory, file pattern, or glob",
            long_help = "Input can be a directory path, file pattern, or glob expression. \
                         Examples: './images', '*.jpg', '/path/to/images/*.png'"
        )]
        input: String,

        #[arg(help = "Output directory path")]
        output: PathBuf,

        #[arg(
            short = 'q',
            long,
            allow_negative_numbers = true,
            help = "Compression quality (0-100, default: 75)"
        )]
        quality: Option<i32>,

        #[arg(
            short = 'f',
            long,
            help = "Output format (webp, jpeg)",
            long_help = "Format for every output file. Defaults to WebP."
        )]
        format: Option<String>,

        #[arg(
            short = 'j',
            long,
            help = "Number of parallel threads (default: auto)",
            long_help = "Number of threads for parallel batch processing. \
                         If not specified, uses number of CPU cores."
        )]
        threads: Option<usize>,

        #[arg(
            short = 'r',
            long,
            help = "Process subdirectories recursively",
            long_help = "Recursively process all subdirectories when input is a directory."
        )]
        recursive: bool,
    },
}
