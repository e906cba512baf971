use anyhow::{bail, Context, Result};
use clap::Parser;
use log::warn;
use rayon::ThreadPoolBuilder;
use webp_squeeze::cli::{Args, Commands};
use webp_squeeze::config::Settings;
use webp_squeeze::{
    batch_compress_images, compress, logger, report, CompressionOptions, CompressionRequest,
    ImageSource,
};

fn main() -> Result<()> {
    let args = Args::parse();

    let settings = Settings::load(args.config.as_deref()).context("Failed to load settings")?;
    logger::init(args.quiet, args.verbose, &settings.log_level);

    match args.command {
        Commands::Compress {
            input,
            output,
            quality,
            format,
        } => {
            let output = output.unwrap_or_else(|| settings.default_output.clone());
            let quality = quality.unwrap_or(settings.default_quality);
            let options = CompressionOptions::new(Some(quality), format.as_deref())?;

            let mut request = CompressionRequest::new(
                ImageSource::from_path(&input),
                Some(i32::from(options.quality)),
                output,
            )?;
            if let Some(format) = options.format {
                request = request.with_format(format);
            }

            let result = compress(request)
                .with_context(|| format!("Failed to compress {}", input.display()))?;
            if !args.quiet {
                report::print_result(&result);
            }
        }
        Commands::Batch {
            input,
            output,
            quality,
            format,
            threads,
            recursive,
        } => {
            setup_thread_pool(threads);
            let quality = quality.unwrap_or(settings.default_quality);
            let options = CompressionOptions::new(Some(quality), format.as_deref())?;

            let summary =
                batch_compress_images(&input, &output, &options, recursive, !args.quiet)?;
            if !args.quiet {
                report::print_summary(&summary);
            }
            if summary.failed > 0 {
                bail!(
                    "{} of {} files failed to compress",
                    summary.failed,
                    summary.failed + summary.processed
                );
            }
        }
    }

    Ok(())
}

fn setup_thread_pool(threads: Option<usize>) {
    if let Some(num_threads) = threads {
        if let Err(e) = ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
        {
            warn!("Failed to set thread pool size: {}", e);
        }
    }
}
