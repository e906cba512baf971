use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use tempfile::TempDir;
use webp_squeeze::{compress, decode_image, encode_lossy, CompressionRequest, LossyFormat};

fn create_test_png(width: u32, height: u32) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x ^ y) % 256) as u8])
    }));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}

fn bench_decode(c: &mut Criterion) {
    let png = create_test_png(1920, 1080);

    c.bench_function("decode_png_1080p", |b| {
        b.iter(|| decode_image(black_box(&png)).unwrap())
    });
}

fn bench_encode_quality(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_webp");
    let img = decode_image(&create_test_png(1280, 720)).unwrap();

    for quality in [10u8, 50, 75, 90] {
        group.bench_with_input(BenchmarkId::new("quality", quality), &quality, |b, &q| {
            b.iter(|| encode_lossy(black_box(&img), LossyFormat::WebP, q).unwrap())
        });
    }

    group.finish();
}

fn bench_compress_end_to_end(c: &mut Criterion) {
    let png = create_test_png(1280, 720);
    let output_dir = TempDir::new().unwrap();
    let destination = output_dir.path().join("out.webp");

    c.bench_function("compress_720p_q75", |b| {
        b.iter(|| {
            let request = CompressionRequest::new(png.clone(), Some(75), &destination).unwrap();
            compress(black_box(request)).unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_decode,
    bench_encode_quality,
    bench_compress_end_to_end
);
criterion_main!(benches);
