#![allow(dead_code)]

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// A busy RGB pattern that lossy encoders cannot collapse to a handful of bytes.
pub fn textured_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x % 256) as u8,
            (y % 256) as u8,
            ((x.wrapping_mul(y) ^ (x + y)) % 251) as u8,
        ])
    }))
}

pub fn solid_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([40, 120, 200])))
}

pub fn encode(img: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format).unwrap();
    buf.into_inner()
}

pub fn write_image(dir: &Path, name: &str, img: &DynamicImage, format: ImageFormat) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, encode(img, format)).unwrap();
    path
}
