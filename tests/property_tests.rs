use proptest::prelude::*;
use std::path::Path;
use webp_squeeze::{
    determine_output_format, is_image_file, validate_quality, CompressionOptions,
    CompressionRequest, ErrorKind, LossyFormat,
};

proptest! {
    #[test]
    fn quality_in_range_is_accepted(quality in 0i32..=100i32) {
        prop_assert_eq!(validate_quality(Some(quality)).unwrap() as i32, quality);
    }

    #[test]
    fn quality_out_of_range_is_invalid_argument(
        quality in prop_oneof![i32::MIN..0i32, 101i32..=i32::MAX]
    ) {
        let err = CompressionRequest::new(vec![0u8], Some(quality), "out.webp").unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn compression_options_creation_properties(
        quality in prop::option::weighted(0.8, 0i32..=100i32),
        format in prop::option::weighted(0.3, prop::sample::select(&["webp", "jpg", "jpeg", "WebP"]))
    ) {
        let options = CompressionOptions::new(quality, format).unwrap();
        prop_assert_eq!(options.quality as i32, quality.unwrap_or(75));
        prop_assert_eq!(options.format.is_some(), format.is_some());
    }

    #[test]
    fn determine_output_format_never_fails_without_override(
        filename in "[a-zA-Z0-9_-]+(\\.[a-zA-Z]{1,5})?"
    ) {
        let format = determine_output_format(Path::new(&filename), None).unwrap();
        let is_jpeg_ext = Path::new(&filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| matches!(e.to_lowercase().as_str(), "jpg" | "jpeg"))
            .unwrap_or(false);

        if is_jpeg_ext {
            prop_assert_eq!(format, LossyFormat::Jpeg);
        } else {
            prop_assert_eq!(format, LossyFormat::WebP);
        }
    }

    #[test]
    fn is_image_file_recognizes_extensions(
        extension in prop::sample::select(&["jpg", "jpeg", "png", "webp", "bmp", "tiff", "gif", "txt", "doc", "pdf"])
    ) {
        let filename = format!("test.{}", extension);
        let expected = !matches!(extension, "txt" | "doc" | "pdf");
        prop_assert_eq!(is_image_file(Path::new(&filename)), expected);
    }
}
