mod common;

use deconv_core::error::DeconvError;
use deconv_core::io::image_io::{load_image, save_image, save_png};

use common::pattern_frame;

#[test]
fn test_png_round_trip_is_lossless() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pattern.png");
    let frame = pattern_frame(21, 34);

    save_png(&frame, &path).unwrap();
    let loaded = load_image(&path).unwrap();
    assert_eq!(loaded, frame);
}

#[test]
fn test_save_image_picks_format_from_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pattern.tiff");
    let frame = pattern_frame(12, 12);

    save_image(&frame, &path).unwrap();
    assert_eq!(image::ImageFormat::from_path(&path).unwrap(), image::ImageFormat::Tiff);
    let loaded = load_image(&path).unwrap();
    assert_eq!(loaded, frame);
}

#[test]
fn test_colour_input_is_converted_to_gray() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("colour.png");
    let rgb = image::RgbImage::from_pixel(6, 4, image::Rgb([90, 90, 90]));
    rgb.save(&path).unwrap();

    let loaded = load_image(&path).unwrap();
    assert_eq!(loaded.dim(), (4, 6));
    assert!(loaded.data.iter().all(|&v| v == 90));
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_image(&dir.path().join("absent.png"));
    assert!(matches!(
        result,
        Err(DeconvError::ImageError(_)) | Err(DeconvError::Io(_))
    ));
}
