//! End-to-end tests that drive the pipeline from real files on disk.

use epd_convert::{
    acquire_and_normalize, convert_file, encode_frame, BackgroundPolicy, EpdError, TC_P74_230,
};
use image::{GenericImageView, Rgb, RgbImage};
use std::fs;
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("epd-convert-{}-{name}", std::process::id()));
    path
}

#[test]
fn encodes_a_frame_from_a_png_on_disk() {
    let source = temp_path("white.png");
    RgbImage::from_pixel(100, 100, Rgb::from([255, 255, 255]))
        .save(&source)
        .unwrap();

    let frame = encode_frame(&source, &TC_P74_230, BackgroundPolicy::Median, 0).unwrap();
    assert_eq!(
        frame.header,
        [0x3A, 0x01, 0xE0, 0x03, 0x20, 0x01, 0x04, 0, 0, 0, 0, 0, 0, 0, 0, 0]
    );
    assert_eq!(frame.payload.len(), 48_000);
    // Solid white with a median (white) border inverts to an all-clear panel.
    assert!(frame.payload.iter().all(|&b| b == 0));

    let bytes = frame.into_bytes();
    assert_eq!(bytes.len(), 16 + 48_000);
    assert_eq!(bytes[0], 0x3A);

    fs::remove_file(&source).unwrap();
}

#[test]
fn normalizes_an_oversized_source_from_disk() {
    let source = temp_path("oversized.png");
    RgbImage::from_pixel(1024, 1024, Rgb::from([0, 0, 0]))
        .save(&source)
        .unwrap();

    let normalized =
        acquire_and_normalize(&source, &TC_P74_230, BackgroundPolicy::Median, 0).unwrap();
    assert_eq!(normalized.dimensions(), (480, 800));

    fs::remove_file(&source).unwrap();
}

#[test]
fn convert_file_writes_the_frame_encode_frame_returns() {
    let source = temp_path("black.png");
    RgbImage::from_pixel(64, 64, Rgb::from([0, 0, 0]))
        .save(&source)
        .unwrap();
    let out_file = temp_path("black.bin");
    let dithered = temp_path("black-dithered.png");

    let written = convert_file(
        &source,
        &out_file,
        &TC_P74_230,
        BackgroundPolicy::Median,
        0,
        Some(&dithered),
    )
    .unwrap();
    assert_eq!(written, 16 + 48_000);

    let frame = encode_frame(&source, &TC_P74_230, BackgroundPolicy::Median, 0).unwrap();
    assert_eq!(fs::read(&out_file).unwrap(), frame.into_bytes());

    // The dithered dump is a viewable panel-sized grayscale image.
    let dump = image::open(&dithered).unwrap();
    assert_eq!(dump.dimensions(), (480, 800));

    for path in [&source, &out_file, &dithered] {
        fs::remove_file(path).unwrap();
    }
}

#[test]
fn undecodable_source_surfaces_a_decode_error() {
    let source = temp_path("not-an-image.png");
    fs::write(&source, b"definitely not a png").unwrap();

    let err = encode_frame(&source, &TC_P74_230, BackgroundPolicy::Median, 0).unwrap_err();
    assert!(matches!(err, EpdError::Image(_)), "got {err}");

    fs::remove_file(&source).unwrap();
}
