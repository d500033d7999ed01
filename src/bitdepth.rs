use image::imageops::{dither, grayscale, BiLevel};
use image::RgbImage;

/// Reduces a normalized image to a flat, row-major 1-bit buffer. Output
/// samples are 0 or 255, inverted so 0 means light and 255 means mark, the
/// polarity the panel drives.
pub fn convert(image: RgbImage) -> Vec<u8> {
    let mut gray = grayscale(&image);
    dither(&mut gray, &BiLevel);
    let mut data = gray.into_raw();
    for sample in &mut data {
        *sample ^= 0xFF;
    }
    data
}
