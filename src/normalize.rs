use crate::profile::PanelProfile;
use crate::EpdError;
use image::imageops::{replace, FilterType};
use image::{DynamicImage, GenericImageView, Rgb, RgbImage};
use std::path::Path;
use tracing::info;

/// How the border around an undersized image gets filled.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BackgroundPolicy {
    Fixed(Rgb<u8>),
    /// Per-channel median of the resized image.
    Median,
}

/// Decodes `source` and normalizes it to the profile's exact resolution. The
/// decoded image is owned by this call and dropped once the normalized buffer
/// exists; a failed decode propagates as [`EpdError::Image`].
pub fn acquire_and_normalize(
    source: &Path,
    profile: &PanelProfile,
    background: BackgroundPolicy,
    rotate_count: i32,
) -> Result<RgbImage, EpdError> {
    let img = image::open(source)?;
    info!("Opened image {}", source.display());
    Ok(normalize(img, profile, background, rotate_count))
}

/// Rotates, shrinks to fit and pastes onto a filled canvas so the output is
/// always exactly `x_res` by `y_res`. An image already at the target
/// resolution passes through untouched.
pub fn normalize(
    img: DynamicImage,
    profile: &PanelProfile,
    background: BackgroundPolicy,
    rotate_count: i32,
) -> RgbImage {
    // Positive counts rotate counter-clockwise, 90 degrees per step.
    let img = match rotate_count.rem_euclid(4) {
        1 => img.rotate270(),
        2 => img.rotate180(),
        3 => img.rotate90(),
        _ => img,
    };

    if img.dimensions() == (profile.x_res, profile.y_res) {
        return img.into_rgb8();
    }

    // Shrink to fit within the panel, never upscale.
    let img = if img.width() > profile.x_res || img.height() > profile.y_res {
        let img = img.resize(profile.x_res, profile.y_res, FilterType::Lanczos3);
        info!("Resized to {}x{}", img.width(), img.height());
        img
    } else {
        img
    };
    let img = img.into_rgb8();

    let fill = match background {
        BackgroundPolicy::Fixed(colour) => colour,
        BackgroundPolicy::Median => median_colour(&img),
    };

    let mut canvas = RgbImage::from_pixel(profile.x_res, profile.y_res, fill);
    let x_off = i64::from((profile.x_res - img.width()) / 2);
    let y_off = i64::from((profile.y_res - img.height()) / 2);
    replace(&mut canvas, &img, x_off, y_off);
    canvas
}

fn median_colour(img: &RgbImage) -> Rgb<u8> {
    let pixel_count = (img.width() * img.height()) as usize;
    let mut red = Vec::with_capacity(pixel_count);
    let mut green = Vec::with_capacity(pixel_count);
    let mut blue = Vec::with_capacity(pixel_count);
    for pixel in img.pixels() {
        red.push(pixel[0]);
        green.push(pixel[1]);
        blue.push(pixel[2]);
    }
    Rgb::from([
        channel_median(&mut red),
        channel_median(&mut green),
        channel_median(&mut blue),
    ])
}

fn channel_median(channel: &mut [u8]) -> u8 {
    if channel.is_empty() {
        return 0;
    }
    channel.sort_unstable();
    let mid = channel.len() / 2;
    if channel.len() % 2 == 1 {
        channel[mid]
    } else {
        ((u16::from(channel[mid - 1]) + u16::from(channel[mid])) / 2) as u8
    }
}
