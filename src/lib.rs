pub mod bitdepth;
pub mod encode;
pub mod normalize;
pub mod profile;

pub use bitdepth::convert;
pub use encode::{generate_header, generate_payload};
pub use normalize::{acquire_and_normalize, BackgroundPolicy};
pub use profile::{PackingScheme, PanelProfile, PROFILES, TC_P74_230};

use image::GrayImage;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum EpdError {
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("no panel profile named {requested} (known: {known})")]
    UnsupportedProfile { requested: String, known: String },
    #[error("bit buffer holds {actual} samples, panel expects {expected}")]
    PayloadSize { expected: usize, actual: usize },
}

/// One complete frame for a panel: command header plus packed pixel payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFrame {
    pub header: Vec<u8>,
    pub payload: Vec<u8>,
}

impl EncodedFrame {
    /// The `header ++ payload` sequence the transport sends to the panel.
    pub fn into_bytes(self) -> Vec<u8> {
        let mut bytes = self.header;
        bytes.extend_from_slice(&self.payload);
        bytes
    }
}

fn normalized_bits(
    source: &Path,
    profile: &PanelProfile,
    background: BackgroundPolicy,
    rotate_count: i32,
) -> Result<Vec<u8>, EpdError> {
    let img = acquire_and_normalize(source, profile, background, rotate_count)?;
    let bits = bitdepth::convert(img);
    info!("Reduced to 1-bit, {} samples", bits.len());
    Ok(bits)
}

fn frame_from_bits(profile: &PanelProfile, bits: &[u8]) -> Result<EncodedFrame, EpdError> {
    Ok(EncodedFrame {
        header: generate_header(profile),
        payload: generate_payload(profile, bits)?,
    })
}

/// Runs the full pipeline for one source image: decode, normalize, dither
/// down to 1-bit, pack.
pub fn encode_frame(
    source: &Path,
    profile: &PanelProfile,
    background: BackgroundPolicy,
    rotate_count: i32,
) -> Result<EncodedFrame, EpdError> {
    let bits = normalized_bits(source, profile, background, rotate_count)?;
    frame_from_bits(profile, &bits)
}

/// Converts `file` and writes the frame bytes to `out_file`, optionally
/// dumping the dithered intermediate for inspection. Returns the number of
/// bytes written.
pub fn convert_file(
    file: &Path,
    out_file: &Path,
    profile: &PanelProfile,
    background: BackgroundPolicy,
    rotate_count: i32,
    dithered_file: Option<&Path>,
) -> Result<usize, EpdError> {
    let bits = normalized_bits(file, profile, background, rotate_count)?;

    if let Some(dither_path) = dithered_file {
        // Undo the panel polarity so the dump is viewable.
        let samples = bits.iter().map(|v| v ^ 0xFF).collect();
        if let Some(dithered) = GrayImage::from_raw(profile.x_res, profile.y_res, samples) {
            dithered.save(dither_path)?;
            info!("Saved dithered image to {}", dither_path.display());
        }
    }

    let frame = frame_from_bits(profile, &bits)?;
    let bytes = frame.into_bytes();
    let mut out = File::create(out_file)?;
    out.write_all(&bytes)?;
    info!("Frame written to {} ({} bytes)", out_file.display(), bytes.len());
    Ok(bytes.len())
}
