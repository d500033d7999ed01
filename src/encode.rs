use crate::profile::{PackingScheme, PanelProfile};
use crate::EpdError;

/// Returns the profile's upload command header. The template already embeds
/// the resolution fields, so this is a straight copy.
pub fn generate_header(profile: &PanelProfile) -> Vec<u8> {
    profile.header.to_vec()
}

/// Packs a row-major 1-bit buffer (a sample is set iff non-zero) into the
/// payload byte layout the panel's controller scans. The buffer must hold
/// exactly one sample per panel pixel.
pub fn generate_payload(profile: &PanelProfile, bits: &[u8]) -> Result<Vec<u8>, EpdError> {
    let expected = profile.pixel_count();
    if bits.len() != expected {
        return Err(EpdError::PayloadSize {
            expected,
            actual: bits.len(),
        });
    }
    Ok(match profile.packing {
        PackingScheme::InterleavedHalfLine => pack_interleaved_half_line(profile, bits),
    })
}

/// TCM source driver layout. Each line of `x_res` pixels fills `x_res / 8`
/// byte lanes: an 8-pixel group packs MSB-first and then shifts up one bit
/// (the group's leading pixel falls off the top); even-numbered groups land
/// in the high half of the line, odd-numbered groups in the low half, both
/// walking downward. Reproduces the captured golden frames bit for bit;
/// lanes those captures never exercised are unverified against hardware.
fn pack_interleaved_half_line(profile: &PanelProfile, bits: &[u8]) -> Vec<u8> {
    let line_px = profile.x_res as usize;
    debug_assert_eq!(line_px % 16, 0);
    let lanes = line_px / 8;

    let mut payload = vec![0u8; profile.payload_len()];
    for (line, row) in bits.chunks_exact(line_px).enumerate() {
        let base = line * lanes;
        for (group, samples) in row.chunks_exact(8).enumerate() {
            let mut lane_byte = 0u8;
            for &sample in samples {
                lane_byte = (lane_byte << 1) | u8::from(sample != 0);
            }
            lane_byte <<= 1;
            let lane = if group % 2 == 0 {
                lanes - 1 - group / 2
            } else {
                lanes / 2 - 1 - (group - 1) / 2
            };
            payload[base + lane] = lane_byte;
        }
    }
    payload
}
