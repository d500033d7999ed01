use crate::EpdError;

/// Payload bit-packing layouts, one per controller family.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PackingScheme {
    /// Half-line interleave used by the TCM source driver. Verified against
    /// captured golden frames only.
    InterleavedHalfLine,
}

/// Immutable descriptor of one panel model. Adding a model means adding a row
/// to [`PROFILES`], not new control flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelProfile {
    pub name: &'static str,
    pub x_res: u32,
    pub y_res: u32,
    /// Upload command header, precomputed with the resolution fields already
    /// embedded (bytes 1-2 x, 3-4 y, big endian).
    pub header: &'static [u8],
    pub packing: PackingScheme,
}

impl PanelProfile {
    pub fn pixel_count(&self) -> usize {
        self.x_res as usize * self.y_res as usize
    }

    /// Packed payload size in bytes.
    pub fn payload_len(&self) -> usize {
        self.pixel_count().div_ceil(8)
    }
}

/// Pervasive Displays 7.4" TCM-P74-230, 480x800 monochrome.
pub const TC_P74_230: PanelProfile = PanelProfile {
    name: "TC_P74_230",
    x_res: 480,
    y_res: 800,
    header: &[
        0x3A, // upload command
        0x01, 0xE0, // x resolution
        0x03, 0x20, // y resolution
        0x01, 0x04, // model constants
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    ],
    packing: PackingScheme::InterleavedHalfLine,
};

pub static PROFILES: &[PanelProfile] = &[TC_P74_230];

pub fn by_name(name: &str) -> Result<&'static PanelProfile, EpdError> {
    PROFILES
        .iter()
        .find(|profile| profile.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| EpdError::UnsupportedProfile {
            requested: name.to_string(),
            known: PROFILES
                .iter()
                .map(|profile| profile.name)
                .collect::<Vec<_>>()
                .join(", "),
        })
}
