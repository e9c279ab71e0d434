use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Video codec detected in a release name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Codec {
    Hevc,
    H264,
    #[default]
    Unknown,
}

impl Codec {
    /// Whether detection actually found a codec.
    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }

    /// Selection preference, lower is better. HEVC beats H264 beats unknown.
    pub fn preference(self) -> u8 {
        match self {
            Self::Hevc => 0,
            Self::H264 => 1,
            Self::Unknown => 2,
        }
    }
}

impl std::fmt::Display for Codec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hevc => write!(f, "hevc"),
            Self::H264 => write!(f, "h264"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Recognized vertical resolution tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Resolution {
    R720,
    R1080,
    R2160,
}

impl Resolution {
    /// Vertical pixel count of the tier.
    pub fn height(self) -> u32 {
        match self {
            Self::R720 => 720,
            Self::R1080 => 1080,
            Self::R2160 => 2160,
        }
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}p", self.height())
    }
}

bitflags! {
    /// Release attributes detected from marker substrings in the name.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MediaFlags: u8 {
        const HDR = 0b0000_0001;
        const DOLBY_VISION = 0b0000_0010;
        const TEN_BIT = 0b0000_0100;
        const REMUX = 0b0000_1000;
        const LOSSLESS_AUDIO = 0b0001_0000;
    }
}

impl Default for MediaFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// Everything the heuristics could derive for one stream candidate.
///
/// `size_gb` of `None` means "no size data", never "zero-byte file".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaInfo {
    pub codec: Codec,
    pub resolution: Option<Resolution>,
    pub size_gb: Option<f64>,
    pub flags: MediaFlags,
}
