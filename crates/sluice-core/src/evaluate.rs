//! Device-profile evaluation of a single candidate's extracted metadata.

use sluice_parse::{Codec, MediaFlags, MediaInfo};

use crate::profile::Profile;

/// Oversize beyond this multiple of the cap is flagged as very likely to fail.
const SEVERE_OVERSIZE_FACTOR: f64 = 1.5;

/// Human-readable caution attached to a candidate's display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Warning {
    HdrUnsupported,
    DolbyVisionUnsupported,
    TenBitUnsupported,
    RemuxBitrate,
    LosslessAudio,
    InefficientCodec,
    OversizeSevere,
    Oversize,
    OverResolutionCap,
    NearResolutionCap,
    WeakMetadata,
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HdrUnsupported => write!(f, "HDR not supported"),
            Self::DolbyVisionUnsupported => write!(f, "Dolby Vision not supported"),
            Self::TenBitUnsupported => write!(f, "10bit not supported"),
            Self::RemuxBitrate => write!(f, "REMUX – very high bitrate"),
            Self::LosslessAudio => write!(f, "Lossless audio may cause buffering"),
            Self::InefficientCodec => write!(f, "x264 is inefficient for this device"),
            Self::OversizeSevere => write!(f, "Very likely to fail: too large for this device"),
            Self::Oversize => write!(f, "Too large for this device"),
            Self::OverResolutionCap => write!(f, "Resolution exceeds device limits"),
            Self::NearResolutionCap => write!(f, "Near device resolution limit"),
            Self::WeakMetadata => write!(f, "Unknown codec or metadata"),
        }
    }
}

/// Playability verdict of one candidate against one profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub playable: bool,
    /// 0 to 100.
    pub score: u8,
    /// Ordered and distinct.
    pub warnings: Vec<Warning>,
}

impl Verdict {
    /// Hard rejection: not playable, zero score, no warnings.
    fn rejected() -> Self {
        Self {
            playable: false,
            score: 0,
            warnings: Vec::new(),
        }
    }
}

/// Score a candidate's metadata against a device profile.
///
/// Deterministic and total. Past the hard-reject gates every check runs,
/// accumulating warnings and penalties in a fixed order, and the final
/// score is clamped to [0, 100].
pub fn evaluate(info: &MediaInfo, profile: &Profile) -> Verdict {
    // Hard rejects short-circuit everything else.
    if !profile.allow_codecs.is_empty()
        && info.codec.is_known()
        && !profile.allow_codecs.contains(&info.codec)
    {
        return Verdict::rejected();
    }
    if info.flags.contains(MediaFlags::REMUX) && profile.block_remux {
        return Verdict::rejected();
    }

    let mut warnings = Vec::new();
    let mut score: i32 = 100;

    if info.flags.contains(MediaFlags::HDR) && !profile.allow_hdr {
        warnings.push(Warning::HdrUnsupported);
        score -= 15;
    }
    if info.flags.contains(MediaFlags::DOLBY_VISION) && !profile.allow_dolby_vision {
        warnings.push(Warning::DolbyVisionUnsupported);
        score -= 15;
    }
    if info.flags.contains(MediaFlags::TEN_BIT) && !profile.allow_10bit {
        warnings.push(Warning::TenBitUnsupported);
    }
    if info.flags.contains(MediaFlags::REMUX) {
        // Not blocked (gated above), merely tolerated.
        warnings.push(Warning::RemuxBitrate);
        score -= 30;
    }
    if info.flags.contains(MediaFlags::LOSSLESS_AUDIO) && profile.warn_lossless_audio {
        warnings.push(Warning::LosslessAudio);
        score -= 15;
    }
    if info.codec == Codec::H264 && profile.is_weakest_device() {
        warnings.push(Warning::InefficientCodec);
        score -= 20;
    }
    if let (Some(cap), Some(size)) = (profile.max_file_size_gb, info.size_gb) {
        if size > cap {
            if size > cap * SEVERE_OVERSIZE_FACTOR {
                warnings.push(Warning::OversizeSevere);
                score -= 25;
            } else {
                warnings.push(Warning::Oversize);
                score -= 10;
            }
        }
    }
    if let (Some(cap), Some(resolution)) = (profile.max_resolution, info.resolution) {
        if resolution.height() > cap {
            warnings.push(Warning::OverResolutionCap);
        }
        // At exactly the cap the weakest device is already struggling;
        // both warnings can fire for a stream above AND at a cap boundary.
        if resolution.height() == cap && profile.is_weakest_device() {
            warnings.push(Warning::NearResolutionCap);
            score -= 10;
        }
    }
    if info.codec == Codec::Unknown || (info.resolution.is_none() && info.size_gb.is_none()) {
        warnings.push(Warning::WeakMetadata);
        score -= 10;
    }

    Verdict {
        playable: true,
        score: score.clamp(0, 100) as u8,
        warnings,
    }
}
