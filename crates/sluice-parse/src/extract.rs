use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::elements::{Codec, MediaFlags, MediaInfo, Resolution};
use crate::keyword::{self, contains_any};

const BYTES_PER_GB: f64 = (1u64 << 30) as f64;

static RE_SIZE_GB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*(?:gb|gib)").unwrap());
static RE_SIZE_MB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*(?:mb|mib)").unwrap());

/// Strategy seam for metadata extraction.
///
/// `name` drives codec/resolution/marker detection. `title` (when present)
/// is preferred over `name` for literal size patterns, since upstreams tend
/// to put "4.2 GB" in the descriptive title rather than the display name.
/// `size_bytes` is the stream's numeric size field and wins over any text.
pub trait MediaExtractor: Send + Sync {
    fn extract(&self, name: &str, title: Option<&str>, size_bytes: Option<f64>) -> MediaInfo;
}

/// Default extractor: the marker tables in [`crate::keyword`] plus size
/// regexes. Total over any input.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordExtractor;

impl MediaExtractor for KeywordExtractor {
    fn extract(&self, name: &str, title: Option<&str>, size_bytes: Option<f64>) -> MediaInfo {
        let text = name.to_lowercase();
        let size_gb = match size_bytes {
            Some(bytes) => size_from_bytes(bytes),
            None => parse_size_gb(&title.unwrap_or(name).to_lowercase()),
        };

        let info = MediaInfo {
            codec: detect_codec(&text),
            resolution: detect_resolution(&text),
            size_gb,
            flags: detect_flags(&text),
        };
        trace!(input = name, codec = %info.codec, resolution = ?info.resolution, size_gb = ?info.size_gb, "extracted metadata");
        info
    }
}

/// Detect the video codec. HEVC markers are checked first, so a name
/// containing both families resolves to HEVC.
pub fn detect_codec(text: &str) -> Codec {
    if contains_any(text, keyword::HEVC_MARKERS) {
        Codec::Hevc
    } else if contains_any(text, keyword::H264_MARKERS) {
        Codec::H264
    } else {
        Codec::Unknown
    }
}

/// Detect the resolution tier; first matching token in the table's fixed
/// order wins.
pub fn detect_resolution(text: &str) -> Option<Resolution> {
    for (token, height) in keyword::RESOLUTION_MARKERS {
        if text.contains(token) {
            return match height {
                2160 => Some(Resolution::R2160),
                1080 => Some(Resolution::R1080),
                _ => Some(Resolution::R720),
            };
        }
    }
    None
}

/// Detect marker flags (HDR, Dolby Vision, 10-bit, remux, lossless audio).
pub fn detect_flags(text: &str) -> MediaFlags {
    let mut flags = MediaFlags::empty();
    if contains_any(text, keyword::HDR_MARKERS) {
        flags |= MediaFlags::HDR;
    }
    if contains_any(text, keyword::DOLBY_VISION_MARKERS) {
        flags |= MediaFlags::DOLBY_VISION;
    }
    if contains_any(text, keyword::TEN_BIT_MARKERS) {
        flags |= MediaFlags::TEN_BIT;
    }
    if contains_any(text, keyword::REMUX_MARKERS) {
        flags |= MediaFlags::REMUX;
    }
    if contains_any(text, keyword::LOSSLESS_AUDIO_MARKERS) {
        flags |= MediaFlags::LOSSLESS_AUDIO;
    }
    flags
}

/// Parse a literal "<number> gb" / "<number> mb" size out of free text.
pub fn parse_size_gb(text: &str) -> Option<f64> {
    let gb = if let Some(caps) = RE_SIZE_GB.captures(text) {
        caps[1].parse::<f64>().ok()?
    } else if let Some(caps) = RE_SIZE_MB.captures(text) {
        caps[1].parse::<f64>().ok()? / 1024.0
    } else {
        return None;
    };
    (gb > 0.0).then_some(gb)
}

/// A numeric byte size of zero carries no information; treat it as absent
/// rather than as a zero-byte file.
fn size_from_bytes(bytes: f64) -> Option<f64> {
    (bytes > 0.0).then(|| bytes / BYTES_PER_GB)
}
