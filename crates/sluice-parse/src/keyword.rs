//! Marker substring tables for release-name heuristics.
//!
//! All tables are lowercase; callers lowercase the haystack once before
//! scanning. Matching is plain substring containment, not token lookup.
//! Release names are too irregular to tokenize reliably, so the false
//! positives this admits (e.g. "dv" inside an unrelated word) are the
//! accepted trade-off of the heuristic.

/// HEVC markers. Checked before [`H264_MARKERS`], so a name carrying both
/// families resolves to HEVC.
pub const HEVC_MARKERS: &[&str] = &["hevc", "x265", "h265"];

/// H264 markers.
pub const H264_MARKERS: &[&str] = &["x264", "h264", "avc"];

pub const HDR_MARKERS: &[&str] = &["hdr"];

pub const DOLBY_VISION_MARKERS: &[&str] = &["dolby vision", "dolbyvision", "dv"];

pub const TEN_BIT_MARKERS: &[&str] = &["10bit", "10 bit", "10-bit"];

pub const REMUX_MARKERS: &[&str] = &["remux"];

/// Lossless or very-high-bitrate audio markers.
pub const LOSSLESS_AUDIO_MARKERS: &[&str] =
    &["truehd", "dts-hd", "dts hd", "dts-hd ma", "dts ma", "atmos", "flac"];

/// Resolution tokens paired with their tier height, in check order.
/// The order is the contract: a name carrying several tokens resolves to
/// the first entry here that matches, not the numerically highest.
pub const RESOLUTION_MARKERS: &[(&str, u32)] =
    &[("2160p", 2160), ("4k", 2160), ("1080p", 1080), ("720p", 720)];

/// True when any marker in `markers` occurs in `text`.
pub fn contains_any(text: &str, markers: &[&str]) -> bool {
    markers.iter().any(|marker| text.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_any() {
        assert!(contains_any("movie.2160p.hevc", HEVC_MARKERS));
        assert!(!contains_any("movie.2160p.hevc", H264_MARKERS));
        assert!(contains_any("movie truehd 7.1", LOSSLESS_AUDIO_MARKERS));
        assert!(!contains_any("", REMUX_MARKERS));
    }

    #[test]
    fn test_resolution_order_prefers_2160_tokens() {
        let first = RESOLUTION_MARKERS
            .iter()
            .find(|(token, _)| "4k 1080p".contains(token));
        assert_eq!(first.map(|(_, h)| *h), Some(2160));
    }
}
