use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sluice_parse::{Codec, MediaInfo};

use crate::evaluate::Verdict;

/// Display name for candidates with neither a name nor a title.
pub const FALLBACK_NAME: &str = "Stream";
/// Source label for candidates whose upstream left them untagged.
pub const UNKNOWN_SOURCE: &str = "Unknown";

/// One stream candidate as received from an upstream addon.
///
/// Produced by the upstream layer and immutable past normalization.
/// Fields the engine does not interpret ride along in `extra` and are
/// emitted back untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawStream {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Size in bytes, when the upstream provides one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    /// Origin provider, tagged by the fetch layer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawStream {
    /// Display name: `name`, falling back to `title`, then a fixed label.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.title.as_deref())
            .unwrap_or(FALLBACK_NAME)
    }

    /// Source label, defaulting for untagged candidates.
    pub fn source(&self) -> &str {
        self.source.as_deref().unwrap_or(UNKNOWN_SOURCE)
    }

    /// Fill the defaults later pipeline stages rely on.
    pub fn normalize(&mut self) {
        if self.name.is_none() {
            self.name = Some(
                self.title
                    .clone()
                    .unwrap_or_else(|| FALLBACK_NAME.to_string()),
            );
        }
        if self.description.is_none() {
            self.description = Some(String::new());
        }
        if self.source.is_none() {
            self.source = Some(UNKNOWN_SOURCE.to_string());
        }
    }
}

/// A normalized candidate with its extracted metadata and verdict.
#[derive(Debug, Clone)]
pub struct EvaluatedStream {
    pub stream: RawStream,
    pub info: MediaInfo,
    pub verdict: Verdict,
    /// Position in the combined upstream list. Used only for deterministic
    /// tie-breaking; earlier arrival wins ties.
    pub index: usize,
}

/// Output record: the stream carrying its final display name, plus the
/// keys the auto-pick tie-break chain reads.
#[derive(Debug, Clone)]
pub struct RankedStream {
    pub stream: RawStream,
    pub score: u8,
    pub index: usize,
    /// Display name before annotation.
    pub original_name: String,
    pub codec: Codec,
    /// Raw byte size; `None` sorts after every known size.
    pub size: Option<f64>,
    /// Source-priority rank, lower is preferred.
    pub source_rank: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_fallbacks() {
        let stream = RawStream {
            name: Some("Named".into()),
            title: Some("Titled".into()),
            ..Default::default()
        };
        assert_eq!(stream.display_name(), "Named");

        let stream = RawStream {
            title: Some("Titled".into()),
            ..Default::default()
        };
        assert_eq!(stream.display_name(), "Titled");

        assert_eq!(RawStream::default().display_name(), FALLBACK_NAME);
    }

    #[test]
    fn test_normalize_fills_defaults() {
        let mut stream = RawStream {
            title: Some("Titled".into()),
            ..Default::default()
        };
        stream.normalize();
        assert_eq!(stream.name.as_deref(), Some("Titled"));
        assert_eq!(stream.description.as_deref(), Some(""));
        assert_eq!(stream.source.as_deref(), Some(UNKNOWN_SOURCE));
    }

    #[test]
    fn test_unknown_fields_pass_through() {
        let json = serde_json::json!({
            "name": "Movie.2023.1080p.x265",
            "infoHash": "abcdef0123456789",
            "behaviorHints": { "bingeGroup": "grp" }
        });
        let stream: RawStream = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(stream.extra["infoHash"], "abcdef0123456789");

        let back = serde_json::to_value(&stream).unwrap();
        assert_eq!(back, json);
    }
}
