use serde::Deserialize;

use sluice_core::RawStream;

/// Wire shape of an addon stream response.
#[derive(Debug, Deserialize)]
pub struct StreamsResponse {
    #[serde(default)]
    pub streams: Vec<RawStream>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_streams_field_defaults_to_empty() {
        let body: StreamsResponse = serde_json::from_str("{}").unwrap();
        assert!(body.streams.is_empty());
    }

    #[test]
    fn test_streams_parse_with_passthrough_fields() {
        let body: StreamsResponse = serde_json::from_str(
            r#"{
                "streams": [
                    {
                        "name": "Movie.2023.1080p.x265",
                        "infoHash": "0123456789abcdef",
                        "fileIdx": 2
                    }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(body.streams.len(), 1);
        assert_eq!(body.streams[0].display_name(), "Movie.2023.1080p.x265");
        assert_eq!(body.streams[0].extra["fileIdx"], 2);
    }
}
