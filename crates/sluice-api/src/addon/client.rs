use reqwest::Client;
use url::Url;

use sluice_core::RawStream;

use super::error::AddonError;
use super::types::StreamsResponse;
use crate::traits::StreamProvider;

const USER_AGENT: &str = concat!("sluice/", env!("CARGO_PKG_VERSION"));
const FETCH_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// Client for one upstream speaking the addon stream protocol:
/// `GET {base_url}/stream/{type}/{id}.json` returning `{"streams": [...]}`.
pub struct AddonClient {
    name: String,
    base_url: Url,
    http: Client,
}

impl AddonClient {
    pub fn new(name: &str, base_url: &str, http: Client) -> Result<Self, AddonError> {
        let base_url = Url::parse(base_url).map_err(|e| AddonError::Url(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(AddonError::Url(format!("{base_url} cannot be a base URL")));
        }
        Ok(Self {
            name: name.to_string(),
            base_url,
            http,
        })
    }

    /// Build the stream endpoint with percent-encoded path segments.
    fn endpoint(&self, media_type: &str, media_id: &str) -> Url {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .expect("checked to be a base URL in new()")
            .pop_if_empty()
            .push("stream")
            .push(media_type)
            .push(&format!("{media_id}.json"));
        url
    }

    async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, AddonError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            Err(AddonError::Upstream { status, message })
        }
    }
}

impl StreamProvider for AddonClient {
    type Error = AddonError;

    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_streams(
        &self,
        media_type: &str,
        media_id: &str,
    ) -> Result<Vec<RawStream>, AddonError> {
        let url = self.endpoint(media_type, media_id);
        let resp = self
            .http
            .get(url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .send()
            .await?;

        let resp = Self::check_response(resp).await?;
        let body: StreamsResponse = resp
            .json()
            .await
            .map_err(|e| AddonError::Parse(e.to_string()))?;

        // Whatever the upstream claims, streams carry OUR name for it.
        Ok(body
            .streams
            .into_iter()
            .map(|mut stream| {
                stream.source = Some(self.name.clone());
                stream
            })
            .collect())
    }
}
