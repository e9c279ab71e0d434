//! Concurrent fan-out across every configured upstream.

use futures::future::join_all;
use tracing::{debug, warn};

use sluice_core::RawStream;

use crate::traits::StreamProvider;

/// Fetch candidates from every provider concurrently and combine them in
/// provider order.
///
/// Failures are isolated per upstream: a non-2xx response, network error
/// or malformed payload contributes an empty set and is logged, never
/// propagated. The combined list is only returned once every fetch has
/// settled.
pub async fn fetch_all<P: StreamProvider>(
    providers: &[P],
    media_type: &str,
    media_id: &str,
) -> Vec<RawStream> {
    let fetches = providers.iter().map(|provider| async move {
        match provider.fetch_streams(media_type, media_id).await {
            Ok(streams) => {
                debug!(
                    upstream = provider.name(),
                    count = streams.len(),
                    "upstream contributed streams"
                );
                streams
            }
            Err(err) => {
                warn!(
                    upstream = provider.name(),
                    error = %err,
                    "upstream fetch failed; contributing no streams"
                );
                Vec::new()
            }
        }
    });

    join_all(fetches).await.into_iter().flatten().collect()
}
