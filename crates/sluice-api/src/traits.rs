//! Trait definitions for upstream stream providers.
//!
//! Every upstream client implements [`StreamProvider`], keeping the
//! fan-out and the server shell provider-agnostic.

use std::future::Future;

use sluice_core::RawStream;

/// A source of stream candidates for one piece of content.
pub trait StreamProvider: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Human-readable source name, stamped onto every returned stream.
    fn name(&self) -> &str;

    /// Fetch candidates for a content type ("movie", "series") and ID.
    fn fetch_streams(
        &self,
        media_type: &str,
        media_id: &str,
    ) -> impl Future<Output = Result<Vec<RawStream>, Self::Error>> + Send;
}
