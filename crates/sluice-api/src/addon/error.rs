use thiserror::Error;

/// Errors from one upstream addon client.
#[derive(Debug, Error)]
pub enum AddonError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid upstream URL: {0}")]
    Url(String),

    #[error("upstream error (status {status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("parse error: {0}")]
    Parse(String),
}
