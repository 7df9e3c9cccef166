use thiserror::Error;

/// Source-level failure. Record-level problems never surface here; bad records are skipped.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned {status}")]
    Upstream { url: String, status: u16 },

    #[error("malformed payload: {0}")]
    Parse(String),

    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("all endpoints failed, last error: {0}")]
    AllEndpointsFailed(String),
}

pub type Result<T> = std::result::Result<T, FeedError>;
