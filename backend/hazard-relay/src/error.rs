use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

/// Relay failures, rendered as `{"error": "..."}` envelopes.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("FIRMS API key is required (pass apiKey or set FIRMS_API_KEY)")]
    MissingApiKey,

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("{name} upstream returned {status}")]
    Upstream { name: &'static str, status: u16 },

    #[error("Failed to fetch {name} data")]
    Transport {
        name: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to process {name} data")]
    Parse { name: &'static str, message: String },
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MissingApiKey | RelayError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            RelayError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            RelayError::Transport { .. } | RelayError::Parse { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            RelayError::Transport { name, source } => {
                tracing::error!("Error fetching {}: {:?}", name, source);
            }
            RelayError::Parse { name, message } => {
                tracing::error!("Error processing {}: {}", name, message);
            }
            other => tracing::warn!("Relay request rejected: {}", other),
        }

        (status, Json(serde_json::json!({"error": self.to_string()}))).into_response()
    }
}
