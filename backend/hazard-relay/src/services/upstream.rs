use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::Client;

use crate::error::RelayError;

/// Shared HTTP client for every relay route. Cheap to clone.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    user_agent: String,
}

/// Body and content type of a 2xx upstream response.
#[derive(Debug)]
pub struct UpstreamResponse {
    pub content_type: Option<String>,
    pub body: String,
}

impl UpstreamClient {
    pub fn new(user_agent: String, timeout_secs: u64) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self { client, user_agent })
    }

    /// GET `url` with the relay's User-Agent and the given Accept header.
    ///
    /// Non-2xx responses become `RelayError::Upstream` carrying the upstream status.
    pub async fn get(
        &self,
        name: &'static str,
        url: &str,
        query: &[(String, String)],
        accept: &'static str,
    ) -> Result<UpstreamResponse, RelayError> {
        let mut request = self
            .client
            .get(url)
            .header(USER_AGENT, self.user_agent.as_str())
            .header(ACCEPT, accept);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request
            .send()
            .await
            .map_err(|source| RelayError::Transport { name, source })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("{} upstream {} returned {}", name, url, status);
            return Err(RelayError::Upstream {
                name,
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|h| h.to_str().ok())
            .map(String::from);
        let body = response
            .text()
            .await
            .map_err(|source| RelayError::Transport { name, source })?;

        Ok(UpstreamResponse { content_type, body })
    }
}
