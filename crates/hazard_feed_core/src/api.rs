//! HTTP plumbing shared by the source fetchers.
use std::time::Duration;

use reqwest::header::{HeaderValue, ACCEPT, USER_AGENT};
use reqwest::Client;

use crate::error::{FeedError, Result};

const CLIENT_USER_AGENT: &str = "hazard-feed-core/0.1 (disaster relief map)";

/// The injected client every fetcher shares. Construct once per application.
pub fn build_client(timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(CLIENT_USER_AGENT)
        .build()?;
    Ok(client)
}

/// GET `url` and return the body, mapping non-2xx to `FeedError::Upstream`.
pub(crate) async fn get_text(client: &Client, url: &str, accept: &'static str) -> Result<String> {
    let resp = client
        .get(url)
        .header(ACCEPT, HeaderValue::from_static(accept))
        .header(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT))
        .send()
        .await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(FeedError::Upstream {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(resp.text().await?)
}
