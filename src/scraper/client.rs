//! HTTP client wrapper.
//!
//! One shared reqwest client carrying a browser-like user agent. Fetches are
//! sequential by construction: every call is awaited before the next request
//! is issued, so this wrapper never fans out.

use reqwest::Response;
use tracing::debug;

use crate::config::HttpConfig;
use crate::error::Result;

pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }

    /// Fetch a page body as text.
    ///
    /// Status codes are not treated as errors here: the source serves block
    /// pages under assorted statuses, and the page parsers probe the content
    /// itself to decide whether a fetch was usable.
    pub async fn fetch_html(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        Ok(response.text().await?)
    }

    /// Issue a GET and hand the raw response back so the caller can inspect
    /// the status before deserializing.
    pub async fn get(&self, url: &str) -> Result<Response> {
        debug!("GET {}", url);
        Ok(self.client.get(url).send().await?)
    }
}
