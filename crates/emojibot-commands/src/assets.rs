//! [`AssetFetcher`] over reqwest.

use async_trait::async_trait;
use emojibot_common::{AssetFetcher, EmojiError, Result};
use emojibot_config::AssetsConfig;
use tracing::debug;

/// Fetches emoji images from the CDN with a shared connection pool.
#[derive(Debug, Clone)]
pub struct HttpAssetFetcher {
    client: reqwest::Client,
}

impl HttpAssetFetcher {
    /// Creates a fetcher with the configured timeout and user agent.
    pub fn new(config: &AssetsConfig) -> std::result::Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client })
    }
}

fn transport_error(url: &str, error: &reqwest::Error) -> EmojiError {
    EmojiError::Transport {
        url: url.to_string(),
        message: error.to_string(),
        status: error.status().map(|status| status.as_u16()),
    }
}

#[async_trait]
impl AssetFetcher for HttpAssetFetcher {
    async fn read_bytes(&self, url: String) -> Result<Vec<u8>> {
        debug!(%url, "Fetching emoji asset");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| transport_error(&url, &e))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| transport_error(&url, &e))?;

        Ok(bytes.to_vec())
    }
}
