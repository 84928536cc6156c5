//! blockchain.info ticker provider implementation

use crate::{
    constants::{REQUEST_TIMEOUT_SECS, TICKER_URL, USER_AGENT},
    error::FetchError,
    provider::TickerProvider,
    types::Snapshot,
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Ticker provider for the blockchain.info `/ticker` endpoint
///
/// Works against any endpoint that answers with a JSON object keyed by
/// currency code whose values carry a numeric `buy` field.
pub struct BlockchainInfoProvider {
    client: Client,
    url: String,
}

impl BlockchainInfoProvider {
    /// Creates a provider for the default ticker URL
    pub fn new() -> Result<Self, FetchError> {
        Self::with_url(TICKER_URL, Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    /// Creates a provider for a custom URL and request timeout
    pub fn with_url(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(FetchError::Transport)?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// URL this provider polls
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Parses a ticker response body into a snapshot
    fn parse_response(body: &str) -> Result<Snapshot, FetchError> {
        serde_json::from_str(body)
            .map_err(|e| FetchError::decode(format!("Failed to parse ticker response: {}", e)))
    }
}

#[async_trait]
impl TickerProvider for BlockchainInfoProvider {
    async fn fetch_snapshot(&self) -> Result<Snapshot, FetchError> {
        tracing::debug!(url = %self.url, "Fetching ticker");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::http_status(status.as_u16()));
        }

        let body = response.text().await.map_err(FetchError::Transport)?;
        let snapshot = Self::parse_response(&body)?;

        tracing::debug!(
            currency_count = snapshot.len(),
            "Successfully fetched ticker"
        );

        Ok(snapshot)
    }

    fn provider_name(&self) -> &'static str {
        "blockchain.info"
    }
}
