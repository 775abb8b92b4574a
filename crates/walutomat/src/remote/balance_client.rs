use std::time::Duration;

use async_trait::async_trait;
use common::models::BalanceSet;
use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::remote::balances_response::parse_balances;
use crate::remote::error::ApiError;
use crate::remote::{API_KEY_HEADER, BALANCES_PATH};
use crate::traits::BalanceSource;

const USER_AGENT: &str = concat!("walutomat-balances/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct BalanceClient {
    client: Client,
    base_url: String,
    config: ClientConfig,
}

impl BalanceClient {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self::with_http_client(config, client))
    }

    /// Uses a caller-built transport, e.g. one with a different timeout or proxy.
    pub fn with_http_client(config: ClientConfig, client: Client) -> Self {
        Self {
            client,
            base_url: config.base_url().to_string(),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// One authenticated GET of the wallet balances. Never retried.
    pub async fn fetch_balances(&self) -> Result<BalanceSet, ApiError> {
        let url = format!("{}{}", self.base_url, BALANCES_PATH);
        debug!(
            "Requesting balances from {} ({})",
            url,
            self.config.environment_name()
        );

        let resp = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, self.config.api_key())
            .send()
            .await
            .inspect_err(|e| warn!("Balance request did not complete: {}", e))?;

        let status = resp.status();
        let body = resp.text().await?;

        if status != StatusCode::OK {
            warn!("Balance request failed with status {}", status);
            return Err(ApiError::request_failed(status, &body));
        }

        let balances = parse_balances(&body)
            .inspect_err(|e| warn!("Balance response rejected: {}", e))?;

        info!("Fetched {} balances", balances.len());
        Ok(balances)
    }

    #[cfg(test)]
    fn with_base_url(config: ClientConfig, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.to_string(),
            config,
        }
    }
}

#[async_trait]
impl BalanceSource for BalanceClient {
    async fn fetch_balances(&self) -> Result<BalanceSet, ApiError> {
        BalanceClient::fetch_balances(self).await
    }
}
