use reqwest::{Client, StatusCode};
use serde_json::Value;
use shared::config::ApiConfig;
use shared::models::UNKNOWN_WALLET_NAME;
use shared::{Balance, BalanceResult, CheckError, Error, Result};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::response::normalize_account;
use crate::types::{snippet, RawResponse, BODY_SNIPPET_LEN};

/// Client for the Stacks account-info endpoint.
///
/// Owns its HTTP client, base URL and timeouts; nothing is shared globally.
/// Requests are never retried.
pub struct StacksClient {
    client: Client,
    base_url: String,
    request_timeout: Duration,
    probe_timeout: Duration,
}

impl StacksClient {
    /// Create a client from the API section of the configuration
    pub fn new(config: &ApiConfig) -> Result<Self> {
        info!("Initializing Stacks client with API base: {}", config.base_url);

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| Error::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            request_timeout: config.timeout(),
            probe_timeout: config.probe_timeout(),
        })
    }

    /// Full account-info URL for an address
    pub fn account_url(&self, address: &str) -> String {
        format!("{}{}", self.base_url, address)
    }

    /// Resolve the balance of one address. Every failure is folded into the
    /// returned result.
    pub async fn get_balance(&self, address: &str, name: Option<&str>) -> BalanceResult {
        let name = name.unwrap_or(UNKNOWN_WALLET_NAME);

        match self.fetch_balance(address).await {
            Ok(balance) => {
                debug!(
                    "Resolved {} ({}): {} µSTX available, {} µSTX locked",
                    name, address, balance.balance, balance.locked
                );
                BalanceResult::success(name, address, balance)
            }
            Err(e) => {
                warn!(
                    address = %address,
                    kind = e.kind(),
                    "Balance check failed for {}: {}",
                    name,
                    e
                );
                BalanceResult::failure(name, address, e)
            }
        }
    }

    async fn fetch_balance(&self, address: &str) -> std::result::Result<Balance, CheckError> {
        let url = self.account_url(address);
        debug!("Fetching account info: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CheckError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(http_error(status, &body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| CheckError::Network(e.to_string()))?;

        let data: Value =
            serde_json::from_str(&body).map_err(|e| CheckError::Parsing(e.to_string()))?;

        normalize_account(&data)
    }

    /// Fetch the raw account response without normalizing it, using the
    /// shorter probe timeout. Transport failures are returned as errors.
    pub async fn probe(&self, address: &str) -> Result<RawResponse> {
        self.raw_request(address, self.probe_timeout).await
    }

    /// Same as [`probe`](Self::probe) but with the full request timeout
    pub async fn fetch_raw(&self, address: &str) -> Result<RawResponse> {
        self.raw_request(address, self.request_timeout).await
    }

    async fn raw_request(&self, address: &str, timeout: Duration) -> Result<RawResponse> {
        let url = self.account_url(address);
        debug!("Requesting raw account info {} (timeout {:?})", url, timeout);

        let response = self
            .client
            .get(&url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| Error::Http(format!("Failed to send probe request: {}", e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Http(format!("Failed to read probe response: {}", e)))?;

        Ok(RawResponse { url, status, body })
    }
}

/// Map a non-2xx status to a failure, with friendlier text for the statuses
/// users can act on
pub fn http_error(status: StatusCode, body: &str) -> CheckError {
    let message = match status {
        StatusCode::NOT_FOUND => "Wallet address not found or invalid".to_string(),
        StatusCode::TOO_MANY_REQUESTS => {
            "Rate limit exceeded. Try increasing delay between requests".to_string()
        }
        _ => format!(
            "HTTP Error {}: {}",
            status.as_u16(),
            snippet(body.trim(), BODY_SNIPPET_LEN)
        ),
    };

    CheckError::Http {
        status: status.as_u16(),
        message,
    }
}
