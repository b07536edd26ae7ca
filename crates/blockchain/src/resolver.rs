use async_trait::async_trait;
use shared::{BalanceResult, Result};

use crate::client::StacksClient;
use crate::types::RawResponse;

/// Anything that can turn an address into a `BalanceResult`
#[async_trait]
pub trait BalanceResolver: Send + Sync {
    /// Resolve one address. Must not fail: errors belong in the result.
    async fn resolve(&self, address: &str, name: Option<&str>) -> BalanceResult;

    /// Raw response for diagnostics after a failed check
    async fn probe(&self, address: &str) -> Result<RawResponse>;

    /// Raw response for an explicit single-address inspection. Defaults to
    /// `probe`.
    async fn fetch_raw(&self, address: &str) -> Result<RawResponse> {
        self.probe(address).await
    }
}

#[async_trait]
impl BalanceResolver for StacksClient {
    async fn resolve(&self, address: &str, name: Option<&str>) -> BalanceResult {
        self.get_balance(address, name).await
    }

    async fn probe(&self, address: &str) -> Result<RawResponse> {
        StacksClient::probe(self, address).await
    }

    async fn fetch_raw(&self, address: &str) -> Result<RawResponse> {
        StacksClient::fetch_raw(self, address).await
    }
}
