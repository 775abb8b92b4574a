use async_trait::async_trait;
use common::models::{BalanceSet, InvalidBalance};

use crate::remote::ApiError;

/// Anything that can produce the account's balances with a single call.
///
/// `BalanceClient` is the network implementation. Retry or caching
/// policies belong in wrappers around this trait, not in the client.
#[async_trait]
pub trait BalanceSource: Send + Sync {
    async fn fetch_balances(&self) -> Result<BalanceSet, ApiError>;
}

/// Conversion from a deserialized wire record into a validated model.
pub trait RemoteResponse<T> {
    fn to_model(&self) -> Result<T, InvalidBalance>;
}
