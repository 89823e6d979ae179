use std::sync::Arc;

use alloy::primitives::Address;
use tokio::time::Instant;
use tracing::instrument;

use super::abi::{ContractFunction, decode_decimals, decode_symbol, encode_call};
use crate::repository::{ContractCaller, RepoResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub address: Address,
    pub decimals: u8,
    pub symbol: String,
}

/// Reads ERC20 metadata for a token. Fetched fresh on every request.
#[derive(Clone)]
pub struct TokenMetadataFetcher {
    caller: Arc<dyn ContractCaller>,
}

impl TokenMetadataFetcher {
    pub fn new(caller: Arc<dyn ContractCaller>) -> Self {
        Self { caller }
    }

    #[instrument(skip(self), err)]
    pub async fn fetch(&self, token: Address, deadline: Instant) -> RepoResult<TokenInfo> {
        let output = self
            .caller
            .call(token, encode_call(ContractFunction::Decimals), deadline)
            .await?;
        let decimals = decode_decimals(&output)?;

        let output = self
            .caller
            .call(token, encode_call(ContractFunction::Symbol), deadline)
            .await?;
        let symbol = decode_symbol(&output)?;

        Ok(TokenInfo {
            address: token,
            decimals,
            symbol,
        })
    }
}
