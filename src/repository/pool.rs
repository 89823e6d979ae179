use std::sync::Arc;

use alloy::primitives::Address;
use num_bigint::BigUint;
use tokio::time::Instant;
use tracing::instrument;

use super::abi::{ContractFunction, decode_address, decode_reserves, encode_call};
use super::error::RepositoryError;
use crate::repository::{ContractCaller, RepoResult};

/// Current state of a Uniswap V2 pair, as reported by the pair contract.
///
/// Both reserves come from a single `getReserves()` call and are consistent
/// with each other at that block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolReserves {
    pub reserve0: BigUint,
    pub reserve1: BigUint,
    pub token0: Address,
    pub token1: Address,
    pub last_update_time: u32,
}

/// Reads reserves and token ordering from a pair contract.
#[derive(Clone)]
pub struct ReserveFetcher {
    caller: Arc<dyn ContractCaller>,
}

impl ReserveFetcher {
    pub fn new(caller: Arc<dyn ContractCaller>) -> Self {
        Self { caller }
    }

    /// Issues `getReserves`, `token0` and `token1` against `pool`, in that order.
    ///
    /// All three calls must succeed. Nothing is retried.
    #[instrument(skip(self), err)]
    pub async fn fetch(&self, pool: Address, deadline: Instant) -> RepoResult<PoolReserves> {
        let output = self
            .caller
            .call(pool, encode_call(ContractFunction::GetReserves), deadline)
            .await?;
        let reserves = decode_reserves(&output)?;

        let token0 = self.fetch_token(pool, ContractFunction::Token0, deadline).await?;
        let token1 = self.fetch_token(pool, ContractFunction::Token1, deadline).await?;

        if token0 == token1 {
            return Err(RepositoryError::Decode(format!(
                "pair {pool} reports identical token0 and token1 {token0}"
            )));
        }

        tracing::debug!(
            "Fetched pool {} - token0: {}, token1: {}, reserves: {}/{}",
            pool,
            token0,
            token1,
            reserves.reserve0,
            reserves.reserve1
        );

        Ok(PoolReserves {
            reserve0: reserves.reserve0,
            reserve1: reserves.reserve1,
            token0,
            token1,
            last_update_time: reserves.block_timestamp_last,
        })
    }

    async fn fetch_token(
        &self,
        pool: Address,
        function: ContractFunction,
        deadline: Instant,
    ) -> RepoResult<Address> {
        let output = self
            .caller
            .call(pool, encode_call(function), deadline)
            .await?;
        decode_address(function, &output)
    }
}
