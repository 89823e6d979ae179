//! In-memory [`ContractCaller`] serving canned return data per (contract, function).

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use alloy::primitives::{Address, Bytes};
use async_trait::async_trait;
use tokio::time::{Instant, timeout_at};

use super::abi::ContractFunction;
use super::abi::test_words::{address_word, reserves_return, string_return, uint_word};
use super::error::RepositoryError;
use crate::repository::{ContractCaller, RepoResult};

#[derive(Debug, Clone)]
pub(crate) enum MockReply {
    Data(Vec<u8>),
    Fail(String),
    Stall,
}

#[derive(Debug, Default)]
pub(crate) struct MockCaller {
    replies: HashMap<(Address, ContractFunction), MockReply>,
    calls: AtomicUsize,
}

impl MockCaller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, contract: Address, function: ContractFunction, reply: MockReply) -> Self {
        self.replies.insert((contract, function), reply);
        self
    }

    pub fn with_pool(
        self,
        pool: Address,
        token0: Address,
        token1: Address,
        reserve0: u128,
        reserve1: u128,
    ) -> Self {
        self.reply(
            pool,
            ContractFunction::GetReserves,
            MockReply::Data(reserves_return(reserve0, reserve1, 1_700_000_000)),
        )
        .reply(
            pool,
            ContractFunction::Token0,
            MockReply::Data(address_word(token0)),
        )
        .reply(
            pool,
            ContractFunction::Token1,
            MockReply::Data(address_word(token1)),
        )
    }

    pub fn with_token(self, token: Address, decimals: u8, symbol: &str) -> Self {
        self.reply(
            token,
            ContractFunction::Decimals,
            MockReply::Data(uint_word(decimals as u128)),
        )
        .reply(
            token,
            ContractFunction::Symbol,
            MockReply::Data(string_return(symbol)),
        )
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContractCaller for MockCaller {
    async fn call(&self, contract: Address, payload: Bytes, deadline: Instant) -> RepoResult<Bytes> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let reply = ContractFunction::from_selector(&payload)
            .and_then(|function| self.replies.get(&(contract, function)));

        match reply {
            Some(MockReply::Data(data)) => Ok(Bytes::from(data.clone())),
            Some(MockReply::Fail(msg)) => Err(RepositoryError::Transport(msg.clone())),
            Some(MockReply::Stall) => {
                let _ = timeout_at(deadline, std::future::pending::<()>()).await;
                Err(RepositoryError::Timeout)
            }
            // An account without code answers every eth_call with empty data
            None => Ok(Bytes::new()),
        }
    }
}
