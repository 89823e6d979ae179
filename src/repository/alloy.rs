use alloy::primitives::{Address, Bytes};
use alloy::providers::Provider;
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use tokio::time::{Instant, timeout_at};
use tracing::instrument;

use super::error::RepositoryError;
use crate::repository::{ContractCaller, RepoResult};

/// [`ContractCaller`] backed by an alloy HTTP provider.
///
/// The provider's underlying HTTP client pools connections, so a single
/// instance is shared by every in-flight request.
#[derive(Clone)]
pub struct AlloyContractCaller<P> {
    provider: P,
}

impl<P: Provider + Clone + 'static> AlloyContractCaller<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl<P: Provider + Clone + Send + Sync + 'static> ContractCaller for AlloyContractCaller<P> {
    #[instrument(skip(self, payload), err)]
    async fn call(&self, contract: Address, payload: Bytes, deadline: Instant) -> RepoResult<Bytes> {
        let tx = TransactionRequest::default().to(contract).input(payload.into());

        match timeout_at(deadline, self.provider.call(tx)).await {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(e)) => {
                if e.to_string().contains("429") {
                    tracing::warn!("Rate limited while calling {}", contract);
                }
                Err(RepositoryError::Transport(e.to_string()))
            }
            Err(_) => Err(RepositoryError::Timeout),
        }
    }
}
