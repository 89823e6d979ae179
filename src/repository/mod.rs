pub mod abi;
pub mod alloy;
pub mod contract;
pub mod error;
pub mod pool;
pub mod token;

#[cfg(test)]
pub(crate) mod test_support;

use ::alloy::primitives::{Address, Bytes};
pub use alloy::AlloyContractCaller;
use async_trait::async_trait;
pub use error::RepositoryError;
pub use pool::{PoolReserves, ReserveFetcher};
pub use token::{TokenInfo, TokenMetadataFetcher};
use tokio::time::Instant;

pub(crate) type RepoResult<T> = std::result::Result<T, RepositoryError>;

/// Read-only access to contracts on an Ethereum-compatible chain.
///
/// Implementations evaluate the call at the chain's current head and must be
/// safe to share between concurrent requests.
#[async_trait]
pub trait ContractCaller: Send + Sync {
    /// Executes an `eth_call` of `payload` against `contract`.
    ///
    /// # Arguments
    ///
    /// * `contract` - The contract address to call
    /// * `payload` - ABI-encoded call data (selector followed by arguments)
    /// * `deadline` - Instant after which the outstanding call is abandoned
    ///
    /// # Returns
    ///
    /// * `Ok(Bytes)` - The raw return data
    /// * `Err(RepositoryError::Timeout)` - If `deadline` elapsed first
    /// * `Err(RepositoryError::Transport)` - If the RPC round trip failed for any other reason
    async fn call(&self, contract: Address, payload: Bytes, deadline: Instant) -> RepoResult<Bytes>;
}
