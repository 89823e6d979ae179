use alloy::primitives::Address;
use axum::http::StatusCode;
use thiserror::Error;

use crate::repository::RepositoryError;

/// Every way an estimate can fail. Each variant maps to one stable status code
/// and message at the HTTP boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// A pool or token address is not `0x` followed by 40 hex digits.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// The amount is not a positive decimal integer.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// The reserve calls failed or returned data that is not a V2 pair's.
    #[error("Pool not found: {pool}")]
    PoolNotFound { pool: String },

    /// The token metadata calls failed.
    #[error("Blockchain connection error while reading token {token}")]
    BlockchainConnection { token: String },

    /// The requested tokens are not the pool's token0/token1 pair.
    #[error("Token mismatch: {src} -> {dst} is not served by pool {pool}")]
    TokenMismatch {
        pool: String,
        src: String,
        dst: String,
    },

    /// One of the reserves involved in the swap is zero.
    #[error("Insufficient liquidity in pool")]
    InsufficientLiquidity,

    /// The request deadline elapsed before every contract call completed.
    #[error("Request timed out")]
    Timeout,

    /// An unexpected internal error occurred.
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ServiceError {
    /// Maps a failed reserve fetch: anything but a timeout means the pool is unusable.
    pub fn from_pool_fetch(pool: Address, err: RepositoryError) -> Self {
        match err {
            RepositoryError::Timeout => ServiceError::Timeout,
            other => {
                tracing::warn!("Reserve fetch for pool {pool} failed: {other}");
                ServiceError::PoolNotFound {
                    pool: pool.to_string().to_lowercase(),
                }
            }
        }
    }

    /// Maps a failed token metadata fetch.
    pub fn from_token_fetch(token: Address, err: RepositoryError) -> Self {
        match err {
            RepositoryError::Timeout => ServiceError::Timeout,
            other => {
                tracing::warn!("Metadata fetch for token {token} failed: {other}");
                ServiceError::BlockchainConnection {
                    token: token.to_string().to_lowercase(),
                }
            }
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::InvalidAddress(_)
            | ServiceError::InvalidAmount(_)
            | ServiceError::TokenMismatch { .. }
            | ServiceError::InsufficientLiquidity => StatusCode::BAD_REQUEST,
            ServiceError::PoolNotFound { .. } => StatusCode::NOT_FOUND,
            ServiceError::Timeout => StatusCode::REQUEST_TIMEOUT,
            ServiceError::BlockchainConnection { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ServiceError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short human-readable summary, stable per variant.
    pub fn message(&self) -> &'static str {
        match self {
            ServiceError::InvalidAddress(_) => "Invalid address",
            ServiceError::InvalidAmount(_) => "Invalid amount",
            ServiceError::PoolNotFound { .. } => "Pool not found",
            ServiceError::BlockchainConnection { .. } => "Blockchain connection error",
            ServiceError::TokenMismatch { .. } => "Token mismatch",
            ServiceError::InsufficientLiquidity => "Insufficient liquidity",
            ServiceError::Timeout => "Request timeout",
            ServiceError::InternalError(_) => "Internal server error",
        }
    }

    /// Longer explanation safe to show to the caller. Internal errors never
    /// expose their cause.
    pub fn details(&self) -> String {
        match self {
            ServiceError::InvalidAddress(details) | ServiceError::InvalidAmount(details) => {
                details.clone()
            }
            ServiceError::PoolNotFound { pool } => {
                format!("Pool {pool} does not exist or is not a Uniswap V2 pair")
            }
            ServiceError::BlockchainConnection { token } => {
                format!("Unable to fetch metadata for token {token} from the Ethereum network")
            }
            ServiceError::TokenMismatch { .. } => {
                "Provided tokens don't match the pool tokens".to_string()
            }
            ServiceError::InsufficientLiquidity => {
                "The pool does not have enough liquidity for this swap".to_string()
            }
            ServiceError::Timeout => "The request took too long to process".to_string(),
            ServiceError::InternalError(_) => "An unexpected error occurred".to_string(),
        }
    }
}
