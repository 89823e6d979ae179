use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    /// The RPC round trip failed: connection refused, endpoint error, revert,
    /// malformed JSON-RPC response.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The caller-supplied deadline elapsed before the call completed.
    #[error("Contract call timed out")]
    Timeout,

    /// The call succeeded but its return data does not match the declared ABI.
    #[error("Decode error: {0}")]
    Decode(String),
}
