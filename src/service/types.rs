use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::repository::TokenInfo;

/// Query parameters of an estimate. Missing parameters deserialize as empty
/// strings and are rejected by validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimateRequest {
    /// Uniswap V2 pair address
    pub pool: String,
    /// Token sold into the pool
    pub src: String,
    /// Token bought from the pool
    pub dst: String,
    /// Input amount in the source token's smallest unit, as a decimal integer
    pub src_amount: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateResponse {
    /// Output amount in the destination token's smallest unit, as a decimal integer
    pub dst_amount: String,
}

/// Inputs of one swap, with the pool's reserves oriented input/output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapCalculation {
    pub amount_in: BigUint,
    pub reserve_in: BigUint,
    pub reserve_out: BigUint,
    pub token_in: TokenInfo,
    pub token_out: TokenInfo,
}
