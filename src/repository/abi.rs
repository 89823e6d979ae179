//! Encoding and decoding of the fixed set of read-only contract calls.
//!
//! Every call issued by the estimator takes zero arguments, so a payload is
//! exactly the 4-byte selector of the function's canonical signature. Return
//! data is decoded strictly against the declared output types: short buffers,
//! words with non-zero padding outside the declared width and strings that are
//! not UTF-8 all yield [`RepositoryError::Decode`].

use std::fmt;

use alloy::primitives::{Address, Bytes};
use alloy::sol_types::SolCall;
use num_bigint::BigUint;

use super::RepoResult;
use super::contract::{IERC20, IUniswapV2Pair};
use super::error::RepositoryError;

/// The closed set of contract functions the estimator knows how to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractFunction {
    Decimals,
    Symbol,
    GetReserves,
    Token0,
    Token1,
}

impl ContractFunction {
    pub const ALL: [ContractFunction; 5] = [
        ContractFunction::Decimals,
        ContractFunction::Symbol,
        ContractFunction::GetReserves,
        ContractFunction::Token0,
        ContractFunction::Token1,
    ];

    /// Canonical signature string the selector is derived from, e.g. `getReserves()`.
    pub fn signature(self) -> &'static str {
        match self {
            ContractFunction::Decimals => IERC20::decimalsCall::SIGNATURE,
            ContractFunction::Symbol => IERC20::symbolCall::SIGNATURE,
            ContractFunction::GetReserves => IUniswapV2Pair::getReservesCall::SIGNATURE,
            ContractFunction::Token0 => IUniswapV2Pair::token0Call::SIGNATURE,
            ContractFunction::Token1 => IUniswapV2Pair::token1Call::SIGNATURE,
        }
    }

    /// First four bytes of the keccak-256 hash of [`Self::signature`].
    pub fn selector(self) -> [u8; 4] {
        match self {
            ContractFunction::Decimals => IERC20::decimalsCall::SELECTOR,
            ContractFunction::Symbol => IERC20::symbolCall::SELECTOR,
            ContractFunction::GetReserves => IUniswapV2Pair::getReservesCall::SELECTOR,
            ContractFunction::Token0 => IUniswapV2Pair::token0Call::SELECTOR,
            ContractFunction::Token1 => IUniswapV2Pair::token1Call::SELECTOR,
        }
    }

    /// Looks a function up by the first four bytes of a call payload.
    pub fn from_selector(selector: &[u8]) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|function| function.selector().as_slice() == selector)
    }
}

impl fmt::Display for ContractFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.signature())
    }
}

/// A single decoded return value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiValue {
    Uint { bits: u16, value: BigUint },
    Address(Address),
    String(String),
}

/// Builds the call payload for `function`.
pub fn encode_call(function: ContractFunction) -> Bytes {
    let payload = match function {
        ContractFunction::Decimals => IERC20::decimalsCall {}.abi_encode(),
        ContractFunction::Symbol => IERC20::symbolCall {}.abi_encode(),
        ContractFunction::GetReserves => IUniswapV2Pair::getReservesCall {}.abi_encode(),
        ContractFunction::Token0 => IUniswapV2Pair::token0Call {}.abi_encode(),
        ContractFunction::Token1 => IUniswapV2Pair::token1Call {}.abi_encode(),
    };
    Bytes::from(payload)
}

/// Decodes raw return data into the function's declared output tuple.
pub fn decode_return(function: ContractFunction, data: &[u8]) -> RepoResult<Vec<AbiValue>> {
    let values = match function {
        ContractFunction::Decimals => vec![AbiValue::Uint {
            bits: 8,
            value: BigUint::from(decode_decimals(data)?),
        }],
        ContractFunction::Symbol => vec![AbiValue::String(decode_symbol(data)?)],
        ContractFunction::GetReserves => {
            let reserves = decode_reserves(data)?;
            vec![
                AbiValue::Uint {
                    bits: 112,
                    value: reserves.reserve0,
                },
                AbiValue::Uint {
                    bits: 112,
                    value: reserves.reserve1,
                },
                AbiValue::Uint {
                    bits: 32,
                    value: BigUint::from(reserves.block_timestamp_last),
                },
            ]
        }
        ContractFunction::Token0 | ContractFunction::Token1 => {
            vec![AbiValue::Address(decode_address(function, data)?)]
        }
    };
    Ok(values)
}

/// Decoded output of `getReserves()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReserves {
    pub reserve0: BigUint,
    pub reserve1: BigUint,
    pub block_timestamp_last: u32,
}

pub fn decode_reserves(data: &[u8]) -> RepoResult<RawReserves> {
    let decoded = IUniswapV2Pair::getReservesCall::abi_decode_returns_validate(data)
        .map_err(|e| decode_error(ContractFunction::GetReserves, e))?;

    // uint112 always fits in u128
    Ok(RawReserves {
        reserve0: BigUint::from(decoded.reserve0.to::<u128>()),
        reserve1: BigUint::from(decoded.reserve1.to::<u128>()),
        block_timestamp_last: decoded.blockTimestampLast,
    })
}

/// Decodes the single `address` returned by `token0()` or `token1()`.
pub fn decode_address(function: ContractFunction, data: &[u8]) -> RepoResult<Address> {
    match function {
        ContractFunction::Token0 => IUniswapV2Pair::token0Call::abi_decode_returns_validate(data),
        ContractFunction::Token1 => IUniswapV2Pair::token1Call::abi_decode_returns_validate(data),
        other => {
            return Err(RepositoryError::Decode(format!(
                "{other} does not return an address"
            )));
        }
    }
    .map_err(|e| decode_error(function, e))
}

pub fn decode_decimals(data: &[u8]) -> RepoResult<u8> {
    IERC20::decimalsCall::abi_decode_returns_validate(data)
        .map_err(|e| decode_error(ContractFunction::Decimals, e))
}

pub fn decode_symbol(data: &[u8]) -> RepoResult<String> {
    IERC20::symbolCall::abi_decode_returns_validate(data)
        .map_err(|e| decode_error(ContractFunction::Symbol, e))
}

fn decode_error(function: ContractFunction, err: impl fmt::Display) -> RepositoryError {
    RepositoryError::Decode(format!("failed to decode {function} return data: {err}"))
}
