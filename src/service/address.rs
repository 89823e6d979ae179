//! Canonical handling of externally supplied hex addresses.

use std::str::FromStr;

use alloy::primitives::Address;

use super::ServiceResult;
use super::error::ServiceError;

/// `0x` plus 40 hex digits.
pub const ADDRESS_LENGTH: usize = 42;

/// Returns the canonical lowercase form of `raw`. Shape is not checked here.
pub fn normalize(raw: &str) -> String {
    raw.to_ascii_lowercase()
}

/// True iff `raw` is exactly `0x` followed by 40 hexadecimal digits, in any case.
pub fn is_valid_address(raw: &str) -> bool {
    raw.len() == ADDRESS_LENGTH
        && raw.starts_with("0x")
        && raw[2..].bytes().all(|b| b.is_ascii_hexdigit())
}

/// Normalizes and parses `raw`, rejecting anything that is not a well-formed address.
pub fn parse_address(raw: &str) -> ServiceResult<Address> {
    let normalized = normalize(raw);
    if !is_valid_address(&normalized) {
        return Err(ServiceError::InvalidAddress(format!(
            "{raw} is not a valid Ethereum address ({ADDRESS_LENGTH} characters)"
        )));
    }

    Address::from_str(&normalized).map_err(|e| ServiceError::InvalidAddress(e.to_string()))
}
