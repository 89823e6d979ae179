//! Parsing and scaling of raw integer token amounts.
//!
//! On-chain amounts are integers in a token's smallest unit. Estimates are
//! computed and returned in those raw units; the decimal-aware helpers here
//! only produce human-readable renderings for logs.

use num_bigint::BigUint;
use num_traits::Zero;

use super::ServiceResult;
use super::error::ServiceError;

/// Parse a raw amount: a non-empty string of decimal digits with a non-zero value.
///
/// Signs, separators, whitespace and fractional parts are all rejected.
pub fn parse_amount(amount: &str) -> ServiceResult<BigUint> {
    if amount.is_empty() {
        return Err(ServiceError::InvalidAmount(
            "Amount must not be empty".to_string(),
        ));
    }
    if !amount.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ServiceError::InvalidAmount(format!(
            "Amount must be a positive integer, got {amount:?}"
        )));
    }

    let value = BigUint::parse_bytes(amount.as_bytes(), 10).ok_or_else(|| {
        ServiceError::InvalidAmount(format!("Amount must be a positive integer, got {amount:?}"))
    })?;

    if value.is_zero() {
        return Err(ServiceError::InvalidAmount(
            "Amount must be greater than zero".to_string(),
        ));
    }

    Ok(value)
}

fn scale(decimals: u8) -> BigUint {
    BigUint::from(10u32).pow(decimals as u32)
}

/// Scale a smallest-unit amount down to whole tokens, truncating any fraction.
pub fn from_token_units(amount: &BigUint, decimals: u8) -> BigUint {
    amount / scale(decimals)
}

/// Format an amount from smallest unit to human-readable form
///
/// # Returns
/// Formatted amount as string with trailing zeros removed
pub fn format_units(amount: &BigUint, decimals: u8) -> String {
    let divisor = scale(decimals);
    let whole = amount / &divisor;
    let remainder = amount % &divisor;

    if remainder.is_zero() {
        whole.to_string()
    } else {
        let decimal_part = remainder.to_string();
        let padded = format!("{:0>width$}", decimal_part, width = decimals as usize);
        let trimmed = padded.trim_end_matches('0');
        format!("{whole}.{trimmed}")
    }
}
