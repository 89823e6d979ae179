//! Uniswap V2 constant-product output calculation.

use num_bigint::BigUint;
use num_traits::Zero;

use super::ServiceResult;
use super::error::ServiceError;

/// Share of the input retained after the 0.3% LP fee, over [`FEE_DENOMINATOR`].
pub const FEE_NUMERATOR: u32 = 997;
pub const FEE_DENOMINATOR: u32 = 1000;

/// Output amount for an exact-input swap, bit-exact with `UniswapV2Library.getAmountOut`.
///
/// `amountOut = amountIn * 997 * reserveOut / (reserveIn * 1000 + amountIn * 997)`,
/// floor-divided once at the end. Arithmetic is arbitrary precision, so no
/// input size overflows.
pub fn compute_amount_out(
    amount_in: &BigUint,
    reserve_in: &BigUint,
    reserve_out: &BigUint,
) -> ServiceResult<BigUint> {
    if amount_in.is_zero() {
        return Err(ServiceError::InvalidAmount(
            "Amount must be greater than zero".to_string(),
        ));
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(ServiceError::InsufficientLiquidity);
    }

    let amount_in_with_fee = amount_in * FEE_NUMERATOR;
    let numerator = &amount_in_with_fee * reserve_out;
    let denominator = reserve_in * FEE_DENOMINATOR + amount_in_with_fee;

    Ok(numerator / denominator)
}
