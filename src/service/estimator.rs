use std::sync::Arc;

use alloy::primitives::Address;
use num_bigint::BigUint;
use tokio::time::Instant;
use tracing::instrument;

use crate::repository::{
    ContractCaller, PoolReserves, ReserveFetcher, TokenInfo, TokenMetadataFetcher,
};
use crate::service::address::parse_address;
use crate::service::math::compute_amount_out;
use crate::service::types::{EstimateRequest, EstimateResponse, SwapCalculation};
use crate::service::units::{format_units, from_token_units, parse_amount};
use crate::service::{ServiceError, ServiceResult};

/// Estimates the output of a single Uniswap V2 swap from the pool's current reserves.
///
/// Holds no per-request state; one instance serves every concurrent request.
#[derive(Clone)]
pub struct SwapEstimator {
    reserves: ReserveFetcher,
    tokens: TokenMetadataFetcher,
}

impl SwapEstimator {
    pub fn new(caller: Arc<dyn ContractCaller>) -> Self {
        Self {
            reserves: ReserveFetcher::new(caller.clone()),
            tokens: TokenMetadataFetcher::new(caller),
        }
    }

    /// Runs the full estimate. Every contract call honors `deadline`; the first
    /// failing step ends the request.
    #[instrument(skip(self), err)]
    pub async fn estimate(
        &self,
        req: &EstimateRequest,
        deadline: Instant,
    ) -> ServiceResult<EstimateResponse> {
        let pool = parse_address(&req.pool)?;
        let src = parse_address(&req.src)?;
        let dst = parse_address(&req.dst)?;
        let amount_in = parse_amount(&req.src_amount)?;

        let reserves = self
            .reserves
            .fetch(pool, deadline)
            .await
            .map_err(|e| ServiceError::from_pool_fetch(pool, e))?;

        let (token_in, token_out) = tokio::try_join!(
            self.fetch_token(src, deadline),
            self.fetch_token(dst, deadline)
        )?;

        let calculation = resolve_orientation(pool, amount_in, &reserves, token_in, token_out)?;

        let amount_out = compute_amount_out(
            &calculation.amount_in,
            &calculation.reserve_in,
            &calculation.reserve_out,
        )?;

        let token_in = &calculation.token_in;
        let token_out = &calculation.token_out;
        tracing::info!(
            "Estimated {} {} -> {} {} via pool {} (depth ~{} {} / ~{} {})",
            format_units(&calculation.amount_in, token_in.decimals),
            token_in.symbol,
            format_units(&amount_out, token_out.decimals),
            token_out.symbol,
            pool,
            from_token_units(&calculation.reserve_in, token_in.decimals),
            token_in.symbol,
            from_token_units(&calculation.reserve_out, token_out.decimals),
            token_out.symbol
        );

        Ok(EstimateResponse {
            dst_amount: amount_out.to_string(),
        })
    }

    async fn fetch_token(&self, token: Address, deadline: Instant) -> ServiceResult<TokenInfo> {
        self.tokens
            .fetch(token, deadline)
            .await
            .map_err(|e| ServiceError::from_token_fetch(token, e))
    }
}

/// Picks (reserveIn, reserveOut) from the pool's declared token order.
///
/// `token_in == token0 && token_out == token1` selects (reserve0, reserve1), the
/// reverse pairing selects (reserve1, reserve0); anything else is a mismatch.
pub fn resolve_orientation(
    pool: Address,
    amount_in: BigUint,
    reserves: &PoolReserves,
    token_in: TokenInfo,
    token_out: TokenInfo,
) -> ServiceResult<SwapCalculation> {
    let (reserve_in, reserve_out) =
        if token_in.address == reserves.token0 && token_out.address == reserves.token1 {
            (reserves.reserve0.clone(), reserves.reserve1.clone())
        } else if token_in.address == reserves.token1 && token_out.address == reserves.token0 {
            (reserves.reserve1.clone(), reserves.reserve0.clone())
        } else {
            return Err(ServiceError::TokenMismatch {
                pool: pool.to_string().to_lowercase(),
                src: token_in.address.to_string().to_lowercase(),
                dst: token_out.address.to_string().to_lowercase(),
            });
        };

    Ok(SwapCalculation {
        amount_in,
        reserve_in,
        reserve_out,
        token_in,
        token_out,
    })
}
