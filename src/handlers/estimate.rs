use std::time::Instant as StdInstant;

use axum::Json;
use axum::extract::{Query, State};
use tokio::time::Instant;

use crate::app::AppState;
use crate::service::address::{is_valid_address, normalize};
use crate::service::units::parse_amount;
use crate::service::{EstimateRequest, EstimateResponse, ServiceError};

/// `GET /estimate?pool=0x...&src=0x...&dst=0x...&src_amount=1000000`
pub async fn estimate(
    State(state): State<AppState>,
    Query(request): Query<EstimateRequest>,
) -> Result<Json<EstimateResponse>, ServiceError> {
    let started_at = StdInstant::now();
    let deadline = Instant::now() + state.request_timeout;

    validate_request(&request)?;

    match state.estimator.estimate(&request, deadline).await {
        Ok(response) => {
            tracing::info!(
                latency_ms = started_at.elapsed().as_millis() as u64,
                "Estimate request completed"
            );
            Ok(Json(response))
        }
        Err(err) => {
            tracing::warn!(
                latency_ms = started_at.elapsed().as_millis() as u64,
                status = err.status_code().as_u16(),
                "Estimate request failed: {err}"
            );
            Err(err)
        }
    }
}

/// Rejects malformed parameters before any contract is called.
pub fn validate_request(request: &EstimateRequest) -> Result<(), ServiceError> {
    if !is_valid_address(&request.pool) {
        return Err(ServiceError::InvalidAddress(
            "Pool address must be a valid Ethereum address (42 characters)".to_string(),
        ));
    }
    if !is_valid_address(&request.src) {
        return Err(ServiceError::InvalidAddress(
            "Source token address must be a valid Ethereum address".to_string(),
        ));
    }
    if !is_valid_address(&request.dst) {
        return Err(ServiceError::InvalidAddress(
            "Destination token address must be a valid Ethereum address".to_string(),
        ));
    }

    parse_amount(&request.src_amount)?;

    if normalize(&request.src) == normalize(&request.dst) {
        return Err(ServiceError::InvalidAddress(
            "Source and destination tokens must be different".to_string(),
        ));
    }

    Ok(())
}
