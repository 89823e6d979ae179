use std::sync::Arc;
use std::time::{Duration, Instant};

use alloy::providers::ProviderBuilder;
use anyhow::Context;
use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;

use crate::config::Config;
use crate::handlers::{estimate, health};
use crate::middleware::panic::catch_panic_layer;
use crate::middleware::trace::http_trace_layer;
use crate::repository::{AlloyContractCaller, ContractCaller};
use crate::service::SwapEstimator;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub estimator: Arc<SwapEstimator>,
    pub request_timeout: Duration,
    pub version: String,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(caller: Arc<dyn ContractCaller>, request_timeout: Duration, version: &str) -> Self {
        Self {
            estimator: Arc::new(SwapEstimator::new(caller)),
            request_timeout,
            version: version.to_string(),
            started_at: Instant::now(),
        }
    }

    /// Connects to the configured RPC endpoint.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let rpc_url = config
            .rpc
            .url
            .parse()
            .with_context(|| format!("invalid RPC url: {}", config.rpc.url))?;
        let provider = ProviderBuilder::new().connect_http(rpc_url);

        Ok(Self::new(
            Arc::new(AlloyContractCaller::new(provider)),
            config.request_timeout(),
            &config.app.version,
        ))
    }
}

pub fn build_app(state: AppState) -> Router {
    let api = Router::new()
        .route("/estimate", get(estimate::estimate))
        .route("/health", get(health::health))
        .route("/ready", get(health::ready));

    Router::new()
        .route("/", get(health::root))
        .merge(api.clone())
        .nest("/api/v1", api)
        .layer(catch_panic_layer())
        .layer(CorsLayer::permissive())
        .layer(http_trace_layer())
        .with_state(state)
}
