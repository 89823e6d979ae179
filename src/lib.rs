pub mod app;
pub mod config;
pub mod handlers;
pub mod middleware;
pub mod repository;
pub mod service;

pub use app::{AppState, build_app};

// Re-export commonly used types for tests
pub use handlers::ApiError;
pub use repository::{ContractCaller, RepositoryError};
pub use service::{EstimateRequest, EstimateResponse, ServiceError, SwapEstimator};
