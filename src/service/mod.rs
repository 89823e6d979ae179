pub mod address;
pub mod error;
pub mod estimator;
pub mod math;
pub mod types;
pub mod units;

#[cfg(test)]
mod tests;

pub use error::ServiceError;
pub use estimator::SwapEstimator;
pub use types::*;

pub(crate) type ServiceResult<T> = std::result::Result<T, ServiceError>;
