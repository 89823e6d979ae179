pub mod error;
pub mod estimate;
pub mod health;

pub use error::ApiError;
