use axum::Json;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::service::ServiceError;

/// JSON body of every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub details: String,
}

impl From<&ServiceError> for ApiError {
    fn from(err: &ServiceError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            message: err.message().to_string(),
            details: err.details(),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        if let ServiceError::InternalError(cause) = &self {
            tracing::error!("Internal error: {cause}");
        }

        (self.status_code(), Json(ApiError::from(&self))).into_response()
    }
}
