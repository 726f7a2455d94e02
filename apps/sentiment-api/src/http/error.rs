use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use sentiment_application::routes::{self, DOC_ERROR_PREFIX};
use sentiment_domain::errors::ServiceError;
use sentiment_domain::value_objects::contract::Contract;
use sentiment_domain::value_objects::detail::ErrorDetail;

/// Structured error response: an HTTP status plus `{"detail": ...}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    /// Maps a failure of the analysis operation. Classifier and internal
    /// failures are 500 for both contracts.
    pub fn from_analysis(err: ServiceError, contract: Contract, expose_details: bool) -> Self {
        let prefix = routes::analysis_error_prefix(contract);
        Self::from_service(err, prefix, expose_details)
    }

    pub fn from_documentation(err: ServiceError, expose_details: bool) -> Self {
        Self::from_service(err, DOC_ERROR_PREFIX, expose_details)
    }

    fn from_service(err: ServiceError, prefix: &str, expose_details: bool) -> Self {
        match err {
            ServiceError::InvalidInput(msg) => Self::new(StatusCode::BAD_REQUEST, msg),
            ServiceError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, msg),
            ServiceError::Classifier(msg) | ServiceError::Internal(msg) => {
                let detail = if expose_details {
                    format!("{prefix}: {msg}")
                } else {
                    prefix.to_string()
                };
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, detail)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorDetail::new(self.detail))).into_response()
    }
}
