use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;

use clara_audit::AuditError;
use clara_limiter::Decision;
use clara_registry::RegistryError;
use clara_types::TypeError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("missing or invalid X-Admin-ID header")]
    Unauthorized,

    #[error("rate limit exceeded")]
    AdmissionDenied(Decision),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Audit(#[from] AuditError),

    #[error(transparent)]
    BadEntity(#[from] TypeError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

impl ServerError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::AdmissionDenied(_) => StatusCode::TOO_MANY_REQUESTS,
            Self::Registry(RegistryError::NotFound) => StatusCode::NOT_FOUND,
            Self::Registry(
                RegistryError::DuplicateTaxId
                | RegistryError::InvalidTaxId(_)
                | RegistryError::PreconditionFailed(_),
            ) => StatusCode::BAD_REQUEST,
            Self::Registry(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Audit(AuditError::EntityNotFound { .. }) => StatusCode::NOT_FOUND,
            Self::BadEntity(_) => StatusCode::BAD_REQUEST,
            Self::Config(_) | Self::Io(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let mut response = (status, Json(json!({ "error": self.to_string() }))).into_response();
        if let Self::AdmissionDenied(decision) = self {
            crate::limit::apply_headers(response.headers_mut(), &decision);
            if let Some(reset_at) = decision.reset_at {
                let retry = (reset_at - chrono::Utc::now()).num_seconds().max(0);
                if let Ok(value) = HeaderValue::from_str(&retry.to_string()) {
                    response.headers_mut().insert("retry-after", value);
                }
            }
        }
        response
    }
}
