use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use medi_risk::RiskError;
use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;

/// Failures surfaced to HTTP callers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body was not JSON, had the wrong content type, or did not match the
    /// eight-field schema.
    #[error("{}", .0.body_text())]
    InvalidBody(#[from] JsonRejection),
    #[error("prediction failed: {0}")]
    Prediction(#[from] RiskError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody(rejection) => rejection.status(),
            ApiError::Prediction(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{self}");
        } else {
            log::debug!("rejected request: {self}");
        }
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Reasons the service cannot start.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to load models: {0}")]
    Models(#[from] RiskError),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}
