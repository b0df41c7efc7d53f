//! Error taxonomy for the service.
//!
//! [`ValidationError`] stops a request at the front door, [`GatewayError`]
//! never leaves the adapter (it is folded into an `AuthorizationResult`), and
//! [`ConfigError`] aborts startup.

use crate::domain::authorization::{ErrorEnvelope, ErrorPayload, FailureKind};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("request body could not be decoded: {0}")]
    MalformedBody(String),

    #[error("token is required")]
    MissingToken,

    #[error("total must be a non-negative decimal, got {0:?}")]
    InvalidTotal(String),

    #[error("currency must be a three-letter ISO 4217 code, got {0:?}")]
    InvalidCurrency(String),

    #[error("{0} must not be empty")]
    EmptyField(&'static str),
}

impl ValidationError {
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::MalformedBody(_) => "MALFORMED_BODY",
            ValidationError::MissingToken => "MISSING_TOKEN",
            ValidationError::InvalidTotal(_) => "INVALID_TOTAL",
            ValidationError::InvalidCurrency(_) => "INVALID_CURRENCY",
            ValidationError::EmptyField(_) => "EMPTY_FIELD",
        }
    }
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        let body = ErrorEnvelope {
            error: ErrorPayload {
                code: self.code().to_string(),
                message: self.to_string(),
                details: None,
            },
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("gateway timed out after {0}ms")]
    Timeout(u64),

    #[error("gateway unreachable: {0}")]
    Network(String),

    #[error("gateway rejected credentials: {message}")]
    Credentials { message: String, code: Option<String> },

    #[error("{message}")]
    Declined { message: String, code: Option<String> },

    #[error("unexpected gateway response: {0}")]
    Malformed(String),
}

impl GatewayError {
    pub fn kind(&self) -> FailureKind {
        match self {
            GatewayError::Timeout(_) => FailureKind::Timeout,
            GatewayError::Network(_) => FailureKind::Network,
            GatewayError::Credentials { .. } => FailureKind::Credentials,
            GatewayError::Declined { .. } => FailureKind::Declined,
            GatewayError::Malformed(_) => FailureKind::Malformed,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}
