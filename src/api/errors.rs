//! API Error Handling
//!
//! Structured error responses with proper HTTP status codes and request
//! tracking. Engine errors map onto a small set of response kinds; the
//! body carries whether the failure is worth retrying.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::EngineError;

/// Top-level API error response with request tracking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub request_id: String,
    pub error: ErrorBody,
}

/// Error body with structured information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Error code (NOT_FOUND, CONFLICT, FORBIDDEN, ...)
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Whether retrying the same request can succeed
    pub retryable: bool,
}

/// API error with request tracking.
#[derive(Debug)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub request_id: String,
    pub retryable: bool,
}

#[derive(Debug)]
pub enum ApiErrorKind {
    NotFound(String),
    BadRequest(String),
    Forbidden(String),
    Conflict(String),
    InternalError(String),
    ServiceUnavailable(String),
}

impl ApiError {
    pub fn not_found(request_id: String, message: String) -> Self {
        Self {
            kind: ApiErrorKind::NotFound(message),
            request_id,
            retryable: false,
        }
    }

    pub fn bad_request(request_id: String, message: String) -> Self {
        Self {
            kind: ApiErrorKind::BadRequest(message),
            request_id,
            retryable: false,
        }
    }

    pub fn internal_error(request_id: String, message: String) -> Self {
        Self {
            kind: ApiErrorKind::InternalError(message),
            request_id,
            retryable: false,
        }
    }

    /// Map an engine error to a response, preserving its retryability.
    pub fn from_engine(request_id: String, error: EngineError) -> Self {
        let retryable = error.is_retryable();
        let message = error.to_string();
        let kind = match error {
            EngineError::GameNotFound(_) | EngineError::LevelNotFound(_) => {
                ApiErrorKind::NotFound(message)
            }
            EngineError::InvalidRequest(_)
            | EngineError::InsufficientQuestions { .. }
            | EngineError::InsufficientBalance { .. }
            | EngineError::GameModeMismatch { .. }
            | EngineError::GameNotJoinable(_)
            | EngineError::GameNotInProgress(_)
            | EngineError::NotEnoughPlayers { .. } => ApiErrorKind::BadRequest(message),
            EngineError::UserNotFound(_)
            | EngineError::AccountSuspended(_)
            | EngineError::SecretNotSet(_)
            | EngineError::InvalidSecret
            | EngineError::NotAParticipant { .. }
            | EngineError::NotCreator => ApiErrorKind::Forbidden(message),
            EngineError::AlreadySubmitted
            | EngineError::AlreadyJoined { .. }
            | EngineError::GameAlreadyStarted(_)
            | EngineError::GameFull(_) => ApiErrorKind::Conflict(message),
            EngineError::LedgerUnavailable(_) => ApiErrorKind::ServiceUnavailable(message),
        };
        Self {
            kind,
            request_id,
            retryable,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ApiErrorKind::NotFound(msg) => write!(f, "[{}] Not Found: {}", self.request_id, msg),
            ApiErrorKind::BadRequest(msg) => {
                write!(f, "[{}] Bad Request: {}", self.request_id, msg)
            }
            ApiErrorKind::Forbidden(msg) => write!(f, "[{}] Forbidden: {}", self.request_id, msg),
            ApiErrorKind::Conflict(msg) => write!(f, "[{}] Conflict: {}", self.request_id, msg),
            ApiErrorKind::InternalError(msg) => {
                write!(f, "[{}] Internal Error: {}", self.request_id, msg)
            }
            ApiErrorKind::ServiceUnavailable(msg) => {
                write!(f, "[{}] Service Unavailable: {}", self.request_id, msg)
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self.kind {
            ApiErrorKind::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            ApiErrorKind::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            ApiErrorKind::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
            ApiErrorKind::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            ApiErrorKind::InternalError(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg.clone())
            }
            ApiErrorKind::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "SERVICE_UNAVAILABLE",
                msg.clone(),
            ),
        };

        let body = Json(ErrorResponse {
            request_id: self.request_id.clone(),
            error: ErrorBody {
                code: code.to_string(),
                message,
                retryable: self.retryable,
            },
        });

        (status, body).into_response()
    }
}
