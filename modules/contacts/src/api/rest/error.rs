use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::api::rest::envelope::Envelope;
use crate::domain::error::DomainError;

/// Error half of every handler result, rendered as an error envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvelopeError {
    pub status: StatusCode,
    pub msg: String,
}

pub type ApiResult<T> = Result<Envelope<T>, EnvelopeError>;

impl EnvelopeError {
    pub fn new(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status,
            msg: msg.into(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, msg)
    }
}

impl IntoResponse for EnvelopeError {
    fn into_response(self) -> Response {
        (self.status, Json(Envelope::error(self.status, self.msg))).into_response()
    }
}

/// Map domain error to an error envelope
pub fn map_domain_error(e: &DomainError) -> EnvelopeError {
    match e {
        DomainError::UserNotFound { .. } => EnvelopeError::new(StatusCode::NOT_FOUND, e.to_string()),
        DomainError::UserAlreadyExists { .. } => {
            EnvelopeError::new(StatusCode::CONFLICT, e.to_string())
        }
        DomainError::Validation { .. } => EnvelopeError::bad_request(e.to_string()),
        DomainError::Database { .. } => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = ?e, "Database error occurred");
            EnvelopeError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
        }
    }
}

impl From<DomainError> for EnvelopeError {
    fn from(e: DomainError) -> Self {
        map_domain_error(&e)
    }
}

// Binding failures are all client errors, whatever status axum would pick.

impl From<JsonRejection> for EnvelopeError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected request body");
        Self::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for EnvelopeError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected path parameter");
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for EnvelopeError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected query string");
        Self::bad_request(rejection.body_text())
    }
}
