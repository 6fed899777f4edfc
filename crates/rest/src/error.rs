//! Error types for the gallery API.
//!
//! Every error is rendered as a JSON body of the form
//! `{"ok": false, "error": <code>, "message": <text>, "field": <key>?}`.
//!
//! # Error Mapping
//!
//! | Source | HTTP Status | Code |
//! |--------|-------------|------|
//! | Unknown slug | 404 | not-found |
//! | Malformed body | 400 | invalid |
//! | Missing inquiry field | 400 | validation |
//! | Relay failure | 500 | relay |
//! | Inquiry template failure | 500 | exception |
//! | Store failure on a detail page | 500 | exception |
//! | Store unreachable on readiness | 503 | unavailable |

use axum::{
    Json,
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
};
use gallery_content::{FetchError, InquiryError};
use gallery_persistence::StorageError;
use http::StatusCode;
use serde::Serialize;
use thiserror::Error;

/// Result type for handlers.
pub type RestResult<T> = Result<T, RestError>;

/// Errors returned by the gallery API.
#[derive(Debug, Error)]
pub enum RestError {
    /// Nothing is published under the requested slug.
    #[error("{kind} not found: {slug}")]
    NotFound { kind: &'static str, slug: String },

    /// The request body could not be decoded.
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// A required inquiry field is missing or blank.
    #[error("Missing required field: {field}")]
    Validation { field: &'static str },

    /// The inquiry could not be delivered.
    #[error("Relay failure: {message}")]
    Relay { message: String },

    /// The store failed while serving the request.
    #[error("Internal error: {message}")]
    Internal { message: String },

    /// The store is not reachable.
    #[error("Service unavailable: {message}")]
    Unavailable { message: String },
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    ok: bool,
    error: &'a str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'a str>,
}

impl RestError {
    /// The HTTP status this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            RestError::NotFound { .. } => StatusCode::NOT_FOUND,
            RestError::BadRequest { .. } | RestError::Validation { .. } => StatusCode::BAD_REQUEST,
            RestError::Relay { .. } | RestError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            RestError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// The machine-readable code in the `error` key.
    pub fn code(&self) -> &'static str {
        match self {
            RestError::NotFound { .. } => "not-found",
            RestError::BadRequest { .. } => "invalid",
            RestError::Validation { .. } => "validation",
            RestError::Relay { .. } => "relay",
            RestError::Internal { .. } => "exception",
            RestError::Unavailable { .. } => "unavailable",
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (message, field) = match &self {
            RestError::NotFound { kind, slug } => {
                (format!("No {} is published under '{}'", kind, slug), None)
            }
            RestError::BadRequest { message } => (message.clone(), None),
            RestError::Validation { field } => {
                (format!("Please fill in the {} field.", field), Some(*field))
            }
            // Internal details stay in the logs.
            RestError::Relay { .. } => (
                "Your inquiry could not be sent. Please try again later.".to_string(),
                None,
            ),
            RestError::Internal { .. } => ("Something went wrong.".to_string(), None),
            RestError::Unavailable { message } => (message.clone(), None),
        };

        let body = ErrorBody {
            ok: false,
            error: self.code(),
            message,
            field,
        };
        (status, Json(body)).into_response()
    }
}

impl From<FetchError> for RestError {
    fn from(err: FetchError) -> Self {
        RestError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<StorageError> for RestError {
    fn from(err: StorageError) -> Self {
        RestError::Unavailable {
            message: err.to_string(),
        }
    }
}

impl From<InquiryError> for RestError {
    fn from(err: InquiryError) -> Self {
        match err {
            InquiryError::Validation { field } => RestError::Validation { field },
            InquiryError::Relay(e) => RestError::Relay {
                message: e.to_string(),
            },
            InquiryError::Template(e) => RestError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<JsonRejection> for RestError {
    fn from(rejection: JsonRejection) -> Self {
        RestError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gallery_content::RelayError;

    #[test]
    fn test_status_codes() {
        let not_found = RestError::NotFound {
            kind: "artist",
            slug: "nobody".to_string(),
        };
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let validation: RestError = InquiryError::Validation { field: "email" }.into();
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);
        assert_eq!(validation.code(), "validation");

        let relay: RestError = InquiryError::Relay(RelayError::NotConfigured).into();
        assert_eq!(relay.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(relay.code(), "relay");
    }

    #[test]
    fn test_response_status() {
        let response = RestError::Validation { field: "city" }.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = RestError::Internal {
            message: "disk on fire".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_display() {
        let err = RestError::NotFound {
            kind: "artwork",
            slug: "dune".to_string(),
        };
        assert_eq!(err.to_string(), "artwork not found: dune");
    }
}
