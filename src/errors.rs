//! # Errors
//!
//! Two error types live here:
//!
//! - [`FilterError`] for filter data handed to the codec by code (facet inputs
//!   from the commerce backend, applied-filter labels). Anything read from the
//!   URL is never an error; the codec recovers from it locally.
//! - [`ApiError`] for the HTTP loader. It maps to a status code, sends a
//!   JSON body and logs the rejection through `tracing`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt;

/// Invalid filter data supplied by the caller.
#[derive(Debug)]
pub enum FilterError {
    /// A facet `input` string was not valid JSON.
    InvalidJson {
        input: String,
        source: serde_json::Error,
    },
    /// A facet `input` parsed, but not to a JSON object.
    NotAnObject { input: String },
    /// Applied filters must carry a display label.
    EmptyLabel,
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidJson { input, source } => {
                write!(f, "filter input '{input}' is not valid JSON: {source}")
            }
            Self::NotAnObject { input } => {
                write!(f, "filter input '{input}' is not a JSON object")
            }
            Self::EmptyLabel => write!(f, "applied filter label must not be empty"),
        }
    }
}

impl std::error::Error for FilterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidJson { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Error returned by the collection loader handlers.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request
    BadRequest { message: String },
    /// 404 Not Found
    NotFound { resource: String },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    fn user_message(&self) -> String {
        match self {
            Self::BadRequest { message } => message.clone(),
            Self::NotFound { resource } => format!("{resource} not found"),
        }
    }

    fn log(&self) {
        tracing::debug!(
            error = %self.user_message(),
            status = %self.status_code(),
            "API error"
        );
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.user_message(),
        };
        (status, Json(body)).into_response()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl std::error::Error for ApiError {}

/// Facet data that cannot be decoded is a client mistake.
impl From<FilterError> for ApiError {
    fn from(err: FilterError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<axum::extract::rejection::JsonRejection> for ApiError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::bad_request("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::not_found("Collection").status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(
            ApiError::not_found("Collection").to_string(),
            "Collection not found"
        );
    }

    #[test]
    fn test_filter_error_converts_to_bad_request() {
        let api: ApiError = FilterError::EmptyLabel.into();
        assert_eq!(api.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(api.to_string(), "applied filter label must not be empty");
    }
}
