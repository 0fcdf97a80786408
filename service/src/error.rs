//! Request-level errors rendered as RFC 7807 Problem Details.

// The ToSchema derive macro generates code that triggers this lint
#![allow(clippy::needless_for_each)]

use axum::{
    http::{header::WWW_AUTHENTICATE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Serialize, Serializer};
use utoipa::ToSchema;

/// Realm announced in `WWW-Authenticate` challenges.
pub const AUTH_REALM: &str = "numeric-api";

/// Every way a single request can fail. None of them are retried and none
/// outlive the request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("Full authentication is required to access this resource")]
    Unauthorized,

    #[error("Access to this resource is denied")]
    Forbidden,

    #[error("Missing or mismatched CSRF token")]
    CsrfRejected,

    #[error("'{value}' is not a valid integer")]
    MalformedInput { value: String },

    #[error("The request path '{path}' is not in canonical form")]
    RejectedPath { path: String },
}

impl AppError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden | Self::CsrfRejected => StatusCode::FORBIDDEN,
            Self::MalformedInput { .. } | Self::RejectedPath { .. } => StatusCode::BAD_REQUEST,
        }
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::CsrfRejected => "CSRF_REJECTED",
            Self::MalformedInput { .. } => "MALFORMED_INPUT",
            Self::RejectedPath { .. } => "REJECTED_PATH",
        }
    }

    const fn slug(&self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::CsrfRejected => "csrf",
            Self::MalformedInput { .. } => "malformed-input",
            Self::RejectedPath { .. } => "rejected-path",
        }
    }
}

/// Serialize a `StatusCode` as its `u16` representation.
#[allow(clippy::trivially_copy_pass_by_ref)] // serde requires `&T` signature
fn serialize_status_code<S: Serializer>(status: &StatusCode, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u16(status.as_u16())
}

/// RFC 7807 Problem Details error response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProblemDetails {
    /// URI reference identifying the problem type
    #[serde(rename = "type")]
    pub problem_type: String,
    /// Short human-readable summary
    pub title: String,
    /// HTTP status code
    #[serde(serialize_with = "serialize_status_code")]
    #[schema(value_type = u16)]
    pub status: StatusCode,
    /// Human-readable explanation specific to this occurrence
    pub detail: String,
    /// URI reference identifying the specific occurrence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<ProblemExtensions>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProblemExtensions {
    /// Machine-readable error code
    pub code: String,
}

impl From<&AppError> for ProblemDetails {
    fn from(err: &AppError) -> Self {
        let status = err.status();
        Self {
            problem_type: format!("https://numeric-api.dev/errors/{}", err.slug()),
            title: status
                .canonical_reason()
                .unwrap_or("Error")
                .to_string(),
            status,
            detail: err.to_string(),
            instance: None,
            extensions: Some(ProblemExtensions {
                code: err.code().to_string(),
            }),
        }
    }
}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut response = ProblemDetails::from(&self).into_response();
        if self == Self::Unauthorized {
            if let Ok(challenge) = HeaderValue::from_str(&format!("Basic realm=\"{AUTH_REALM}\""))
            {
                response.headers_mut().insert(WWW_AUTHENTICATE, challenge);
            }
        }
        response
    }
}
