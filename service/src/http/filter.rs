//! The request filter in front of every route.
//!
//! Each request is checked in this order:
//! 1. Path screening ([`check_request_path`]), 400 on failure
//! 2. CSRF validation when the policy is enforcing, 403 on failure
//! 3. The [`AccessPolicy`] outcome, 401 or 403 on denial
//!
//! Whatever the result, the headers carried by the policy decision are
//! stamped onto the response.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::auth::Credentials;
use super::csrf::verify_csrf;
use super::firewall::check_request_path;
use super::security::apply_security_headers;
use crate::error::AppError;
use crate::policy::{AccessPolicy, Outcome};

/// State shared with [`security_filter_middleware`].
#[derive(Debug, Clone)]
pub struct AccessState {
    pub policy: Arc<AccessPolicy>,
    pub credentials: Arc<Credentials>,
}

/// Checks that run before the policy outcome is acted on.
fn screen(state: &AccessState, req: &Request, path: &str) -> Result<(), AppError> {
    check_request_path(path).inspect_err(|_| {
        tracing::warn!(path = %path, "Rejected non-canonical request path");
    })?;

    if state.policy.mode().is_enforcing() {
        verify_csrf(req.method(), req.headers()).inspect_err(|_| {
            tracing::warn!(method = %req.method(), path = %path, "CSRF token missing or mismatched");
        })?;
    }

    Ok(())
}

/// Screen the path, check CSRF and enforce the access policy.
///
/// A permitted request reaches the router with its [`Principal`](crate::policy::Principal),
/// if any, stored as a request extension.
pub async fn security_filter_middleware(
    State(state): State<AccessState>,
    mut req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();
    let principal = state.credentials.authenticate(req.headers());
    let decision = state.policy.evaluate(&path, principal.as_ref());

    let mut response = if let Err(err) = screen(&state, &req, &path) {
        err.into_response()
    } else {
        match decision.outcome {
            Outcome::Permit => {
                if let Some(principal) = principal {
                    req.extensions_mut().insert(principal);
                }
                next.run(req).await
            }
            Outcome::Unauthorized => {
                tracing::debug!(path = %path, "Authentication required");
                AppError::Unauthorized.into_response()
            }
            Outcome::Forbidden => {
                tracing::debug!(path = %path, "No access rule permits this request");
                AppError::Forbidden.into_response()
            }
        }
    };

    apply_security_headers(&decision.required_headers, &mut response);
    response
}
