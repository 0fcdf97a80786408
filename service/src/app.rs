//! Router assembly shared by `main.rs` and the integration tests.
//!
//! Layer order, outermost first:
//! 1. Request tracing
//! 2. Security filter: path screening, CSRF (production), access policy and
//!    the policy's response headers
//! 3. Routes and fallback

use std::sync::Arc;

use axum::{middleware, routing::get, Extension, Router};
use tower_http::trace::TraceLayer;

use crate::build_info::BuildInfo;
use crate::http::{security_filter_middleware, AccessState, Credentials};
use crate::policy::AccessPolicy;
use crate::rest::{self, API_DOCS_PATH};

/// Build the application router for a resolved policy.
#[must_use]
pub fn build_router(policy: AccessPolicy, credentials: Credentials, build_info: BuildInfo) -> Router {
    let access = AccessState {
        policy: Arc::new(policy),
        credentials: Arc::new(credentials),
    };

    Router::new()
        .route("/", get(rest::get_welcome))
        .route("/compare/{n}", get(rest::get_comparison))
        .route(API_DOCS_PATH, get(rest::get_api_docs))
        .fallback(rest::fallback)
        .layer(Extension(build_info))
        .layer(middleware::from_fn_with_state(
            access,
            security_filter_middleware,
        ))
        .layer(TraceLayer::new_for_http())
}
