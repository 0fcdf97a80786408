//! REST handlers and `OpenAPI` documentation.

// The OpenApi derive macro generates code that triggers this lint
#![allow(clippy::needless_for_each)]

use axum::{
    extract::{Path, Request},
    response::{IntoResponse, Response},
    Extension, Json,
};
use utoipa::OpenApi;

use crate::build_info::BuildInfo;
use crate::compare::compare_raw;
use crate::error::{AppError, ProblemDetails, ProblemExtensions};
use crate::policy::Principal;

/// Where the generated `OpenAPI` document is served.
pub const API_DOCS_PATH: &str = "/v3/api-docs";

/// `OpenAPI` documentation for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Numeric API",
        version = "1.0.0",
        description = "Compares integers against 50",
        license(name = "MIT")
    ),
    paths(get_welcome, get_comparison),
    components(schemas(ProblemDetails, ProblemExtensions))
)]
pub struct ApiDoc;

/// Welcome text
#[utoipa::path(
    get,
    path = "/",
    tag = "System",
    responses(
        (status = 200, description = "Welcome text", body = String, content_type = "text/plain")
    )
)]
#[allow(clippy::unused_async)] // Required for Axum handler signature
pub async fn get_welcome(Extension(build_info): Extension<BuildInfo>) -> String {
    format!("Welcome to numeric-api {}", build_info.version)
}

/// Compare an integer against 50
///
/// # Errors
///
/// Returns `MalformedInput` when `n` is not a base-10 64-bit integer.
#[utoipa::path(
    get,
    path = "/compare/{n}",
    tag = "Comparison",
    params(
        ("n" = i64, Path, description = "Integer to compare against 50")
    ),
    responses(
        (status = 200, description = "Comparison message", body = String, content_type = "text/plain"),
        (status = 400, description = "n is not an integer", body = ProblemDetails)
    )
)]
#[allow(clippy::unused_async)] // Required for Axum handler signature
pub async fn get_comparison(Path(n): Path<String>) -> Result<&'static str, AppError> {
    let comparison = compare_raw(&n)?;
    tracing::debug!(input = comparison.input, ordering = ?comparison.ordering, "compared");
    Ok(comparison.message())
}

#[allow(clippy::unused_async)] // Required for Axum handler signature
pub async fn get_api_docs() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// The part of a `/compare` path that `/compare/{n}` did not route: `""` for
/// `/compare` and `/compare/`, `"1/2"` for `/compare/1/2`.
fn unrouted_comparison(path: &str) -> Option<&str> {
    let rest = path.strip_prefix("/compare")?;
    if rest.is_empty() {
        return Some(rest);
    }
    rest.strip_prefix('/')
}

/// Catch-all for paths without a dedicated handler that the access policy
/// let through.
///
/// Anything under `/compare` lands here only when it is not a single
/// segment, which is never an integer.
#[allow(clippy::unused_async)] // Required for Axum handler signature
pub async fn fallback(request: Request) -> Response {
    if let Some(value) = unrouted_comparison(request.uri().path()) {
        return AppError::MalformedInput {
            value: value.to_string(),
        }
        .into_response();
    }
    protected_resource(&request).into_response()
}

fn protected_resource(request: &Request) -> String {
    let name = request
        .extensions()
        .get::<Principal>()
        .map_or("anonymous", |principal| principal.name.as_str());
    format!("Hello, {name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_documents_compare_route() {
        let doc = ApiDoc::openapi();
        let json = doc.to_json().expect("serialize");
        assert!(json.contains("/compare/{n}"));
        assert!(json.contains("ProblemDetails"));
        assert!(doc.paths.paths.contains_key("/"));
    }

    #[test]
    fn unrouted_comparison_paths() {
        assert_eq!(unrouted_comparison("/compare"), Some(""));
        assert_eq!(unrouted_comparison("/compare/"), Some(""));
        assert_eq!(unrouted_comparison("/compare/1/2"), Some("1/2"));
        assert_eq!(unrouted_comparison("/compared"), None);
        assert_eq!(unrouted_comparison("/protected"), None);
    }

    #[tokio::test]
    async fn comparison_handler_maps_errors() {
        assert_eq!(
            get_comparison(Path("51".to_string())).await,
            Ok("Greater than 50")
        );
        assert_eq!(
            get_comparison(Path("x".to_string())).await,
            Err(AppError::MalformedInput { value: "x".into() })
        );
    }
}
