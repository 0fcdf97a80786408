//! Double-submit CSRF protection.
//!
//! State-changing requests must echo the value of the `XSRF-TOKEN` cookie in
//! the `X-XSRF-TOKEN` header. A cross-site page can make the browser send the
//! cookie but cannot read it, so it cannot forge the header. Safe methods
//! pass untouched.

use axum::http::{header::COOKIE, HeaderMap, Method};

use crate::error::AppError;

pub const CSRF_COOKIE: &str = "XSRF-TOKEN";
pub const CSRF_HEADER: &str = "x-xsrf-token";

/// Value of the named cookie across all `Cookie` headers.
fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

/// Check a request's CSRF token.
///
/// # Errors
/// Returns [`AppError::CsrfRejected`] when an unsafe request lacks the
/// cookie or header, or when they differ.
pub fn verify_csrf(method: &Method, headers: &HeaderMap) -> Result<(), AppError> {
    // GET, HEAD, OPTIONS and TRACE
    if method.is_safe() {
        return Ok(());
    }

    let cookie = cookie_value(headers, CSRF_COOKIE).filter(|v| !v.is_empty());
    let header = headers
        .get(CSRF_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty());

    match (cookie, header) {
        (Some(cookie), Some(header)) if cookie == header => Ok(()),
        _ => Err(AppError::CsrfRejected),
    }
}
