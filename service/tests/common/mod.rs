//! Common test utilities for integration tests.
//!
//! - [`app_builder::TestAppBuilder`] builds routers that mirror main.rs wiring
//! - the helpers below build requests and read responses

#![allow(dead_code)]

pub mod app_builder;

use axum::{
    body::{to_bytes, Body},
    http::{
        header::{
            AUTHORIZATION, CONTENT_SECURITY_POLICY, STRICT_TRANSPORT_SECURITY,
            X_CONTENT_TYPE_OPTIONS, X_XSS_PROTECTION,
        },
        HeaderMap, HeaderValue, Method, Request, Response,
    },
};
use base64::{engine::general_purpose::STANDARD, Engine};

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

pub fn get_as(uri: &str, username: &str, password: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, basic_auth(username, password))
        .body(Body::empty())
        .expect("request")
}

pub fn request(method: Method, uri: &str) -> axum::http::request::Builder {
    Request::builder().method(method).uri(uri)
}

pub fn basic_auth(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

/// Assert the four production headers carry their default values.
pub fn assert_security_headers(headers: &HeaderMap) {
    assert_eq!(
        headers.get(CONTENT_SECURITY_POLICY),
        Some(&HeaderValue::from_static(
            "default-src 'self'; script-src 'self'; object-src 'none'"
        ))
    );
    assert_eq!(
        headers.get(X_XSS_PROTECTION),
        Some(&HeaderValue::from_static("1; mode=block"))
    );
    assert_eq!(
        headers.get(X_CONTENT_TYPE_OPTIONS),
        Some(&HeaderValue::from_static("nosniff"))
    );
    assert_eq!(
        headers.get(STRICT_TRANSPORT_SECURITY),
        Some(&HeaderValue::from_static(
            "max-age=31536000; includeSubDomains; preload"
        ))
    );
}

/// Assert none of the production headers are present.
pub fn assert_no_security_headers(headers: &HeaderMap) {
    for name in [
        CONTENT_SECURITY_POLICY,
        X_XSS_PROTECTION,
        X_CONTENT_TYPE_OPTIONS,
        STRICT_TRANSPORT_SECURITY,
    ] {
        assert!(headers.get(&name).is_none(), "{name} should be absent");
    }
}
