//! Security headers middleware for HTTP responses.
//!
//! Production mode stamps a fixed set of headers (CSP, HSTS, XSS and
//! content-type sniffing protection) onto every response, including error
//! responses.

use axum::{
    http::{
        header::{
            CONTENT_SECURITY_POLICY, STRICT_TRANSPORT_SECURITY, X_CONTENT_TYPE_OPTIONS,
            X_XSS_PROTECTION,
        },
        HeaderMap, HeaderValue,
    },
    response::Response,
};

use crate::config::SecurityHeadersConfig;

/// Format the `Strict-Transport-Security` value from configuration.
#[must_use]
pub fn hsts_value(config: &SecurityHeadersConfig) -> String {
    let mut value = format!("max-age={}", config.hsts_max_age);
    if config.hsts_include_subdomains {
        value.push_str("; includeSubDomains");
    }
    if config.hsts_preload {
        value.push_str("; preload");
    }
    value
}

/// Build security headers from configuration.
#[must_use]
pub fn build_security_headers(config: &SecurityHeadersConfig) -> HeaderMap {
    let mut headers = HeaderMap::new();

    // Content-Security-Policy
    if let Ok(value) = HeaderValue::from_str(&config.content_security_policy) {
        headers.insert(CONTENT_SECURITY_POLICY, value);
    } else {
        tracing::warn!(
            csp = %config.content_security_policy,
            "Content-Security-Policy is not a valid header value, skipping"
        );
    }

    // X-XSS-Protection (legacy but still useful for older browsers)
    headers.insert(X_XSS_PROTECTION, HeaderValue::from_static("1; mode=block"));

    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));

    if let Ok(value) = HeaderValue::from_str(&hsts_value(config)) {
        headers.insert(STRICT_TRANSPORT_SECURITY, value);
    }

    headers
}

/// Stamp `headers` onto a response, replacing any values already present.
pub fn apply_security_headers(headers: &HeaderMap, response: &mut Response) {
    let response_headers = response.headers_mut();
    for (k, v) in headers {
        response_headers.insert(k.clone(), v.clone());
    }
}
