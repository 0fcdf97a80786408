//! Comparison endpoint tests through the full router.

mod common;

use axum::http::{header::CONTENT_TYPE, HeaderValue, StatusCode};
use common::app_builder::TestAppBuilder;
use common::{assert_no_security_headers, assert_security_headers, body_string, get};
use proptest::prelude::*;
use tower::ServiceExt;

async fn compare(uri: &str) -> (StatusCode, String) {
    let app = TestAppBuilder::production().build();
    let response = app.oneshot(get(uri)).await.expect("response");
    let status = response.status();
    (status, body_string(response).await)
}

#[tokio::test]
async fn smaller_than_or_equal_to_fifty_message() {
    let (status, body) = compare("/compare/49").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Smaller than or equal to 50");
}

#[tokio::test]
async fn greater_than_fifty_message() {
    let (status, body) = compare("/compare/51").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Greater than 50");
}

#[tokio::test]
async fn boundary_values() {
    let cases = [
        ("/compare/50", "Smaller than or equal to 50"),
        ("/compare/-50", "Smaller than or equal to 50"),
        ("/compare/0", "Smaller than or equal to 50"),
        ("/compare/9223372036854775807", "Greater than 50"),
        ("/compare/-9223372036854775808", "Smaller than or equal to 50"),
    ];

    for (uri, expected) in cases {
        let (status, body) = compare(uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body, expected, "{uri}");
    }
}

#[tokio::test]
async fn response_is_plain_text() {
    let app = TestAppBuilder::production().build();
    let response = app.oneshot(get("/compare/1")).await.expect("response");
    assert_eq!(
        response.headers().get(CONTENT_TYPE),
        Some(&HeaderValue::from_static("text/plain; charset=utf-8"))
    );
}

async fn assert_malformed(app: axum::Router, uri: &str) -> axum::http::HeaderMap {
    let response = app.oneshot(get(uri)).await.expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
    let headers = response.headers().clone();

    let problem: serde_json::Value =
        serde_json::from_str(&body_string(response).await).expect("problem details");
    assert_eq!(problem["status"], 400, "{uri}");
    assert_eq!(problem["extensions"]["code"], "MALFORMED_INPUT", "{uri}");
    headers
}

#[tokio::test]
async fn malformed_input_is_bad_request() {
    let app = TestAppBuilder::production().build();
    for uri in ["/compare/something", "/compare/4.5", "/compare/99999999999999999999"] {
        let headers = assert_malformed(app.clone(), uri).await;
        assert_security_headers(&headers);
    }
}

#[tokio::test]
async fn malformed_input_is_bad_request_in_test_mode() {
    let app = TestAppBuilder::test_mode().build();
    let headers = assert_malformed(app, "/compare/something").await;
    assert_no_security_headers(&headers);
}

#[tokio::test]
async fn missing_or_extra_segments_are_malformed() {
    let app = TestAppBuilder::production().build();
    for uri in ["/compare", "/compare/", "/compare/1/2", "/compare/7/extra/parts"] {
        let headers = assert_malformed(app.clone(), uri).await;
        assert_security_headers(&headers);
    }
}

#[tokio::test]
async fn missing_or_extra_segments_are_malformed_in_test_mode() {
    let app = TestAppBuilder::test_mode().build();
    for uri in ["/compare", "/compare/", "/compare/1/2"] {
        let headers = assert_malformed(app.clone(), uri).await;
        assert_no_security_headers(&headers);
    }
}

#[tokio::test]
async fn similar_prefixes_are_not_comparisons() {
    let app = TestAppBuilder::test_mode().build();
    let response = app.oneshot(get("/compared")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "Hello, anonymous");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn endpoint_agrees_with_threshold(n in any::<i64>()) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime");
        let (status, body) = runtime.block_on(compare(&format!("/compare/{n}")));

        prop_assert_eq!(status, StatusCode::OK);
        let expected = if n <= 50 { "Smaller than or equal to 50" } else { "Greater than 50" };
        prop_assert_eq!(body, expected);
    }
}
