//! Test app builder that mirrors main.rs wiring.
//!
//! # Usage
//!
//! ```ignore
//! use crate::common::app_builder::TestAppBuilder;
//!
//! #[tokio::test]
//! async fn test_with_production_app() {
//!     let app = TestAppBuilder::production().build();
//!     // Use app.oneshot(...) to send requests
//! }
//! ```
//!
//! # Preset Builders
//!
//! - [`TestAppBuilder::production()`] - enforced policy with known credentials
//! - [`TestAppBuilder::test_mode()`] - open policy, no headers, no CSRF

use axum::Router;
use numeric_api::{
    app::build_router,
    build_info::{BuildInfo, BuildInfoProvider},
    config::{Mode, SecurityHeadersConfig},
    http::Credentials,
    policy::AccessPolicy,
};

pub const TEST_USERNAME: &str = "user";
pub const TEST_PASSWORD: &str = "test-password";

/// Builder for test applications that mirrors main.rs wiring.
pub struct TestAppBuilder {
    mode: Mode,
    security_headers: SecurityHeadersConfig,
    credentials: Credentials,
    build_info: BuildInfo,
}

impl TestAppBuilder {
    #[must_use]
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            security_headers: SecurityHeadersConfig::default(),
            credentials: Credentials::new(TEST_USERNAME, TEST_PASSWORD),
            build_info: BuildInfo::default(),
        }
    }

    #[must_use]
    pub fn production() -> Self {
        Self::new(Mode::Production)
    }

    #[must_use]
    pub fn test_mode() -> Self {
        Self::new(Mode::Test)
    }

    #[must_use]
    pub fn with_security_headers(mut self, config: SecurityHeadersConfig) -> Self {
        self.security_headers = config;
        self
    }

    #[must_use]
    pub fn with_credentials(mut self, username: &str, password: &str) -> Self {
        self.credentials = Credentials::new(username, password);
        self
    }

    #[must_use]
    pub fn with_build_info(mut self, provider: &BuildInfoProvider) -> Self {
        self.build_info = provider.build_info();
        self
    }

    /// Build the Axum router exactly as main.rs does.
    #[must_use]
    pub fn build(self) -> Router {
        let policy = AccessPolicy::for_mode(self.mode, &self.security_headers)
            .expect("built-in access rules compile");
        build_router(policy, self.credentials, self.build_info)
    }

    /// Build with an explicit policy instead of the one for `mode`.
    pub fn build_with_policy(self, policy: AccessPolicy) -> Router {
        build_router(policy, self.credentials, self.build_info)
    }
}
