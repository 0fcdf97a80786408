//! HTTP middleware: path screening, authentication, access policy, CSRF and
//! security headers.

pub mod auth;
pub mod csrf;
pub mod filter;
pub mod firewall;
pub mod security;

pub use auth::{Credentials, PasswordSource};
pub use csrf::verify_csrf;
pub use filter::{security_filter_middleware, AccessState};
pub use firewall::check_request_path;
pub use security::{apply_security_headers, build_security_headers};
