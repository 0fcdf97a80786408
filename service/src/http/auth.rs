//! HTTP Basic authentication.
//!
//! A single principal is configured through `auth.username` and
//! `auth.password`. Requests present it as
//! `Authorization: Basic base64(username:password)`. Credentials that are
//! missing, malformed or wrong all resolve to "no principal"; whether that is
//! acceptable is up to the [`AccessPolicy`](crate::policy::AccessPolicy).

use axum::http::{header::AUTHORIZATION, HeaderMap};
use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::policy::Principal;

/// Where the configured password came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordSource {
    Configured,
    /// No password was configured; this one was generated for the process.
    Generated(String),
}

type HmacSha256 = Hmac<Sha256>;

/// The credentials of the built-in principal.
///
/// Only an HMAC tag over `username:password`, keyed with a per-process random
/// key, is retained. Verification goes through `Mac::verify_slice`, which
/// compares in constant time.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    key: [u8; 16],
    tag: Vec<u8>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

fn keyed_mac(key: &[u8], username: &str, password: &str) -> Option<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(key).ok()?;
    mac.update(username.as_bytes());
    mac.update(b":");
    mac.update(password.as_bytes());
    Some(mac)
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: &str) -> Self {
        let username = username.into();
        let key = *Uuid::new_v4().as_bytes();
        let tag = keyed_mac(&key, &username, password)
            .map(|mac| mac.finalize().into_bytes().to_vec())
            .unwrap_or_default();
        Self { username, key, tag }
    }

    /// Resolve credentials from configuration, generating a password when
    /// none is set.
    #[must_use]
    pub fn from_config(config: &AuthConfig) -> (Self, PasswordSource) {
        match &config.password {
            Some(password) => (
                Self::new(config.username.clone(), password),
                PasswordSource::Configured,
            ),
            None => {
                let generated = Uuid::new_v4().to_string();
                (
                    Self::new(config.username.clone(), &generated),
                    PasswordSource::Generated(generated),
                )
            }
        }
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn verify(&self, username: &str, password: &str) -> bool {
        if self.tag.is_empty() {
            return false;
        }
        keyed_mac(&self.key, username, password)
            .is_some_and(|mac| mac.verify_slice(&self.tag).is_ok())
    }

    /// Resolve the principal presented in the `Authorization` header, if any.
    #[must_use]
    pub fn authenticate(&self, headers: &HeaderMap) -> Option<Principal> {
        let (username, password) = parse_basic_authorization(headers)?;
        if self.verify(&username, &password) {
            Some(Principal::new(username))
        } else {
            tracing::debug!(username = %username, "Rejected basic credentials");
            None
        }
    }
}

/// Extract `(username, password)` from a `Basic` authorization header.
#[must_use]
pub fn parse_basic_authorization(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}
