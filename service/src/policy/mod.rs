//! Request access policy.
//!
//! An [`AccessPolicy`] is an ordered list of [`AccessRule`]s. Evaluation walks
//! the rules top to bottom and the first rule whose pattern matches the
//! request path decides. A path no rule matches is denied.

pub mod pattern;

use std::sync::Arc;

use axum::http::HeaderMap;

pub use pattern::{PathPattern, PatternError};

use crate::config::{Mode, SecurityHeadersConfig};
use crate::http::security::build_security_headers;

/// What a request must carry to pass a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Anyone, authenticated or not.
    PermitAll,
    /// An authenticated principal.
    Authenticated,
}

#[derive(Debug, Clone)]
pub struct AccessRule {
    pub pattern: PathPattern,
    pub capability: Capability,
}

impl AccessRule {
    /// # Errors
    /// Returns [`PatternError`] if `pattern` does not compile.
    pub fn new(pattern: &str, capability: Capability) -> Result<Self, PatternError> {
        Ok(Self {
            pattern: PathPattern::parse(pattern)?,
            capability,
        })
    }
}

/// An authenticated identity attached to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub name: String,
}

impl Principal {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Permit,
    /// A principal is required and none was presented.
    Unauthorized,
    /// No rule covers the path.
    Forbidden,
}

/// Result of evaluating a request against the policy.
#[derive(Debug, Clone)]
pub struct PolicyDecision {
    pub outcome: Outcome,
    /// Headers every response must carry, whatever the outcome.
    pub required_headers: Arc<HeaderMap>,
}

impl PolicyDecision {
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        self.outcome == Outcome::Permit
    }
}

#[derive(Debug, Clone)]
pub struct AccessPolicy {
    mode: Mode,
    rules: Vec<AccessRule>,
    headers: Arc<HeaderMap>,
}

const PUBLIC_PATTERNS: [&str; 3] = ["/", "/compare/**", "/v3/api-docs/**"];

impl AccessPolicy {
    /// Build from explicit rules.
    #[must_use]
    pub fn new(mode: Mode, rules: Vec<AccessRule>, headers: HeaderMap) -> Self {
        Self {
            mode,
            rules,
            headers: Arc::new(headers),
        }
    }

    /// The policy for a configuration mode.
    ///
    /// Production permits the public routes, requires a principal everywhere
    /// else and mandates the security headers. Test permits everything and
    /// mandates nothing.
    ///
    /// # Errors
    /// Returns [`PatternError`] if a built-in pattern fails to compile.
    pub fn for_mode(mode: Mode, headers: &SecurityHeadersConfig) -> Result<Self, PatternError> {
        match mode {
            Mode::Production => {
                let mut rules = PUBLIC_PATTERNS
                    .iter()
                    .map(|p| AccessRule::new(p, Capability::PermitAll))
                    .collect::<Result<Vec<_>, _>>()?;
                rules.push(AccessRule::new("/**", Capability::Authenticated)?);
                Ok(Self::new(mode, rules, build_security_headers(headers)))
            }
            Mode::Test => Ok(Self::new(
                mode,
                vec![AccessRule::new("/**", Capability::PermitAll)?],
                HeaderMap::new(),
            )),
        }
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn rules(&self) -> &[AccessRule] {
        &self.rules
    }

    /// Headers to attach to every response under this policy.
    #[must_use]
    pub fn required_headers(&self) -> Arc<HeaderMap> {
        Arc::clone(&self.headers)
    }

    /// Decide whether a request for `path` may proceed.
    #[must_use]
    pub fn evaluate(&self, path: &str, principal: Option<&Principal>) -> PolicyDecision {
        let outcome = self
            .rules
            .iter()
            .find(|rule| rule.pattern.matches(path))
            .map_or(Outcome::Forbidden, |rule| match rule.capability {
                Capability::PermitAll => Outcome::Permit,
                Capability::Authenticated if principal.is_some() => Outcome::Permit,
                Capability::Authenticated => Outcome::Unauthorized,
            });

        PolicyDecision {
            outcome,
            required_headers: self.required_headers(),
        }
    }
}
