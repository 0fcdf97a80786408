//! Ant-style request path patterns.
//!
//! Supported forms:
//! - literal segments, matched exactly (`/`, `/health`)
//! - `*`, matching exactly one non-empty segment (`/compare/*`)
//! - a trailing `/**`, matching the prefix itself and everything below it
//!   (`/compare/**` matches `/compare`, `/compare/7` and `/compare/a/b`)

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Any,
}

/// A compiled path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
    /// Pattern ended in `/**`.
    subtree: bool,
}

/// Rejected pattern syntax.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("path pattern must start with '/': {0}")]
    NotAbsolute(String),
    #[error("'**' is only allowed as the final segment: {0}")]
    MisplacedWildcard(String),
}

fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

impl PathPattern {
    /// Compile a pattern.
    ///
    /// # Errors
    /// Returns [`PatternError`] when the pattern is relative or uses `**`
    /// anywhere but the last segment.
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        if !pattern.starts_with('/') {
            return Err(PatternError::NotAbsolute(pattern.to_string()));
        }

        let parts: Vec<&str> = split_segments(pattern).collect();
        let subtree = parts.last() == Some(&"**");
        let body = if subtree {
            &parts[..parts.len() - 1]
        } else {
            &parts[..]
        };

        let segments = body
            .iter()
            .map(|part| match *part {
                "**" => Err(PatternError::MisplacedWildcard(pattern.to_string())),
                "*" => Ok(Segment::Any),
                literal => Ok(Segment::Literal(literal.to_string())),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            raw: pattern.to_string(),
            segments,
            subtree,
        })
    }

    /// Whether `path` (without query string) matches this pattern.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        let parts: Vec<&str> = split_segments(path).collect();

        if parts.len() < self.segments.len() {
            return false;
        }
        if !self.subtree && parts.len() != self.segments.len() {
            return false;
        }

        self.segments
            .iter()
            .zip(&parts)
            .all(|(segment, part)| match segment {
                Segment::Any => true,
                Segment::Literal(literal) => literal == part,
            })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
