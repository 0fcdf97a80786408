//! Comparison of an integer against a fixed threshold.

use crate::error::AppError;

pub const THRESHOLD: i64 = 50;

pub const SMALLER_OR_EQUAL_MESSAGE: &str = "Smaller than or equal to 50";
pub const GREATER_MESSAGE: &str = "Greater than 50";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ordering {
    SmallerOrEqual,
    Greater,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparison {
    pub input: i64,
    pub ordering: Ordering,
}

impl Comparison {
    #[must_use]
    pub const fn of(input: i64) -> Self {
        let ordering = if input <= THRESHOLD {
            Ordering::SmallerOrEqual
        } else {
            Ordering::Greater
        };
        Self { input, ordering }
    }

    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self.ordering {
            Ordering::SmallerOrEqual => SMALLER_OR_EQUAL_MESSAGE,
            Ordering::Greater => GREATER_MESSAGE,
        }
    }
}

/// Parse a raw path segment and compare it.
///
/// # Errors
/// Returns [`AppError::MalformedInput`] if `raw` is not a base-10 `i64`.
pub fn compare_raw(raw: &str) -> Result<Comparison, AppError> {
    raw.parse::<i64>()
        .map(Comparison::of)
        .map_err(|_| AppError::MalformedInput {
            value: raw.to_string(),
        })
}
