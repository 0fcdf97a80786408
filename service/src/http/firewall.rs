//! Request path screening.
//!
//! Access rules and the router must see the same path. Paths that a client,
//! proxy or router could resolve differently are refused before any rule is
//! evaluated: dot segments, empty interior segments, backslashes, and
//! percent-encoded slashes, backslashes, dots or NULs.

use crate::error::AppError;

const ENCODED_BLOCKLIST: [&str; 4] = ["%2f", "%5c", "%2e", "%00"];

/// Check that `path` is in canonical form.
///
/// A single trailing slash is allowed; `//` anywhere is not.
///
/// # Errors
/// Returns [`AppError::RejectedPath`] for any non-canonical path.
pub fn check_request_path(path: &str) -> Result<(), AppError> {
    let rejected = || AppError::RejectedPath {
        path: path.to_string(),
    };

    if !path.starts_with('/') || path.contains('\\') {
        return Err(rejected());
    }

    let lowered = path.to_ascii_lowercase();
    if ENCODED_BLOCKLIST.iter().any(|needle| lowered.contains(needle)) {
        return Err(rejected());
    }

    let body = &path[1..];
    let body = body.strip_suffix('/').unwrap_or(body);
    if body.is_empty() {
        return if path.len() == 1 { Ok(()) } else { Err(rejected()) };
    }

    if body
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return Err(rejected());
    }

    Ok(())
}
