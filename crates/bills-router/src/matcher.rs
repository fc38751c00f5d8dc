//! Segment-by-segment path matching.
//!
//! Paths and patterns are split on `/`. A pattern segment starting with `:`
//! matches any value in the same position; every other segment must match
//! literally. Matching never binds parameter values.

/// Splits a request path on `/`, keeping empty segments.
///
/// ```
/// use bills_router::split_path;
///
/// assert_eq!(split_path("/transactions/7"), vec!["", "transactions", "7"]);
/// assert_eq!(split_path("/"), vec!["", ""]);
/// ```
#[must_use]
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/').collect()
}

/// Returns `true` when the split path matches `pattern`.
///
/// - Segment counts must be equal.
/// - A `?query` suffix on the final path segment is ignored.
/// - Empty segments on both sides are skipped.
/// - The matched path, rebuilt from literals and the pattern's own parameter
///   tokens, must equal `pattern`. A pattern with a trailing slash therefore
///   never matches.
///
/// ```
/// use bills_router::{matches, split_path};
///
/// assert!(matches(&split_path("/transactions/42"), "/transactions/:id"));
/// assert!(matches(&split_path("/transactions?page=2"), "/transactions"));
/// assert!(!matches(&split_path("/transactions/42/items"), "/transactions/:id"));
/// ```
#[must_use]
pub fn matches(segments: &[&str], pattern: &str) -> bool {
    let last = segments.len().saturating_sub(1);
    let segment_at = |index: usize| {
        let segment = segments[index];
        if index == last {
            strip_query(segment)
        } else {
            segment
        }
    };

    if pattern == "/" {
        return segments.len() == 2 && segment_at(0).is_empty() && segment_at(1).is_empty();
    }

    if pattern.split('/').count() != segments.len() {
        return false;
    }

    let mut rebuilt = String::with_capacity(pattern.len());
    for (index, expected) in pattern.split('/').enumerate() {
        let segment = segment_at(index);
        if segment.is_empty() && expected.is_empty() {
            continue;
        }
        if expected.starts_with(':') {
            rebuilt.push('/');
            rebuilt.push_str(expected);
        } else if segment == expected {
            rebuilt.push('/');
            rebuilt.push_str(segment);
        } else {
            return false;
        }
    }

    rebuilt == pattern
}

/// Value of the parameter `:name` of `pattern` in `path`, if the shapes line up.
///
/// ```
/// use bills_router::param_value;
///
/// assert_eq!(param_value("/transactions/:id", "/transactions/42", "id"), Some("42"));
/// assert_eq!(param_value("/transactions/:id", "/transactions/42", "other"), None);
/// ```
#[must_use]
pub fn param_value<'p>(pattern: &str, path: &'p str, name: &str) -> Option<&'p str> {
    let segments = split_path(path);
    if !matches(&segments, pattern) {
        return None;
    }
    let last = segments.len().saturating_sub(1);
    pattern
        .split('/')
        .position(|segment| segment.strip_prefix(':') == Some(name))
        .map(|index| {
            if index == last {
                strip_query(segments[index])
            } else {
                segments[index]
            }
        })
}

fn strip_query(segment: &str) -> &str {
    segment.split_once('?').map_or(segment, |(head, _)| head)
}
