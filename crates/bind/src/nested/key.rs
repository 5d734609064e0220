//! Bracket key decomposition.
//!
//! A key has the form `name ( "[" segment "]" )*`. The name must not be empty, and neither
//! the name nor a segment may contain a bracket. An empty segment (`[]`) marks a collection.

use crate::error::BindError;
use crate::utils::ensure;

/// Splits `key` into its property name followed by its bracket segments.
///
/// `bar[one][two]` becomes `["bar", "one", "two"]` and `items[]` becomes `["items", ""]`.
/// A key without brackets yields a single segment.
pub(crate) fn split_key(key: &str) -> Result<Vec<&str>, BindError> {
    let Some(open) = key.find(['[', ']']) else {
        return Ok(vec![key]);
    };

    let (name, mut rest) = key.split_at(open);
    ensure!(!name.is_empty(), BindError::invalid_key(key, "missing property name"));

    let mut segments = vec![name];
    while !rest.is_empty() {
        let Some(inner) = rest.strip_prefix('[') else {
            let reason = if rest.starts_with(']') { "unbalanced `]`" } else { "unexpected text after `]`" };
            return Err(BindError::invalid_key(key, reason));
        };

        let Some(close) = inner.find(['[', ']']) else {
            return Err(BindError::invalid_key(key, "unclosed `[`"));
        };
        ensure!(inner.as_bytes()[close] == b']', BindError::invalid_key(key, "`[` inside brackets"));

        segments.push(&inner[..close]);
        rest = &inner[close + 1..];
    }

    Ok(segments)
}
