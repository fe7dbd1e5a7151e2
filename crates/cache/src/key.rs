//! Deterministic cache key composition.

use std::fmt::Display;

/// Build a cache key from a namespace and its identifying parameters,
/// joined with `:`.
///
/// Keys with the same namespace share a prefix, which is what makes
/// pattern-based invalidation (`comments*`) work.
///
/// ```
/// use presswire_cache::cache_key;
///
/// let key = cache_key("comments", &[&"d2c0e3f4", &20]);
/// assert_eq!(key, "comments:d2c0e3f4:20");
/// ```
pub fn cache_key(namespace: &str, parts: &[&dyn Display]) -> String {
    let mut key = String::from(namespace);
    for part in parts {
        key.push(':');
        key.push_str(&part.to_string());
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_namespace() {
        assert_eq!(cache_key("user", &[]), "user");
    }

    #[test]
    fn joins_parts_in_order() {
        assert_eq!(cache_key("comments", &[&"abc", &50]), "comments:abc:50");
    }

    #[test]
    fn same_inputs_same_key() {
        let a = cache_key("comments_reply_count", &[&"p1"]);
        let b = cache_key("comments_reply_count", &[&"p1"]);
        assert_eq!(a, b);
    }
}
