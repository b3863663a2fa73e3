//! Helpers for colon-delimited permission codes.
//!
//! A code such as `menu:nodes:backends` is a hierarchical path. The first
//! segment is the kind discriminator by convention, the remainder is the
//! path shared between menu and api records.

/// Segment separator.
pub const SEPARATOR: char = ':';

/// Iterates over the colon-delimited segments of a code.
pub fn segments(code: &str) -> impl Iterator<Item = &str> {
    code.split(SEPARATOR)
}

/// Number of segments in a code. An empty code has one (empty) segment.
pub fn segment_count(code: &str) -> usize {
    code.matches(SEPARATOR).count() + 1
}

/// Returns the code with its last segment dropped, or `None` for a
/// single-segment code.
///
/// ```
/// use permtree_types::code::parent_path;
///
/// assert_eq!(parent_path("menu:nodes:backends"), Some("menu:nodes"));
/// assert_eq!(parent_path("menu"), None);
/// ```
pub fn parent_path(code: &str) -> Option<&str> {
    code.rsplit_once(SEPARATOR).map(|(head, _)| head)
}

/// Returns the code with its first (kind) segment stripped. A
/// single-segment code yields an empty string.
///
/// ```
/// use permtree_types::code::strip_kind;
///
/// assert_eq!(strip_kind("api:clusters:list"), "clusters:list");
/// assert_eq!(strip_kind("dashboard"), "");
/// ```
pub fn strip_kind(code: &str) -> &str {
    code.split_once(SEPARATOR).map(|(_, rest)| rest).unwrap_or("")
}

/// Splits the last segment off a code: `api:clusters:list` becomes
/// `("api:clusters", "list")`.
pub fn split_action(code: &str) -> Option<(&str, &str)> {
    code.rsplit_once(SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_segments() {
        assert_eq!(segment_count("api:clusters:list"), 3);
        assert_eq!(segment_count("dashboard"), 1);
        assert_eq!(segment_count(""), 1);
        assert_eq!(segment_count("a::b"), 3);
    }

    #[test]
    fn split_action_takes_last_segment() {
        assert_eq!(split_action("api:clusters:list"), Some(("api:clusters", "list")));
        assert_eq!(split_action("api"), None);
    }

    #[test]
    fn segments_preserve_order() {
        let segs: Vec<&str> = segments("menu:nodes:backends").collect();
        assert_eq!(segs, vec!["menu", "nodes", "backends"]);
    }
}
