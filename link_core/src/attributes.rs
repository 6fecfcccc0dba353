//! Link markup attributes.
//!
//! Attributes are carried as one opaque string of `key="value"` pairs.
//! The only structural edit ever made to them is swapping the `href`.

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

static HREF_PAIR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"href="[^"]*"|href='[^']*'"#).expect("valid href pattern"));

/// Returns true if `attributes` contains an `href` pair.
pub fn has_href(attributes: &str) -> bool {
    HREF_PAIR.is_match(attributes)
}

/// Rewrites the `href` pair in `attributes` to point at `url`.
///
/// Every other attribute is left untouched. Without an `href` pair the
/// string comes back unchanged; no `href` is appended.
pub fn replace_href(attributes: &str, url: &str) -> String {
    let replacement = format!("href=\"{}\"", url);
    HREF_PAIR
        .replace_all(attributes, NoExpand(replacement.as_str()))
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_keeps_other_attributes() {
        assert_eq!(
            replace_href(r#"target="_blank" href="old""#, "new"),
            r#"target="_blank" href="new""#
        );
    }

    #[test]
    fn test_replace_stops_at_closing_quote() {
        assert_eq!(
            replace_href(r#"href="old" target="_blank" rel="nofollow""#, "http://b"),
            r#"href="http://b" target="_blank" rel="nofollow""#
        );
    }

    #[test]
    fn test_replace_single_quoted() {
        assert_eq!(
            replace_href("href='old' class='x'", "http://b"),
            r#"href="http://b" class='x'"#
        );
    }

    #[test]
    fn test_replace_without_href_is_noop() {
        assert_eq!(replace_href(r#"target="_blank""#, "http://b"), r#"target="_blank""#);
        assert_eq!(replace_href("", "http://b"), "");
        assert!(!has_href(r#"target="_blank""#));
    }

    #[test]
    fn test_replace_url_is_literal() {
        assert_eq!(
            replace_href(r#"href="old""#, "http://x/$1?a=$b"),
            r#"href="http://x/$1?a=$b""#
        );
    }
}
