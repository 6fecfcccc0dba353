//! Clipboard URL source.
//!
//! The engine never talks to the system clipboard itself. Hosts plug in a
//! [`ClipboardText`] implementation and the source filters it down to
//! text that looks like a web URL.

use once_cell::sync::Lazy;
use regex::Regex;

static WEB_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?ix)^
        (?:(?:https?|rtsp)://)?                         # scheme
        (?:[^\s/?\#@:]+(?::[^\s/?\#@]*)?@)?             # userinfo
        (?:
            localhost
          | (?:\d{1,3}\.){3}\d{1,3}                     # ipv4
          | (?:[\p{L}\p{N}](?:[\p{L}\p{N}-]{0,61}[\p{L}\p{N}])?\.)+\p{L}{2,63}
        )
        (?::\d{1,5})?                                   # port
        (?:[/?\#]\S*)?                                  # path, query, fragment
        $",
    )
    .expect("valid web url pattern")
});

/// Matcher for web URLs (scheme optional, host required).
#[derive(Debug, Clone, Copy, Default)]
pub struct WebUrlPattern;

impl WebUrlPattern {
    /// Returns true if the whole of `text` is a web URL.
    pub fn matches(text: &str) -> bool {
        WEB_URL.is_match(text)
    }
}

/// Read access to whatever text the clipboard currently holds.
pub trait ClipboardText {
    fn current_text(&mut self) -> Option<String>;
}

/// Supplies a candidate link URL from the clipboard.
#[derive(Debug)]
pub struct ClipboardUrlSource<C> {
    clipboard: C,
}

impl<C: ClipboardText> ClipboardUrlSource<C> {
    pub fn new(clipboard: C) -> Self {
        Self { clipboard }
    }

    /// Returns the clipboard text if it is a web URL, otherwise "".
    pub fn url(&mut self) -> String {
        match self.clipboard.current_text() {
            Some(text) if WebUrlPattern::matches(&text) => text,
            Some(_) => {
                log::trace!("Clipboard text is not a web URL");
                String::new()
            }
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticClipboard(Option<String>);

    impl ClipboardText for StaticClipboard {
        fn current_text(&mut self) -> Option<String> {
            self.0.clone()
        }
    }

    #[test]
    fn test_web_urls_match() {
        assert!(WebUrlPattern::matches("http://example.com"));
        assert!(WebUrlPattern::matches("https://example.com/path?q=1&b=2#frag"));
        assert!(WebUrlPattern::matches("HTTPS://Example.COM"));
        assert!(WebUrlPattern::matches("http://localhost:8080/x"));
        assert!(WebUrlPattern::matches("http://user:pw@example.com"));
        assert!(WebUrlPattern::matches("192.168.0.1"));
        assert!(WebUrlPattern::matches("www.wordpress.org"));
    }

    #[test]
    fn test_non_urls_do_not_match() {
        assert!(!WebUrlPattern::matches(""));
        assert!(!WebUrlPattern::matches("hello"));
        assert!(!WebUrlPattern::matches("not a url"));
        assert!(!WebUrlPattern::matches("http://"));
        assert!(!WebUrlPattern::matches("see http://example.com"));
        assert!(!WebUrlPattern::matches("ftp://example.com"));
    }

    #[test]
    fn test_source_filters_clipboard() {
        let mut source = ClipboardUrlSource::new(StaticClipboard(Some("https://a.org".into())));
        assert_eq!(source.url(), "https://a.org");

        let mut source = ClipboardUrlSource::new(StaticClipboard(Some("shopping list".into())));
        assert_eq!(source.url(), "");

        let mut source = ClipboardUrlSource::new(StaticClipboard(None));
        assert_eq!(source.url(), "");
    }
}
