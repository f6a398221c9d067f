//! HTML escaping for log-controlled text.
//!
//! Asset paths, bundle hashes and GUIDs come straight from build logs and
//! may contain markup. Everything taken from a log is passed through one of
//! these functions before it reaches an HTML report.

use std::fmt::Write as _;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Context {
    Text,
    Attribute,
}

fn escape(s: &str, context: Context) -> String {
    let mut out = String::with_capacity(s.len() + s.len() / 8);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '\n' | '\r' | '\t' if context == Context::Attribute => {
                let _ = write!(out, "&#{};", u32::from(c));
            }
            _ => out.push(c),
        }
    }
    out
}

/// Escape text placed between HTML tags.
///
/// ```
/// use bundle_log_tools::reports::escape::escape_html;
///
/// assert_eq!(escape_html("Assets/<b>.png"), "Assets/&lt;b&gt;.png");
/// ```
#[must_use]
pub fn escape_html(s: &str) -> String {
    escape(s, Context::Text)
}

/// Escape text placed inside a quoted attribute value; line breaks and tabs
/// become numeric references so tooltips keep them.
#[must_use]
pub fn escape_html_attr(s: &str) -> String {
    escape(s, Context::Attribute)
}

/// Escape an optional value, rendering `None` as `-`.
#[must_use]
pub fn escape_html_opt(s: Option<&str>) -> String {
    s.map_or_else(|| "-".to_string(), escape_html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markup_in_asset_path() {
        assert_eq!(
            escape_html("Assets/\"a\" & 'b' <c>.png"),
            "Assets/&quot;a&quot; &amp; &#x27;b&#x27; &lt;c&gt;.png"
        );
    }

    #[test]
    fn test_escaping_is_not_idempotent() {
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_attribute_whitespace() {
        assert_eq!(escape_html_attr("a\nb\r\tc"), "a&#10;b&#13;&#9;c");
        assert_eq!(escape_html("a\nb"), "a\nb");
    }

    #[test]
    fn test_optional_value() {
        assert_eq!(escape_html_opt(Some("<x>")), "&lt;x&gt;");
        assert_eq!(escape_html_opt(None), "-");
    }

    #[test]
    fn test_non_ascii_passes_through() {
        assert_eq!(escape_html("Assets/日本語/立ち絵.png"), "Assets/日本語/立ち絵.png");
    }
}
