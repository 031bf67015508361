//! HTML entity escaping under a short name.

/// Escapes HTML-significant characters.
///
/// Replaces `&`, `<`, `>`, `"`, and `'` with their character references;
/// everything else passes through unchanged. The entities match Ruby's
/// `CGI.escapeHTML`, so output is interchangeable with documents produced
/// by the original scripts. Pure function, no side effects.
#[must_use]
pub fn escape(text: &str) -> String {
    // Ampersand first, or the other replacements would be re-escaped.
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Decodes HTML entities, both named and numeric.
///
/// Inverse of [`escape`] for every input: `unescape(&escape(s)) == s`.
#[must_use]
pub fn unescape(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_covers_all_five_characters() {
        assert_eq!(
            escape(r#"<a href="x">&'"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;"
        );
    }

    #[test]
    fn test_escape_empty_string() {
        assert_eq!(escape(""), "");
    }

    #[test]
    fn test_escape_passes_plain_text_through() {
        assert_eq!(escape("plain text, no markup"), "plain text, no markup");
    }

    #[test]
    fn test_escape_is_not_idempotent() {
        // Escaping already-escaped text double-escapes, as the reference
        // escaper does.
        assert_eq!(escape("&amp;"), "&amp;amp;");
    }

    #[test]
    fn test_escape_preserves_unicode() {
        assert_eq!(escape("héllo ☃ <b>"), "héllo ☃ &lt;b&gt;");
    }

    #[test]
    fn test_unescape_recovers_original() {
        let original = r#"if a < b && b > c { "quote" & 'tick' }"#;
        assert_eq!(unescape(&escape(original)), original);
    }

    #[test]
    fn test_unescape_handles_numeric_references() {
        assert_eq!(unescape("&#39;&#x27;"), "''");
    }

    #[test]
    fn test_escaped_output_has_no_raw_angle_brackets() {
        let escaped = escape("<<>>&&");
        assert!(!escaped.contains('<'));
        assert!(!escaped.contains('>'));
    }
}
