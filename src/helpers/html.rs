//! HTML and XML escaping helpers

use serde::Serialize;

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escape XML special characters and drop characters XML 1.0 cannot carry
pub fn escape_xml(s: &str) -> String {
    strip_invalid_xml_chars(s)
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Strip invalid XML control characters (except tab, newline, carriage return)
/// XML 1.0 only allows: #x9 | #xA | #xD | [#x20-#xD7FF] | [#xE000-#xFFFD] | [#x10000-#x10FFFF]
pub fn strip_invalid_xml_chars(s: &str) -> String {
    s.chars()
        .filter(|&c| {
            c == '\t'
                || c == '\n'
                || c == '\r'
                || ('\u{0020}'..='\u{D7FF}').contains(&c)
                || ('\u{E000}'..='\u{FFFD}').contains(&c)
                || ('\u{10000}'..='\u{10FFFF}').contains(&c)
        })
        .collect()
}

/// Serialize a value for an inline `<script type="application/ld+json">`.
/// `<` is written as a unicode escape so text fields can never close the
/// script element.
pub fn json_ld<T: Serialize>(value: &T) -> serde_json::Result<String> {
    Ok(serde_json::to_string(value)?.replace('<', "\\u003c"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(
            escape_xml(r#"AT&T <says> "hi" 'there'"#),
            "AT&amp;T &lt;says&gt; &quot;hi&quot; &apos;there&apos;"
        );
        assert_eq!(escape_xml("bell\u{7}char"), "bellchar");
    }

    #[test]
    fn test_json_ld_escapes_script_close() {
        let json = json_ld(&serde_json::json!({ "headline": "</script><b>" })).unwrap();
        assert!(!json.contains('<'));
        assert!(json.contains("\\u003c/script>"));
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["headline"], "</script><b>");
    }
}
