//! Escaping helpers shared by the text formats.

use std::borrow::Cow;

/// Double-quoted literal with backslash escapes.
pub(crate) fn quoted(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('"');
    for ch in raw.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

/// XML character data or attribute value.
pub(crate) fn xml_escape(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(raw);
    }
    let mut out = String::with_capacity(raw.len() + 8);
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

/// CSV field, quoted when it holds a delimiter, quote or line break.
pub(crate) fn csv_field(raw: &str) -> Cow<'_, str> {
    if raw.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", raw.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(raw)
    }
}

/// Whether `raw` is a bare identifier (`[A-Za-z_][A-Za-z0-9_]*`).
pub(crate) fn is_identifier(raw: &str) -> bool {
    let mut chars = raw.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Ann", "\"Ann\"")]
    #[case("say \"hi\"", "\"say \\\"hi\\\"\"")]
    #[case("a\\b", "\"a\\\\b\"")]
    #[case("two\nlines", "\"two\\nlines\"")]
    fn quotes_literals(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(quoted(raw), expected);
    }

    #[rstest]
    #[case("plain", "plain")]
    #[case("a < b & c", "a &lt; b &amp; c")]
    #[case("it's \"x\"", "it&apos;s &quot;x&quot;")]
    fn escapes_xml(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(xml_escape(raw), expected);
    }

    #[rstest]
    #[case("plain", "plain")]
    #[case("a,b", "\"a,b\"")]
    #[case("say \"hi\"", "\"say \"\"hi\"\"\"")]
    #[case("line\nbreak", "\"line\nbreak\"")]
    fn quotes_csv_fields(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(csv_field(raw), expected);
    }

    #[rstest]
    #[case("firstName", true)]
    #[case("_private", true)]
    #[case("last_meeting2", true)]
    #[case("2fast", false)]
    #[case("has space", false)]
    #[case("", false)]
    fn recognises_identifiers(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(is_identifier(raw), expected);
    }
}
