//! String quoting and escaping.
//!
//! Quote selection: strings that need escape sequences use double quotes;
//! everything else prefers single quotes, except that a value containing an
//! apostrophe (and no double quote) reads better double-quoted. Characters
//! the source validator would reject are written as braced `\u{...}`
//! escapes so that every string value has a parseable rendering.

use yay_util::unicode::is_allowed_char;

/// Renders a string value in its canonical quoted form.
pub(crate) fn quote_string(s: &str) -> String {
    if needs_double_quotes(s) {
        return double_quoted(s);
    }
    if s.contains('\'') && !s.contains('"') {
        return format!("\"{}\"", s);
    }
    format!("'{}'", s.replace('\'', "''"))
}

/// Renders an object key: bare when it is a simple identifier, quoted like
/// a string value otherwise.
pub(crate) fn quote_key(key: &str) -> String {
    if is_simple_key(key) {
        key.to_string()
    } else {
        quote_string(key)
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
fn is_simple_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn needs_double_quotes(s: &str) -> bool {
    s.chars().any(|c| {
        matches!(c, '\n' | '\r' | '\t' | '\u{0008}' | '\u{000C}' | '\\')
            || (c as u32) < 0x20
            || !is_allowed_char(c)
    })
}

fn double_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 || !is_allowed_char(c) => {
                out.push_str(&format!("\\u{{{:x}}}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_single_quoted() {
        assert_eq!(quote_string("hello"), "'hello'");
        assert_eq!(quote_string(""), "''");
    }

    #[test]
    fn test_apostrophe_prefers_double() {
        assert_eq!(quote_string("it's"), "\"it's\"");
    }

    #[test]
    fn test_both_quotes_doubles_apostrophe() {
        assert_eq!(quote_string("a'b\"c"), "'a''b\"c'");
    }

    #[test]
    fn test_escapes() {
        assert_eq!(quote_string("a\nb"), "\"a\\nb\"");
        assert_eq!(quote_string("a\\b"), "\"a\\\\b\"");
        assert_eq!(quote_string("a\tb"), "\"a\\tb\"");
        assert_eq!(quote_string("\u{0008}\u{000C}\r"), "\"\\b\\f\\r\"");
    }

    #[test]
    fn test_quote_escaped_in_double_context() {
        assert_eq!(quote_string("say \"hi\"\n"), "\"say \\\"hi\\\"\\n\"");
    }

    #[test]
    fn test_control_chars_use_braced_unicode() {
        assert_eq!(quote_string("\u{0001}"), "\"\\u{1}\"");
        assert_eq!(quote_string("\u{001F}"), "\"\\u{1f}\"");
    }

    #[test]
    fn test_disallowed_code_points_escaped() {
        assert_eq!(quote_string("\u{007F}"), "\"\\u{7f}\"");
        assert_eq!(quote_string("\u{FDD0}"), "\"\\u{fdd0}\"");
    }

    #[test]
    fn test_allowed_unicode_left_raw() {
        assert_eq!(quote_string("héllo 中"), "'héllo 中'");
    }

    #[test]
    fn test_simple_keys() {
        assert!(is_simple_key("name"));
        assert!(is_simple_key("_private"));
        assert!(is_simple_key("k9"));
        assert!(!is_simple_key(""));
        assert!(!is_simple_key("9lives"));
        assert!(!is_simple_key("two words"));
        assert!(!is_simple_key("dash-key"));
        assert!(!is_simple_key("café"));
    }

    #[test]
    fn test_quote_key() {
        assert_eq!(quote_key("name"), "name");
        assert_eq!(quote_key("two words"), "'two words'");
        assert_eq!(quote_key("a\tb"), "\"a\\tb\"");
    }
}
