//! Source validator.
//!
//! A whole-input pre-scan that runs before tokenization. It rejects the
//! byte-order mark, tabs, every code point outside the allowed set, and
//! trailing spaces, each with the position of the offending character.
//! After validation the lexer only ever sees clean input.

use yay_util::unicode::is_allowed_code_point;
use yay_util::{SyntaxResult, YaySyntaxError};

/// Validates raw source text against the YAY character rules.
///
/// # Errors
///
/// * `Illegal BOM` at 1:1 when the input starts with U+FEFF
/// * `Tab not allowed (use spaces)` at the tab's position
/// * `Forbidden code point U+XXXX` for any other disallowed code point
/// * `Unexpected trailing space` when a line ends with U+0020
pub fn validate_source(source: &str) -> SyntaxResult<()> {
    if source.starts_with('\u{feff}') {
        return Err(YaySyntaxError::at("Illegal BOM", 1, 1));
    }

    let mut line: u32 = 1;
    let mut col: u32 = 1;
    for ch in source.chars() {
        let cp = ch as u32;
        if !is_allowed_code_point(cp) {
            if cp == 0x09 {
                return Err(YaySyntaxError::at("Tab not allowed (use spaces)", line, col));
            }
            return Err(YaySyntaxError::at(
                format!("Forbidden code point U+{:04X}", cp),
                line,
                col,
            ));
        }
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }

    for (i, text) in source.split('\n').enumerate() {
        if text.ends_with(' ') {
            return Err(YaySyntaxError::at(
                "Unexpected trailing space",
                (i + 1) as u32,
                text.chars().count() as u32,
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn err(source: &str) -> YaySyntaxError {
        validate_source(source).unwrap_err()
    }

    #[test]
    fn test_clean_source() {
        assert!(validate_source("a: 1\nb: 'two'\n").is_ok());
        assert!(validate_source("").is_ok());
    }

    #[test]
    fn test_bom() {
        let e = err("\u{feff}a: 1");
        assert_eq!(e.message, "Illegal BOM");
        assert_eq!((e.line, e.col), (Some(1), Some(1)));
    }

    #[test]
    fn test_tab() {
        let e = err("\t");
        assert_eq!(e.message, "Tab not allowed (use spaces)");
        assert_eq!((e.line, e.col), (Some(1), Some(1)));
    }

    #[test]
    fn test_tab_position() {
        let e = err("a: 1\nb:\t2\n");
        assert_eq!(e.message, "Tab not allowed (use spaces)");
        assert_eq!((e.line, e.col), (Some(2), Some(3)));
    }

    #[test]
    fn test_forbidden_code_point() {
        let e = err("a: '\u{0007}'");
        assert_eq!(e.message, "Forbidden code point U+0007");
        assert_eq!((e.line, e.col), (Some(1), Some(5)));
    }

    #[test]
    fn test_carriage_return_forbidden() {
        let e = err("a: 1\r\n");
        assert_eq!(e.message, "Forbidden code point U+000D");
    }

    #[test]
    fn test_trailing_space() {
        let e = err("a: 1 \nb: 2\n");
        assert_eq!(e.message, "Unexpected trailing space");
        assert_eq!((e.line, e.col), (Some(1), Some(5)));
    }

    #[test]
    fn test_final_newline_not_trailing_space() {
        assert!(validate_source("a: 1\n").is_ok());
    }

    #[test]
    fn test_unicode_content_allowed() {
        assert!(validate_source("name: 'Ada Lovelace — 1815'\n").is_ok());
        assert!(validate_source("emoji: '😀'\n").is_ok());
    }
}
