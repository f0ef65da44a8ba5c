//! Quoted string lexing.
//!
//! Double-quoted strings resolve JSON-style escapes plus the braced
//! `\u{...}` form; single-quoted strings are literal except for `''`.
//! Neither form may span lines or contain raw control characters.

use yay_util::SyntaxResult;

use crate::{Lexer, Token, TokenKind};

impl<'a> Lexer<'a> {
    /// Lexes a quoted string, dispatching on the quote character.
    ///
    /// The cursor sits on the opening quote; the token position is the
    /// quote's position.
    pub(crate) fn read_quoted(&mut self, quote: char) -> SyntaxResult<Token> {
        let start_line = self.cursor.line();
        let start_col = self.cursor.column();
        self.cursor.advance();

        if quote == '"' {
            self.read_double_quoted(start_line, start_col)
        } else {
            self.read_single_quoted(start_line, start_col)
        }
    }

    fn read_double_quoted(&mut self, start_line: u32, start_col: u32) -> SyntaxResult<Token> {
        let mut content = String::new();

        loop {
            if self.cursor.is_at_end() {
                return Err(self.error_here("Unterminated string"));
            }
            let ch = self.cursor.current_char();

            if ch == '"' {
                self.cursor.advance();
                break;
            }

            if ch == '\\' {
                self.cursor.advance();
                if self.cursor.is_at_end() {
                    return Err(self.error_here("Unterminated escape sequence"));
                }
                let esc = self.cursor.current_char();
                let simple = match esc {
                    'n' => Some('\n'),
                    'r' => Some('\r'),
                    't' => Some('\t'),
                    'b' => Some('\u{0008}'),
                    'f' => Some('\u{000C}'),
                    '\\' => Some('\\'),
                    '/' => Some('/'),
                    '"' => Some('"'),
                    _ => None,
                };
                if let Some(c) = simple {
                    content.push(c);
                    self.cursor.advance();
                    continue;
                }
                if esc == 'u' {
                    content.push(self.read_unicode_escape()?);
                    continue;
                }
                return Err(self.error_here("Bad escaped character"));
            }

            if (ch as u32) < 0x20 {
                if ch == '\n' || ch == '\r' {
                    return Err(self.error_here("Unterminated string"));
                }
                return Err(self.error_here("Bad character in string"));
            }

            content.push(ch);
            self.cursor.advance();
        }

        Ok(Token::new(TokenKind::Str(content), start_line, start_col))
    }

    /// Reads a `\u{...}` escape; the cursor sits on the `u`.
    ///
    /// One to six hex digits (either case) inside braces. Surrogates and
    /// values past U+10FFFF are rejected.
    fn read_unicode_escape(&mut self) -> SyntaxResult<char> {
        self.cursor.advance();
        if self.cursor.current_char() != '{' {
            return Err(self.error_here("Bad escaped character"));
        }
        self.cursor.advance();

        let mut hex = String::new();
        while !self.cursor.is_at_end() && self.cursor.current_char() != '}' {
            let h = self.cursor.current_char();
            if !h.is_ascii_hexdigit() {
                return Err(self.error_here("Bad Unicode escape"));
            }
            hex.push(h);
            self.cursor.advance();
            if hex.len() > 6 {
                return Err(self.error_here("Bad Unicode escape"));
            }
        }
        if self.cursor.current_char() != '}' {
            return Err(self.error_here("Bad Unicode escape"));
        }
        self.cursor.advance();
        if hex.is_empty() {
            return Err(self.error_here("Bad Unicode escape"));
        }

        let cp = u32::from_str_radix(&hex, 16)
            .map_err(|_| self.error_here("Bad Unicode escape"))?;
        if (0xD800..=0xDFFF).contains(&cp) {
            return Err(self.error_here("Illegal surrogate"));
        }
        if cp > 0x10FFFF {
            return Err(self.error_here("Unicode code point out of range"));
        }
        char::from_u32(cp).ok_or_else(|| self.error_here("Bad Unicode escape"))
    }

    fn read_single_quoted(&mut self, start_line: u32, start_col: u32) -> SyntaxResult<Token> {
        let mut content = String::new();

        loop {
            if self.cursor.is_at_end() {
                return Err(self.error_here("Unterminated string"));
            }
            let ch = self.cursor.current_char();

            if ch == '\'' {
                self.cursor.advance();
                if self.cursor.current_char() == '\'' {
                    content.push('\'');
                    self.cursor.advance();
                } else {
                    break;
                }
            } else if (ch as u32) < 0x20 {
                if ch == '\n' || ch == '\r' {
                    return Err(self.error_here("Unterminated string"));
                }
                return Err(self.error_here("Bad character in string"));
            } else {
                content.push(ch);
                self.cursor.advance();
            }
        }

        Ok(Token::new(TokenKind::Str(content), start_line, start_col))
    }
}

#[cfg(test)]
mod tests {
    use yay_util::YaySyntaxError;

    use crate::{Lexer, TokenKind};

    fn lex_str(source: &str) -> String {
        let tokens = Lexer::new(source).tokenize().unwrap();
        match &tokens[1].kind {
            TokenKind::Str(s) => s.clone(),
            other => panic!("expected STRING, got {}", other.name()),
        }
    }

    fn lex_str_err(source: &str) -> YaySyntaxError {
        Lexer::new(source).tokenize().unwrap_err()
    }

    #[test]
    fn test_double_quoted() {
        assert_eq!(lex_str("\"hello\""), "hello");
        assert_eq!(lex_str("\"\""), "");
    }

    #[test]
    fn test_double_quoted_escapes() {
        assert_eq!(lex_str(r#""a\nb""#), "a\nb");
        assert_eq!(lex_str(r#""tab\there""#), "tab\there");
        assert_eq!(lex_str(r#""q\"q""#), "q\"q");
        assert_eq!(lex_str(r#""back\\slash""#), "back\\slash");
        assert_eq!(lex_str(r#""sol\/idus""#), "sol/idus");
        assert_eq!(lex_str(r#""\b\f\r""#), "\u{0008}\u{000C}\r");
    }

    #[test]
    fn test_unicode_escape() {
        assert_eq!(lex_str(r#""\u{41}""#), "A");
        assert_eq!(lex_str(r#""\u{1F600}""#), "😀");
        assert_eq!(lex_str(r#""\u{0}""#), "\0");
    }

    #[test]
    fn test_unicode_escape_uppercase_hex() {
        assert_eq!(lex_str(r#""\u{1F600}""#), lex_str(r#""\u{1f600}""#));
    }

    #[test]
    fn test_bad_escape() {
        assert_eq!(lex_str_err(r#""\q""#).message, "Bad escaped character");
    }

    #[test]
    fn test_unicode_escape_requires_braces() {
        assert_eq!(lex_str_err(r#""\u0041""#).message, "Bad escaped character");
    }

    #[test]
    fn test_bad_unicode_escape() {
        assert_eq!(lex_str_err(r#""\u{}""#).message, "Bad Unicode escape");
        assert_eq!(lex_str_err(r#""\u{xyz}""#).message, "Bad Unicode escape");
        assert_eq!(lex_str_err(r#""\u{1234567}""#).message, "Bad Unicode escape");
        assert_eq!(lex_str_err("\"\\u{41\"").message, "Bad Unicode escape");
    }

    #[test]
    fn test_surrogate_escape_rejected() {
        assert_eq!(lex_str_err(r#""\u{d800}""#).message, "Illegal surrogate");
        assert_eq!(lex_str_err(r#""\u{DFFF}""#).message, "Illegal surrogate");
    }

    #[test]
    fn test_out_of_range_escape_rejected() {
        assert_eq!(
            lex_str_err(r#""\u{110000}""#).message,
            "Unicode code point out of range"
        );
    }

    #[test]
    fn test_unterminated_double_quoted() {
        assert_eq!(lex_str_err("\"abc").message, "Unterminated string");
        assert_eq!(lex_str_err("\"abc\ndef\"").message, "Unterminated string");
    }

    #[test]
    fn test_single_quoted() {
        assert_eq!(lex_str("'hello'"), "hello");
        assert_eq!(lex_str("''"), "");
    }

    #[test]
    fn test_single_quote_doubling() {
        assert_eq!(lex_str("'it''s'"), "it's");
        assert_eq!(lex_str("''''"), "'");
    }

    #[test]
    fn test_single_quoted_is_literal() {
        assert_eq!(lex_str(r"'a\nb'"), "a\\nb");
    }

    #[test]
    fn test_unterminated_single_quoted() {
        assert_eq!(lex_str_err("'abc").message, "Unterminated string");
        assert_eq!(lex_str_err("'abc\n'").message, "Unterminated string");
    }
}
