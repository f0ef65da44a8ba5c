//! Identifier and keyword lexing.

use crate::{Lexer, Token, TokenKind};

impl<'a> Lexer<'a> {
    /// Lexes an identifier or keyword.
    ///
    /// Identifiers are runs of letters, digits, `_`, and `-`, not starting
    /// with a digit (the dispatch guarantees the first character). The
    /// keywords `null`, `true`, `false`, `infinity`, and `nan` produce
    /// their literal tokens; everything else is an IDENT.
    pub(crate) fn read_identifier(&mut self) -> Token {
        let start_line = self.cursor.line();
        let start_col = self.cursor.column();

        let mut name = String::new();
        loop {
            let ch = self.cursor.current_char();
            if ch.is_alphanumeric() || ch == '_' || ch == '-' {
                name.push(ch);
                self.cursor.advance();
            } else {
                break;
            }
        }

        let kind = match name.as_str() {
            "null" => TokenKind::Null,
            "true" => TokenKind::Bool(true),
            "false" => TokenKind::Bool(false),
            "infinity" => TokenKind::Float(f64::INFINITY),
            "nan" => TokenKind::Float(f64::NAN),
            _ => TokenKind::Ident(name),
        };

        Token::new(kind, start_line, start_col)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Lexer, Token, TokenKind};

    fn lex_one(source: &str) -> Token {
        let tokens = Lexer::new(source).tokenize().unwrap();
        tokens[1].clone()
    }

    #[test]
    fn test_keywords() {
        assert_eq!(lex_one("null").kind, TokenKind::Null);
        assert_eq!(lex_one("true").kind, TokenKind::Bool(true));
        assert_eq!(lex_one("false").kind, TokenKind::Bool(false));
    }

    #[test]
    fn test_infinity_and_nan() {
        assert!(matches!(lex_one("infinity").kind, TokenKind::Float(f) if f == f64::INFINITY));
        assert!(matches!(lex_one("nan").kind, TokenKind::Float(f) if f.is_nan()));
    }

    #[test]
    fn test_plain_identifier() {
        assert!(matches!(lex_one("name").kind, TokenKind::Ident(n) if n == "name"));
        assert!(matches!(lex_one("_x9").kind, TokenKind::Ident(n) if n == "_x9"));
    }

    #[test]
    fn test_dash_in_identifier() {
        assert!(matches!(lex_one("content-type").kind, TokenKind::Ident(n) if n == "content-type"));
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        assert!(matches!(lex_one("nullable").kind, TokenKind::Ident(n) if n == "nullable"));
        assert!(matches!(lex_one("truev").kind, TokenKind::Ident(n) if n == "truev"));
    }

    #[test]
    fn test_unicode_identifier() {
        assert!(matches!(lex_one("café").kind, TokenKind::Ident(n) if n == "café"));
    }
}
