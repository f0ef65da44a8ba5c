//! Inline composite parsing.
//!
//! Inline arrays `[a, b]` and objects `{k: v}` live on a single line.
//! Before walking their tokens, the raw source line is re-scanned from the
//! opener's column with a quote-aware state machine that reports spacing
//! violations at the exact offending column. When a missing space after a
//! comma and a space before a nearby closer could both apply, the closer
//! error wins.

use yay_util::value::Object;
use yay_util::{SyntaxResult, Value, YaySyntaxError};

use yay_lex::TokenKind;

use crate::Parser;

impl<'a> Parser<'a> {
    /// Parses an inline array. The current token is `[`.
    pub(crate) fn parse_inline_array(&mut self) -> SyntaxResult<Value> {
        let lbracket = self.peek(0).clone();
        self.expect(&TokenKind::LBracket)?;

        if matches!(self.peek(0).kind, TokenKind::Newline) {
            return Err(YaySyntaxError::at(
                "Unexpected newline in inline array",
                lbracket.line,
                lbracket.col,
            ));
        }

        self.validate_inline_syntax(lbracket.line, lbracket.col, '[', ']')?;

        let mut items = Vec::new();
        loop {
            if matches!(self.peek(0).kind, TokenKind::RBracket) {
                break;
            }
            if matches!(self.peek(0).kind, TokenKind::Eof) {
                return Err(self.error_at_peek("Unterminated array"));
            }
            if matches!(self.peek(0).kind, TokenKind::Newline) {
                return Err(YaySyntaxError::at(
                    "Unexpected newline in inline array",
                    lbracket.line,
                    lbracket.col,
                ));
            }

            items.push(self.parse_inline_value()?);

            if matches!(self.peek(0).kind, TokenKind::Comma) {
                self.bump();
            } else if !matches!(self.peek(0).kind, TokenKind::RBracket) {
                return Err(self.error_at_peek(format!(
                    "Expected ',' or ']', got {}",
                    self.peek(0).kind.name()
                )));
            }
        }

        self.expect(&TokenKind::RBracket)?;
        Ok(Value::Array(items))
    }

    /// Parses an inline object. The current token is `{`.
    pub(crate) fn parse_inline_object(&mut self) -> SyntaxResult<Value> {
        let lbrace = self.peek(0).clone();
        self.expect(&TokenKind::LBrace)?;

        if matches!(self.peek(0).kind, TokenKind::Newline) {
            return Err(YaySyntaxError::at(
                "Unexpected newline in inline object",
                lbrace.line,
                lbrace.col,
            ));
        }

        self.validate_inline_syntax(lbrace.line, lbrace.col, '{', '}')?;

        let mut entries = Object::new();
        loop {
            if matches!(self.peek(0).kind, TokenKind::RBrace) {
                break;
            }
            if matches!(self.peek(0).kind, TokenKind::Eof) {
                return Err(self.error_at_peek("Unterminated object"));
            }
            if matches!(self.peek(0).kind, TokenKind::Newline) {
                return Err(YaySyntaxError::at(
                    "Unexpected newline in inline object",
                    lbrace.line,
                    lbrace.col,
                ));
            }

            let key_token = self.peek(0).clone();
            let key = self.parse_key()?;

            let colon = self.peek(0).clone();
            if !matches!(colon.kind, TokenKind::Colon) {
                return Err(YaySyntaxError::at(
                    "Expected colon after key",
                    lbrace.line,
                    lbrace.col,
                ));
            }
            self.bump();
            self.check_no_space_before(&colon, ':')?;
            self.check_one_space_after_colon(&colon)?;

            let value = self.parse_inline_value()?;
            if entries.insert(key.clone(), value).is_some() {
                return Err(YaySyntaxError::at(
                    format!("Duplicate key '{}'", key),
                    key_token.line,
                    key_token.col,
                ));
            }

            if matches!(self.peek(0).kind, TokenKind::Comma) {
                self.bump();
            } else if !matches!(self.peek(0).kind, TokenKind::RBrace) {
                return Err(self.error_at_peek(format!(
                    "Expected ',' or '}}', got {}",
                    self.peek(0).kind.name()
                )));
            }
        }

        self.expect(&TokenKind::RBrace)?;
        Ok(Value::Object(entries))
    }

    /// Parses a value in inline position (no block forms).
    pub(crate) fn parse_inline_value(&mut self) -> SyntaxResult<Value> {
        let token = self.peek(0).clone();
        match token.kind {
            TokenKind::Null => {
                self.bump();
                Ok(Value::Null)
            }
            TokenKind::Bool(b) => {
                self.bump();
                Ok(Value::Bool(b))
            }
            TokenKind::Int(i) => {
                self.bump();
                Ok(Value::Int(i))
            }
            TokenKind::Float(f) => {
                self.bump();
                Ok(Value::Float(f))
            }
            TokenKind::Str(s) => {
                self.bump();
                Ok(Value::Str(s))
            }
            TokenKind::Bytes(b) => {
                self.bump();
                Ok(Value::Bytes(b))
            }
            TokenKind::LBracket => self.parse_inline_array(),
            TokenKind::LBrace => self.parse_inline_object(),
            other => Err(self.error_at_peek(format!("Expected value, got {}", other.name()))),
        }
    }

    /// Parses an object key: a bare identifier or a quoted string.
    pub(crate) fn parse_key(&mut self) -> SyntaxResult<String> {
        let token = self.peek(0).clone();
        match token.kind {
            TokenKind::Ident(name) => {
                self.bump();
                Ok(name)
            }
            TokenKind::Str(s) => {
                self.bump();
                Ok(s)
            }
            other => Err(self.error_at_peek(format!("Expected key, got {}", other.name()))),
        }
    }

    /// Verifies that a colon is followed by exactly one space, given the
    /// value continues on the same line.
    pub(crate) fn check_one_space_after_colon(
        &self,
        colon: &yay_lex::Token,
    ) -> SyntaxResult<()> {
        let next_col = colon.col + 1;
        if self.char_at(colon.line, next_col) != Some(' ') {
            return Err(YaySyntaxError::at(
                "Expected space after \":\"",
                colon.line,
                next_col,
            ));
        }
        if self.char_at(colon.line, next_col + 1) == Some(' ') {
            return Err(YaySyntaxError::at(
                "Unexpected space after \":\"",
                colon.line,
                next_col + 1,
            ));
        }
        Ok(())
    }

    /// Re-scans the raw opener line for spacing violations inside an
    /// inline composite, before any token is consumed.
    ///
    /// Checks, in order: space after the opener, space before the closer,
    /// space before a comma, missing or doubled space after a comma. The
    /// comma check looks ahead so that a space hugging the closing bracket
    /// is reported in preference to a missing space after the last comma.
    pub(crate) fn validate_inline_syntax(
        &self,
        line: u32,
        start_col: u32,
        open_char: char,
        close_char: char,
    ) -> SyntaxResult<()> {
        let chars: Vec<char> = self.line_text(line).chars().collect();
        let start = (start_col - 1) as usize;
        let s: &[char] = if start <= chars.len() { &chars[start..] } else { &[] };

        let mut in_single = false;
        let mut in_double = false;
        let mut escape = false;
        let mut depth: u32 = 0;

        for (i, &ch) in s.iter().enumerate() {
            if escape {
                escape = false;
                continue;
            }
            if in_single {
                if ch == '\\' {
                    escape = true;
                } else if ch == '\'' {
                    in_single = false;
                }
                continue;
            }
            if in_double {
                if ch == '\\' {
                    escape = true;
                } else if ch == '"' {
                    in_double = false;
                }
                continue;
            }
            if ch == '\'' {
                in_single = true;
                continue;
            }
            if ch == '"' {
                in_double = true;
                continue;
            }
            if ch == open_char {
                depth += 1;
                if i + 1 < s.len() && s[i + 1] == ' ' {
                    return Err(YaySyntaxError::at(
                        format!("Unexpected space after \"{}\"", open_char),
                        line,
                        start_col + i as u32 + 1,
                    ));
                }
                continue;
            }
            if ch == close_char {
                if i > 0 && s[i - 1] == ' ' {
                    return Err(YaySyntaxError::at(
                        format!("Unexpected space before \"{}\"", close_char),
                        line,
                        start_col + i as u32 - 1,
                    ));
                }
                depth = depth.saturating_sub(1);
                continue;
            }
            if ch == ',' {
                if i > 0 && s[i - 1] == ' ' {
                    return Err(YaySyntaxError::at(
                        "Unexpected space before \",\"",
                        line,
                        start_col + i as u32 - 1,
                    ));
                }
                if i + 1 < s.len()
                    && s[i + 1] != ' '
                    && s[i + 1] != close_char
                    && !closer_has_space_before(s, i, depth, open_char, close_char)
                {
                    return Err(YaySyntaxError::at(
                        "Expected space after \",\"",
                        line,
                        start_col + i as u32 + 1,
                    ));
                }
                if i + 2 < s.len() && s[i + 1] == ' ' && s[i + 2] == ' ' {
                    return Err(YaySyntaxError::at(
                        "Unexpected space after \",\"",
                        line,
                        start_col + i as u32 + 2,
                    ));
                }
            }
        }

        Ok(())
    }
}

/// Looks ahead from the comma at `s[i]` for the closer at the same depth;
/// true when that closer is directly preceded by a space (in which case the
/// space-before-closer error takes precedence over the comma's).
fn closer_has_space_before(
    s: &[char],
    i: usize,
    depth: u32,
    open_char: char,
    close_char: char,
) -> bool {
    let mut lookahead_depth = depth;
    let mut in_single = false;
    let mut in_double = false;
    let mut escape = false;

    for j in (i + 1)..s.len() {
        let cj = s[j];
        if escape {
            escape = false;
            continue;
        }
        if in_single {
            if cj == '\\' {
                escape = true;
            } else if cj == '\'' {
                in_single = false;
            }
            continue;
        }
        if in_double {
            if cj == '\\' {
                escape = true;
            } else if cj == '"' {
                in_double = false;
            }
            continue;
        }
        if cj == '\'' {
            in_single = true;
            continue;
        }
        if cj == '"' {
            in_double = true;
            continue;
        }
        if cj == open_char {
            lookahead_depth += 1;
            continue;
        }
        if cj == close_char {
            if lookahead_depth == depth {
                return s[j - 1] == ' ';
            }
            lookahead_depth = lookahead_depth.saturating_sub(1);
            continue;
        }
        if cj == ',' && lookahead_depth == depth {
            break;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use num_bigint::BigInt;
    use yay_util::Value;

    use crate::parse_str;

    fn parse(source: &str) -> Value {
        parse_str(source).unwrap()
    }

    fn parse_err(source: &str) -> yay_util::YaySyntaxError {
        parse_str(source).unwrap_err()
    }

    fn ints(values: &[i64]) -> Value {
        Value::Array(values.iter().map(|&i| Value::Int(BigInt::from(i))).collect())
    }

    #[test]
    fn test_inline_array() {
        assert_eq!(parse("[1, 2, 3]"), ints(&[1, 2, 3]));
        assert_eq!(parse("[]"), Value::Array(Vec::new()));
    }

    #[test]
    fn test_nested_inline_array() {
        assert_eq!(
            parse("[[1], [2, 3]]"),
            Value::Array(vec![ints(&[1]), ints(&[2, 3])])
        );
    }

    #[test]
    fn test_inline_object() {
        let v = parse("{a: 1, b: 'two'}");
        let obj = v.as_object().unwrap();
        assert_eq!(obj["a"], Value::Int(BigInt::from(1)));
        assert_eq!(obj["b"], Value::Str("two".to_string()));
    }

    #[test]
    fn test_empty_inline_object() {
        assert_eq!(parse("{}"), Value::Object(Default::default()));
    }

    #[test]
    fn test_inline_object_quoted_key() {
        let v = parse("{'spaced key': 1}");
        assert_eq!(
            v.as_object().unwrap()["spaced key"],
            Value::Int(BigInt::from(1))
        );
    }

    #[test]
    fn test_mixed_nesting() {
        let v = parse("{a: [1, {b: null}]}");
        let inner = v.as_object().unwrap()["a"].as_array().unwrap();
        assert_eq!(inner[0], Value::Int(BigInt::from(1)));
        assert_eq!(inner[1].as_object().unwrap()["b"], Value::Null);
    }

    #[test]
    fn test_missing_space_after_comma() {
        let e = parse_err("[1, 2,3]");
        assert_eq!(e.message, "Expected space after \",\"");
        assert_eq!(e.line, Some(1));
    }

    #[test]
    fn test_space_before_comma() {
        let e = parse_err("[1 , 2]");
        assert_eq!(e.message, "Unexpected space before \",\"");
        assert_eq!((e.line, e.col), (Some(1), Some(3)));
    }

    #[test]
    fn test_double_space_after_comma() {
        let e = parse_err("[1,  2]");
        assert_eq!(e.message, "Unexpected space after \",\"");
        assert_eq!((e.line, e.col), (Some(1), Some(5)));
    }

    #[test]
    fn test_space_after_opener() {
        let e = parse_err("[ 1]");
        assert_eq!(e.message, "Unexpected space after \"[\"");
        assert_eq!((e.line, e.col), (Some(1), Some(2)));
    }

    #[test]
    fn test_space_before_closer() {
        let e = parse_err("[1 ]");
        assert_eq!(e.message, "Unexpected space before \"]\"");
        assert_eq!((e.line, e.col), (Some(1), Some(3)));
    }

    #[test]
    fn test_closer_error_beats_comma_error() {
        // Both a missing space after ',' and a space before ']' apply; the
        // closer error is reported.
        let e = parse_err("[1,2 ]");
        assert_eq!(e.message, "Unexpected space before \"]\"");
    }

    #[test]
    fn test_spacing_ignored_inside_strings() {
        let v = parse("['a, b', 'c [ d']");
        let items = v.as_array().unwrap();
        assert_eq!(items[0], Value::Str("a, b".to_string()));
        assert_eq!(items[1], Value::Str("c [ d".to_string()));
    }

    #[test]
    fn test_object_colon_spacing() {
        let e = parse_err("{a:1}");
        assert_eq!(e.message, "Expected space after \":\"");
        let e = parse_err("{a : 1}");
        assert_eq!(e.message, "Unexpected space before \":\"");
    }

    #[test]
    fn test_newline_in_inline_array() {
        let e = parse_err("[1,\n2]");
        assert_eq!(e.message, "Unexpected newline in inline array");
        assert_eq!((e.line, e.col), (Some(1), Some(1)));
    }

    #[test]
    fn test_newline_in_inline_object() {
        let e = parse_err("{a: 1,\nb: 2}");
        assert_eq!(e.message, "Unexpected newline in inline object");
    }

    #[test]
    fn test_unterminated_array() {
        // The synthetic trailing NEWLINE is what an unclosed array runs
        // into first.
        let e = parse_err("[1, 2");
        assert_eq!(e.message, "Expected ',' or ']', got NEWLINE");
    }

    #[test]
    fn test_duplicate_key_inline() {
        let e = parse_err("{a: 1, a: 2}");
        assert_eq!(e.message, "Duplicate key 'a'");
        assert_eq!((e.line, e.col), (Some(1), Some(8)));
    }

    #[test]
    fn test_trailing_comma_tolerated() {
        assert_eq!(parse("[1,]"), ints(&[1]));
    }
}
