//! Block composite parsing.
//!
//! Block arrays are dash-prefixed lines; block objects are `key: value`
//! lines. Both compare INDENT values against the indent they started at to
//! find their end, and both read item values at `base + 2`. Property
//! values may continue on the following lines: nested objects, named
//! arrays (which may share the key's indent), and concatenated quoted
//! strings.

use yay_util::value::Object;
use yay_util::{SyntaxResult, Value, YaySyntaxError};

use yay_lex::{Token, TokenKind};

use crate::Parser;

impl<'a> Parser<'a> {
    /// Parses a block array whose dashes sit at `base_indent`.
    pub(crate) fn parse_block_array(&mut self, base_indent: u32) -> SyntaxResult<Value> {
        let mut items = Vec::new();

        loop {
            if let TokenKind::Indent(indent) = self.peek(0).kind {
                if indent < base_indent {
                    break;
                }
                if indent > base_indent && !items.is_empty() {
                    break;
                }
                self.bump();
            }

            if !matches!(self.peek(0).kind, TokenKind::Dash) {
                break;
            }
            let dash = self.peek(0).clone();
            self.bump();

            // Exactly one space after the dash.
            let next_col = dash.col + 1;
            if self.char_at(dash.line, next_col) != Some(' ') {
                return Err(YaySyntaxError::at(
                    "Expected space after \"-\"",
                    dash.line,
                    next_col,
                ));
            }
            if self.char_at(dash.line, next_col + 1) == Some(' ') {
                if base_indent == 0 && dash.col == 1 {
                    return Err(YaySyntaxError::at("Unexpected leading space", dash.line, 1));
                }
                return Err(YaySyntaxError::at(
                    "Unexpected space after \"-\"",
                    dash.line,
                    dash.col,
                ));
            }

            items.push(self.parse_array_item(base_indent + 2)?);

            if matches!(self.peek(0).kind, TokenKind::Newline) {
                self.bump();
            }
        }

        Ok(Value::Array(items))
    }

    /// Parses the value of a single array item.
    fn parse_array_item(&mut self, item_indent: u32) -> SyntaxResult<Value> {
        let token = self.peek(0).clone();
        match token.kind {
            // A dash right after the dash: nested block array.
            TokenKind::Dash => self.parse_block_array(item_indent),
            TokenKind::Null
            | TokenKind::Bool(_)
            | TokenKind::Int(_)
            | TokenKind::Float(_)
            | TokenKind::Str(_)
            | TokenKind::Bytes(_) => self.parse_inline_value(),
            TokenKind::LBracket => self.parse_inline_array(),
            TokenKind::LBrace => self.parse_inline_object(),
            TokenKind::Ident(name) => {
                if matches!(self.peek(1).kind, TokenKind::Colon) {
                    return self.parse_block_object(item_indent);
                }
                let first = name.chars().next().unwrap_or('?');
                Err(YaySyntaxError::at(
                    format!("Unexpected character \"{}\"", first),
                    token.line,
                    token.col,
                ))
            }
            other => Err(self.error_at_peek(format!(
                "Expected array item value, got {}",
                other.name()
            ))),
        }
    }

    /// Parses a block object whose keys sit at `base_indent`.
    pub(crate) fn parse_block_object(&mut self, base_indent: u32) -> SyntaxResult<Value> {
        let mut entries = Object::new();
        let mut current_indent = base_indent;

        loop {
            if let TokenKind::Indent(indent) = self.peek(0).kind {
                if indent < base_indent {
                    break;
                }
                if indent > base_indent && !entries.is_empty() {
                    break;
                }
                current_indent = indent;
                self.bump();
            }

            if !matches!(self.peek(0).kind, TokenKind::Ident(_) | TokenKind::Str(_)) {
                break;
            }
            if !matches!(self.peek(1).kind, TokenKind::Colon) {
                break;
            }

            let key_token = self.peek(0).clone();
            let key = self.parse_key()?;

            let colon = self.peek(0).clone();
            self.expect(&TokenKind::Colon)?;
            self.check_no_space_before(&colon, ':')?;

            // Exactly one space after the colon when the value is on the
            // same line.
            if !matches!(self.peek(0).kind, TokenKind::Newline) {
                self.check_one_space_after_colon(&colon)?;
            }

            let value = self.parse_object_value(current_indent)?;
            if entries.insert(key.clone(), value).is_some() {
                return Err(YaySyntaxError::at(
                    format!("Duplicate key '{}'", key),
                    key_token.line,
                    key_token.col,
                ));
            }

            if matches!(self.peek(0).kind, TokenKind::Newline) {
                self.bump();
            }
        }

        Ok(Value::Object(entries))
    }

    /// Parses the value part of a `key: value` pair, where `key_indent` is
    /// the indent of the key's line.
    fn parse_object_value(&mut self, key_indent: u32) -> SyntaxResult<Value> {
        let token = self.peek(0).clone();
        match token.kind {
            TokenKind::LBrace => {
                let next = self.peek(1).clone();
                if matches!(next.kind, TokenKind::RBrace) {
                    if next.col != token.col + 1 {
                        return Err(YaySyntaxError::at(
                            "Unexpected space after \"{\"",
                            token.line,
                            token.col + 1,
                        ));
                    }
                    self.bump();
                    self.bump();
                    return Ok(Value::Object(Object::new()));
                }
                self.parse_inline_object()
            }
            TokenKind::Null | TokenKind::Bool(_) | TokenKind::Int(_) | TokenKind::Float(_) => {
                self.parse_inline_value()
            }
            TokenKind::Str(_) => {
                self.check_string_block_leader(&token)?;
                self.parse_inline_value()
            }
            TokenKind::Bytes(_) => {
                self.check_bytes_block_leader(&token)?;
                self.parse_inline_value()
            }
            TokenKind::LBracket => self.parse_inline_array(),
            TokenKind::Newline => {
                self.bump();

                let child_indent = match self.peek(0).kind {
                    TokenKind::Indent(n) => n,
                    _ => return Err(self.error_at_peek("Expected value after property")),
                };
                if child_indent < key_indent {
                    return Err(self.error_at_peek("Expected indentation for nested value"));
                }
                self.bump();

                let next = self.peek(0).clone();
                match next.kind {
                    // Named arrays may share the key's indent.
                    TokenKind::Dash => self.parse_block_array(child_indent),
                    TokenKind::Ident(_) | TokenKind::Str(_)
                        if matches!(self.peek(1).kind, TokenKind::Colon) =>
                    {
                        self.parse_block_object(child_indent)
                    }
                    TokenKind::Str(_) => match self.parse_concatenated_strings(child_indent) {
                        Some(joined) => Ok(Value::Str(joined)),
                        None => Err(self.error_at_peek("Unexpected indent")),
                    },
                    _ => Err(self.error_at_peek("Unexpected indent")),
                }
            }
            other => Err(self.error_at_peek(format!(
                "Expected value after colon, got {}",
                other.name()
            ))),
        }
    }

    /// A backtick block string in property position must not carry content
    /// on the key's line.
    fn check_string_block_leader(&self, token: &Token) -> SyntaxResult<()> {
        let mut chars = self.line_text(token.line).chars();
        if chars.nth((token.col - 1) as usize) == Some('`') {
            let rest: String = chars.collect();
            if rest.starts_with(' ') && !rest.trim().is_empty() {
                return Err(YaySyntaxError::at(
                    "Expected newline after block leader in property",
                    token.line,
                    token.col,
                ));
            }
        }
        Ok(())
    }

    /// A `>` block byte array in property position must not carry hex on
    /// the key's line (a comment is fine).
    fn check_bytes_block_leader(&self, token: &Token) -> SyntaxResult<()> {
        let mut chars = self.line_text(token.line).chars();
        if chars.nth((token.col - 1) as usize) == Some('>') {
            let mut rest = chars.as_str();
            rest = rest.strip_prefix(' ').unwrap_or(rest);
            if rest
                .chars()
                .next()
                .is_some_and(|c| matches!(c, '0'..='9' | 'a'..='f'))
            {
                return Err(YaySyntaxError::at(
                    "Expected newline after block leader in property",
                    token.line,
                    token.col,
                ));
            }
        }
        Ok(())
    }

    /// Collects consecutive quoted strings on indented lines. Returns
    /// `None` when fewer than two parts are found; a lone string on its
    /// own line is not a valid property value.
    fn parse_concatenated_strings(&mut self, base_indent: u32) -> Option<String> {
        let mut parts: Vec<String> = Vec::new();

        loop {
            if matches!(self.peek(0).kind, TokenKind::Newline) {
                self.bump();
                match self.peek(0).kind {
                    TokenKind::Indent(indent) if indent >= base_indent => self.bump(),
                    _ => break,
                }
            }

            let token = self.peek(0).clone();
            match token.kind {
                TokenKind::Str(s) => {
                    self.bump();
                    parts.push(s);
                }
                _ => break,
            }
        }

        if parts.len() < 2 {
            return None;
        }
        Some(parts.concat())
    }
}
