//! yay-par - Recursive Descent Parser for YAY
//!
//! ============================================================================
//! PARSING MODEL
//! ============================================================================
//!
//! The parser walks the materialized token vector produced by `yay-lex`
//! with one-token lookahead and builds a `Value` tree. The grammar is
//! LL(2) at its hardest point (a key is IDENT or STRING *followed by*
//! COLON), so `peek(offset)` into the vector is all the machinery needed.
//!
//! Two inputs, not one:
//!
//! ```text
//! tokens  - what to build      (Vec<Token> from the lexer)
//! source  - where spaces were  (the raw lines, for whitespace checks)
//! ```
//!
//! The lexer discards inter-token spaces, but YAY's grammar is pedantic
//! about them: exactly one space after `:` and `,` and `-`, none before
//! them, none just inside brackets. The parser re-reads the raw source
//! line at the recorded token columns to enforce these, which keeps the
//! token stream small and the errors positioned at the exact offending
//! character.
//!
//! BLOCK STRUCTURE:
//! ----------------
//! There are no DEDENT tokens. Each block construct remembers the INDENT
//! value it started at and stops consuming when a line's INDENT drops
//! below it. Nesting is reconstructed by comparing these numbers:
//!
//! ```text
//! INDENT(0) IDENT(a) COLON NEWLINE
//! INDENT(2) IDENT(b) COLON INT(1) NEWLINE     ->  {a: {b: 1}}
//! ```
//!
//! The parser never recovers: the first violation aborts with a positioned
//! `YaySyntaxError`.

use yay_lex::{Lexer, Token, TokenKind};
use yay_util::{SyntaxResult, Value, YaySyntaxError};

mod block;
mod edge_cases;
mod inline;

/// Parses a YAY document into a value tree.
///
/// Convenience wrapper over [`Parser`].
pub fn parse_str(source: &str) -> SyntaxResult<Value> {
    Parser::new(source)?.parse()
}

/// Recursive descent parser over the token stream.
pub struct Parser<'a> {
    /// Source split into lines, for column-accurate whitespace checks.
    lines: Vec<&'a str>,

    /// Token stream from the lexer, EOF-terminated.
    tokens: Vec<Token>,

    /// Current position in the token stream.
    pos: usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser for the given source, running the lexer eagerly.
    ///
    /// # Errors
    ///
    /// Propagates validation and lexing failures.
    pub fn new(source: &'a str) -> SyntaxResult<Self> {
        let tokens = Lexer::new(source).tokenize()?;
        Ok(Self {
            lines: source.split('\n').collect(),
            tokens,
            pos: 0,
        })
    }

    /// Parses the entire document: one value, then EOF.
    ///
    /// # Errors
    ///
    /// * `No value found in document` for empty or comment-only input
    /// * `Unexpected indent` when the root value is indented
    /// * `Unexpected extra content` when tokens follow the value
    pub fn parse(mut self) -> SyntaxResult<Value> {
        while matches!(self.peek(0).kind, TokenKind::Newline) {
            self.bump();
        }

        if let TokenKind::Indent(indent) = self.peek(0).kind {
            if indent > 0 {
                return Err(YaySyntaxError::at("Unexpected indent", self.peek(0).line, 1));
            }
            self.bump();
        }

        if matches!(self.peek(0).kind, TokenKind::Eof) {
            return Err(YaySyntaxError::at("No value found in document", 1, 1));
        }

        let value = self.parse_value(0)?;

        self.skip_newlines();
        if !matches!(self.peek(0).kind, TokenKind::Eof) {
            return Err(self.error_at_peek("Unexpected extra content"));
        }

        Ok(value)
    }

    /// Parses a value at the given indentation level.
    fn parse_value(&mut self, min_indent: u32) -> SyntaxResult<Value> {
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
                // A quoted key makes this a block object.
                if matches!(self.peek(1).kind, TokenKind::Colon) {
                    return self.parse_block_object(min_indent);
                }
                self.bump();
                Ok(Value::Str(s))
            }
            TokenKind::Bytes(b) => {
                self.bump();
                Ok(Value::Bytes(b))
            }
            TokenKind::LBracket => self.parse_inline_array(),
            TokenKind::LBrace => self.parse_inline_object(),
            TokenKind::Dash => self.parse_block_array(min_indent),
            TokenKind::Ident(name) => {
                if matches!(self.peek(1).kind, TokenKind::Colon) {
                    return self.parse_block_object(min_indent);
                }
                if matches!(self.peek(1).kind, TokenKind::Ident(_)) {
                    // Two bare words: the gap between them is an invalid
                    // key character.
                    let space_col = token.col + name.chars().count() as u32;
                    return Err(YaySyntaxError::at(
                        "Invalid key character",
                        token.line,
                        space_col,
                    ));
                }
                let first = name.chars().next().unwrap_or('?');
                Err(YaySyntaxError::at(
                    format!("Unexpected character \"{}\"", first),
                    token.line,
                    token.col,
                ))
            }
            other => Err(self.error_at_peek(format!("Unexpected token: {}", other.name()))),
        }
    }

    // ------------------------------------------------------------------------
    // Token access
    // ------------------------------------------------------------------------

    /// Returns the token `offset` positions ahead, clamped to EOF.
    fn peek(&self, offset: usize) -> &Token {
        let idx = (self.pos + offset).min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    /// Advances past the current token.
    fn bump(&mut self) {
        self.pos += 1;
    }

    /// Consumes a token of the expected kind or fails.
    fn expect(&mut self, kind: &TokenKind) -> SyntaxResult<Token> {
        let token = self.peek(0).clone();
        if std::mem::discriminant(&token.kind) != std::mem::discriminant(kind) {
            return Err(self.error_at_peek(format!(
                "Expected {}, got {}",
                kind.name(),
                token.kind.name()
            )));
        }
        self.bump();
        Ok(token)
    }

    /// Skips NEWLINE and INDENT tokens.
    fn skip_newlines(&mut self) {
        while matches!(
            self.peek(0).kind,
            TokenKind::Newline | TokenKind::Indent(_)
        ) {
            self.bump();
        }
    }

    // ------------------------------------------------------------------------
    // Raw source access
    // ------------------------------------------------------------------------

    /// Returns the text of the given 1-based line, or "" out of range.
    fn line_text(&self, line: u32) -> &str {
        self.lines
            .get((line.saturating_sub(1)) as usize)
            .copied()
            .unwrap_or("")
    }

    /// Returns the character at a 1-based line/column, if any.
    fn char_at(&self, line: u32, col: u32) -> Option<char> {
        if line < 1 || col < 1 {
            return None;
        }
        self.line_text(line).chars().nth((col - 1) as usize)
    }

    /// Fails when the character just before `token` is a space.
    fn check_no_space_before(&self, token: &Token, ch: char) -> SyntaxResult<()> {
        let prev_col = token.col.saturating_sub(1);
        if prev_col >= 1 && self.char_at(token.line, prev_col) == Some(' ') {
            return Err(YaySyntaxError::at(
                format!("Unexpected space before \"{}\"", ch),
                token.line,
                prev_col,
            ));
        }
        Ok(())
    }

    /// Builds a syntax error at the current token.
    fn error_at_peek(&self, message: impl Into<String>) -> YaySyntaxError {
        let token = self.peek(0);
        YaySyntaxError::at(message, token.line, token.col)
    }
}
