//! Core lexer implementation.
//!
//! This module contains the main Lexer struct, the line-start logic that
//! produces INDENT tokens, and the dispatch loop that hands off to the
//! specialized lexing methods.

use yay_util::{SyntaxResult, YaySyntaxError};

use crate::cursor::Cursor;
use crate::validate::validate_source;
use crate::{Token, TokenKind};

/// Lexer for YAY documents.
///
/// Converts validated source text into a vector of positioned tokens,
/// terminated by EOF. A synthetic INDENT token opens every logical line; a
/// synthetic NEWLINE closes the final line when the source does not end
/// with one.
pub struct Lexer<'a> {
    /// Character cursor over the source.
    pub(crate) cursor: Cursor<'a>,

    /// True when the next character starts a new line.
    pub(crate) at_line_start: bool,

    /// Leading-space count of the current logical line. Block scalars use
    /// this as their base indent.
    pub(crate) current_line_indent: u32,

    /// True when the previously emitted token was `{` or `,`, which makes
    /// an unrecognized character an invalid object key rather than a
    /// generic stray character.
    after_brace_or_comma: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            at_line_start: true,
            current_line_indent: 0,
            after_brace_or_comma: false,
        }
    }

    /// Tokenizes the entire source.
    ///
    /// Validates the source first (§ character rules), then scans tokens
    /// until EOF. The returned vector always ends with an EOF token.
    ///
    /// # Errors
    ///
    /// Returns the first `YaySyntaxError` encountered; there is no
    /// recovery.
    pub fn tokenize(mut self) -> SyntaxResult<Vec<Token>> {
        validate_source(self.cursor.source())?;

        let mut tokens = Vec::new();

        while !self.cursor.is_at_end() {
            if self.at_line_start {
                self.at_line_start = false;
                let indent = self.read_indent();

                // Blank and comment-only lines produce no tokens at all.
                match self.cursor.current_char() {
                    '\n' => {
                        self.cursor.advance();
                        self.at_line_start = true;
                        continue;
                    }
                    '#' => {
                        self.skip_to_eol();
                        if self.cursor.current_char() == '\n' {
                            self.cursor.advance();
                        }
                        self.at_line_start = true;
                        continue;
                    }
                    _ => {}
                }
                if self.cursor.is_at_end() {
                    break;
                }

                self.current_line_indent = indent;
                let token = Token::new(TokenKind::Indent(indent), self.cursor.line(), 1);
                self.push(&mut tokens, token);
            }

            if self.cursor.is_at_end() {
                break;
            }

            let ch = self.cursor.current_char();
            match ch {
                '\n' => {
                    let token =
                        Token::new(TokenKind::Newline, self.cursor.line(), self.cursor.column());
                    self.push(&mut tokens, token);
                    self.cursor.advance();
                    self.at_line_start = true;
                }
                ' ' => {
                    self.cursor.advance();
                }
                '#' => {
                    self.skip_to_eol();
                }
                '"' | '\'' => {
                    let token = self.read_quoted(ch)?;
                    self.push(&mut tokens, token);
                }
                '`' => {
                    let token = self.read_block_string()?;
                    self.push(&mut tokens, token);
                }
                '>' => {
                    let token = self.read_block_bytes()?;
                    self.push(&mut tokens, token);
                }
                '<' => {
                    let token = self.read_angle_bracket()?;
                    self.push(&mut tokens, token);
                }
                c if c.is_ascii_digit() || c == '.' => {
                    let token = self.read_number()?;
                    self.push(&mut tokens, token);
                }
                '-' => {
                    let token = self.read_minus()?;
                    self.push(&mut tokens, token);
                }
                ':' => self.push_punct(&mut tokens, TokenKind::Colon),
                ',' => self.push_punct(&mut tokens, TokenKind::Comma),
                '[' => self.push_punct(&mut tokens, TokenKind::LBracket),
                ']' => self.push_punct(&mut tokens, TokenKind::RBracket),
                '{' => self.push_punct(&mut tokens, TokenKind::LBrace),
                '}' => self.push_punct(&mut tokens, TokenKind::RBrace),
                c if c.is_alphabetic() || c == '_' => {
                    let token = self.read_identifier();
                    self.push(&mut tokens, token);
                }
                c => {
                    if self.after_brace_or_comma {
                        return Err(self.error_here("Invalid key"));
                    }
                    return Err(self.error_here(format!("Unexpected character \"{}\"", c)));
                }
            }
        }

        if !self.at_line_start {
            tokens.push(Token::new(
                TokenKind::Newline,
                self.cursor.line(),
                self.cursor.column(),
            ));
        }
        tokens.push(Token::new(
            TokenKind::Eof,
            self.cursor.line(),
            self.cursor.column(),
        ));

        Ok(tokens)
    }

    /// Consumes leading spaces and returns their count.
    fn read_indent(&mut self) -> u32 {
        let mut spaces = 0;
        while self.cursor.current_char() == ' ' {
            self.cursor.advance();
            spaces += 1;
        }
        spaces
    }

    /// Consumes a `-` that is either a dash punctuator or the sign of
    /// `-infinity`. Negative numbers are handled by the number path before
    /// this is reached.
    fn read_minus(&mut self) -> SyntaxResult<Token> {
        let next = self.cursor.peek_char(1);
        if next.is_ascii_digit() || next == '.' {
            return self.read_number();
        }
        if next == 'i' {
            self.cursor.advance();
            let token = self.read_identifier();
            return match token.kind {
                TokenKind::Float(f) if f == f64::INFINITY => Ok(Token::new(
                    TokenKind::Float(f64::NEG_INFINITY),
                    token.line,
                    token.col - 1,
                )),
                TokenKind::Ident(name) => {
                    Err(self.error_here(format!("Unexpected: -{}", name)))
                }
                other => Err(self.error_here(format!("Unexpected: -{}", other.name()))),
            };
        }
        let token = Token::new(TokenKind::Dash, self.cursor.line(), self.cursor.column());
        self.cursor.advance();
        Ok(token)
    }

    /// Handles `<`: empty bytes, an inline byte array, or an error.
    fn read_angle_bracket(&mut self) -> SyntaxResult<Token> {
        let start_col = self.cursor.column();
        self.cursor.advance();

        let next = self.cursor.current_char();
        if next == '>' {
            self.cursor.advance();
            return Ok(Token::new(
                TokenKind::Bytes(Vec::new()),
                self.cursor.line(),
                self.cursor.column() - 2,
            ));
        }
        if next == '\n' || self.cursor.is_at_end() {
            return Err(YaySyntaxError::at(
                "Unmatched angle bracket",
                self.cursor.line(),
                start_col,
            ));
        }
        if next.is_ascii_uppercase() && next.is_ascii_hexdigit() {
            return Err(self.error_here("Uppercase hex digit (use lowercase)"));
        }
        if next == ' ' || matches!(next, '0'..='9' | 'a'..='f') {
            return self.read_inline_bytes();
        }
        Err(self.error_here(format!("Invalid character after '<': '{}'", next)))
    }

    /// Consumes characters up to (not including) the end of the line.
    pub(crate) fn skip_to_eol(&mut self) {
        while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
            self.cursor.advance();
        }
    }

    /// Builds a syntax error at the cursor's current position.
    pub(crate) fn error_here(&self, message: impl Into<String>) -> YaySyntaxError {
        YaySyntaxError::at(message, self.cursor.line(), self.cursor.column())
    }

    fn push_punct(&mut self, tokens: &mut Vec<Token>, kind: TokenKind) {
        let token = Token::new(kind, self.cursor.line(), self.cursor.column());
        self.cursor.advance();
        self.push(tokens, token);
    }

    fn push(&mut self, tokens: &mut Vec<Token>, token: Token) {
        self.after_brace_or_comma =
            matches!(token.kind, TokenKind::LBrace | TokenKind::Comma);
        tokens.push(token);
    }
}
