//! Byte array lexing.
//!
//! Inline byte arrays are `<` lowercase hex `>` on a single line, with
//! optional interior spaces. Block byte arrays are introduced by `>` and
//! collect hex from the following indented lines; spaces and `#` comments
//! are ignored inside them. Both forms require an even digit count.

use yay_util::{SyntaxResult, YaySyntaxError};

use crate::{Lexer, Token, TokenKind};

/// Packs validated lowercase hex digits into octets.
fn decode_hex_digits(hex: &str) -> Vec<u8> {
    let digits: Vec<u8> = hex
        .chars()
        .map(|c| c.to_digit(16).unwrap_or(0) as u8)
        .collect();
    digits.chunks(2).map(|pair| (pair[0] << 4) | pair[1]).collect()
}

impl<'a> Lexer<'a> {
    /// Lexes an inline byte array; the opening `<` is already consumed and
    /// the token position is the first character after it.
    pub(crate) fn read_inline_bytes(&mut self) -> SyntaxResult<Token> {
        let start_line = self.cursor.line();
        let start_col = self.cursor.column();

        let mut hex = String::new();
        let mut last_was_space = false;
        let mut space_col: u32 = 0;

        loop {
            if self.cursor.is_at_end() {
                return Err(self.error_here("Unterminated byte array"));
            }
            let ch = self.cursor.current_char();

            if ch == '>' {
                if last_was_space {
                    return Err(YaySyntaxError::at(
                        "Unexpected space before \">\"",
                        self.cursor.line(),
                        space_col,
                    ));
                }
                self.cursor.advance();
                break;
            }
            if ch == ' ' {
                space_col = self.cursor.column();
                last_was_space = true;
                self.cursor.advance();
                continue;
            }
            last_was_space = false;
            if ch == '\n' {
                return Err(YaySyntaxError::at(
                    "Unmatched angle bracket",
                    start_line,
                    start_col,
                ));
            }
            if ch == '#' {
                self.skip_to_eol();
                continue;
            }
            self.push_hex_digit(ch, &mut hex)?;
        }

        self.finish_bytes(hex, start_line, start_col)
    }

    /// Lexes a `>` block byte array. The cursor sits on the `>`; the token
    /// position is its position.
    pub(crate) fn read_block_bytes(&mut self) -> SyntaxResult<Token> {
        let start_line = self.cursor.line();
        let start_col = self.cursor.column();
        self.cursor.advance();

        let mut next_ch = self.cursor.current_char();
        let mut has_content = false;
        if next_ch == ' ' {
            self.cursor.advance();
            if self.cursor.current_char() == '#' {
                has_content = true;
                self.skip_to_eol();
                next_ch = self.cursor.current_char();
            }
        }

        // `>` with nothing after it: valid as a property's block leader
        // (start_col > 1), invalid alone at the start of a line.
        if next_ch == '\n' || next_ch == '\0' {
            if !has_content && start_col == 1 {
                return Err(self.error_here("Expected hex or comment in hex block"));
            }
            if next_ch == '\n' {
                self.cursor.advance();
                self.at_line_start = true;
            }
        }

        let base_indent = self.current_line_indent;
        let mut hex = String::new();

        // Content on the introducer's line (or the first line after a bare
        // `>`), read without an indent check.
        while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
            let ch = self.cursor.current_char();
            if ch == '#' {
                self.skip_to_eol();
                break;
            }
            if ch == ' ' {
                self.cursor.advance();
                continue;
            }
            self.push_hex_digit(ch, &mut hex)?;
        }
        if self.cursor.current_char() == '\n' {
            self.cursor.advance();
            self.at_line_start = true;
        }

        // Continuation lines: ends at a dedent, a blank line, or EOF.
        while !self.cursor.is_at_end() {
            let line_start = self.cursor.snapshot();
            let mut spaces: u32 = 0;
            while self.cursor.current_char() == ' ' {
                spaces += 1;
                self.cursor.advance();
            }

            if spaces <= base_indent
                && self.cursor.current_char() != '\n'
                && !self.cursor.is_at_end()
            {
                self.cursor.restore(line_start);
                self.at_line_start = true;
                break;
            }
            if self.cursor.current_char() == '\n' {
                self.cursor.restore(line_start);
                self.at_line_start = true;
                break;
            }
            if self.cursor.is_at_end() {
                break;
            }

            while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
                let ch = self.cursor.current_char();
                if ch == '#' {
                    self.skip_to_eol();
                    break;
                }
                if ch == ' ' {
                    self.cursor.advance();
                    continue;
                }
                self.push_hex_digit(ch, &mut hex)?;
            }
            if self.cursor.current_char() == '\n' {
                self.cursor.advance();
                self.at_line_start = true;
            }
        }

        self.finish_bytes(hex, start_line, start_col)
    }

    fn push_hex_digit(&mut self, ch: char, hex: &mut String) -> SyntaxResult<()> {
        match ch {
            '0'..='9' | 'a'..='f' => {
                hex.push(ch);
                self.cursor.advance();
                Ok(())
            }
            'A'..='F' => Err(self.error_here("Uppercase hex digit (use lowercase)")),
            _ => Err(self.error_here(format!("Invalid character in byte array: '{}'", ch))),
        }
    }

    fn finish_bytes(&self, hex: String, start_line: u32, start_col: u32) -> SyntaxResult<Token> {
        if hex.len() % 2 != 0 {
            return Err(self.error_here("Odd number of hex digits in byte literal"));
        }
        Ok(Token::new(
            TokenKind::Bytes(decode_hex_digits(&hex)),
            start_line,
            start_col,
        ))
    }
}
