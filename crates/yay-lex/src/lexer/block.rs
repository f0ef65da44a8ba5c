//! Backtick block string lexing.
//!
//! A backtick introduces a multi-line literal string. Two forms exist:
//!
//! - `` ` `` followed by a newline: the value starts and ends with a
//!   newline. An empty block is an error.
//! - `` ` `` followed by a single space: the first content line begins on
//!   the introducer's line; the value ends with exactly one newline.
//!
//! Content lines belong to the block while they are indented more than the
//! introducer's line; each contributes its text after `base_indent + 2`
//! leading spaces are stripped (extra spaces survive). The first line at or
//! below the base indent ends the block and is rewound so line-start
//! handling sees it fresh.

use yay_util::SyntaxResult;

use crate::{Lexer, Token, TokenKind};

impl<'a> Lexer<'a> {
    /// Lexes a backtick-introduced block string. The cursor sits on the
    /// backtick; the token position is the backtick's position.
    pub(crate) fn read_block_string(&mut self) -> SyntaxResult<Token> {
        let start_line = self.cursor.line();
        let start_col = self.cursor.column();
        self.cursor.advance();

        match self.cursor.current_char() {
            '\n' => {
                self.cursor.advance();
                self.at_line_start = true;
                self.read_block_string_content(start_line, start_col, false)
            }
            ' ' => {
                self.cursor.advance();
                self.read_block_string_content(start_line, start_col, true)
            }
            _ => Err(self.error_here("Expected space or newline after '`'")),
        }
    }

    fn read_block_string_content(
        &mut self,
        start_line: u32,
        start_col: u32,
        same_line: bool,
    ) -> SyntaxResult<Token> {
        let mut lines: Vec<String> = Vec::new();
        let base_indent = self.current_line_indent;

        if same_line {
            let mut first = String::new();
            while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
                first.push(self.cursor.current_char());
                self.cursor.advance();
            }
            lines.push(first);
            if self.cursor.current_char() == '\n' {
                self.cursor.advance();
                self.at_line_start = true;
            }
        }

        while !self.cursor.is_at_end() {
            let line_start = self.cursor.snapshot();
            let mut spaces: u32 = 0;
            while self.cursor.current_char() == ' ' {
                spaces += 1;
                self.cursor.advance();
            }

            // Dedented to the base level or below: the block is over and the
            // line belongs to whatever follows.
            if spaces <= base_indent
                && self.cursor.current_char() != '\n'
                && !self.cursor.is_at_end()
            {
                self.cursor.restore(line_start);
                self.at_line_start = true;
                break;
            }

            if self.cursor.current_char() == '\n' {
                lines.push(String::new());
                self.cursor.advance();
                self.at_line_start = true;
                continue;
            }

            if self.cursor.is_at_end() {
                break;
            }

            let content_indent = spaces.saturating_sub(base_indent);
            let mut line = if content_indent >= 2 {
                " ".repeat((content_indent - 2) as usize)
            } else {
                String::new()
            };
            while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
                line.push(self.cursor.current_char());
                self.cursor.advance();
            }
            lines.push(line);

            if self.cursor.current_char() == '\n' {
                self.cursor.advance();
                self.at_line_start = true;
            }
        }

        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }

        let joined = lines.join("\n");
        let value = if same_line {
            format!("{}\n", joined)
        } else if joined.is_empty() {
            return Err(self.error_here(
                r#"Empty block string not allowed (use "" or "\n" explicitly)"#,
            ));
        } else {
            format!("\n{}\n", joined)
        };

        Ok(Token::new(TokenKind::Str(value), start_line, start_col))
    }
}
