//! Number literal lexing.
//!
//! YAY numbers allow single-space digit grouping (`1 000 000`), a decimal
//! point, and a lowercase exponent. A grouping space must sit between two
//! digits; spaces touching the decimal point are errors, as is an uppercase
//! `E`. Integers are arbitrary precision.

use num_bigint::BigInt;
use yay_util::{SyntaxResult, YaySyntaxError};

use crate::{Lexer, Token, TokenKind};

impl<'a> Lexer<'a> {
    /// Lexes a number literal (integer or float).
    ///
    /// The cursor sits on the first character: a digit, a dot, or the minus
    /// sign of a negative number.
    ///
    /// # Returns
    ///
    /// `TokenKind::Int` for plain digit runs, `TokenKind::Float` once a
    /// decimal point or exponent appears.
    pub(crate) fn read_number(&mut self) -> SyntaxResult<Token> {
        let start_line = self.cursor.line();
        let start_col = self.cursor.column();

        let mut digits = String::new();
        let mut has_dot = false;
        let mut has_exponent = false;
        let mut last_was_space = false;
        let mut space_col: u32 = 0;

        if self.cursor.current_char() == '-' {
            digits.push('-');
            self.cursor.advance();
        }

        loop {
            let ch = self.cursor.current_char();
            if ch.is_ascii_digit() {
                digits.push(ch);
                self.cursor.advance();
                last_was_space = false;
            } else if ch == '.' {
                // A second dot, or a dot after the exponent, ends the number.
                if has_dot || has_exponent {
                    break;
                }
                if last_was_space {
                    return Err(YaySyntaxError::at(
                        "Unexpected space in number",
                        self.cursor.line(),
                        space_col,
                    ));
                }
                has_dot = true;
                digits.push('.');
                self.cursor.advance();
                if self.cursor.current_char() == ' ' {
                    return Err(self.error_here("Unexpected space in number"));
                }
            } else if ch == 'e' && !has_exponent && !digits.is_empty() {
                has_exponent = true;
                digits.push('e');
                self.cursor.advance();
                let sign = self.cursor.current_char();
                if sign == '+' || sign == '-' {
                    digits.push(sign);
                    self.cursor.advance();
                }
            } else if ch == 'E' && !has_exponent && !digits.is_empty() {
                return Err(self.error_here("Uppercase exponent (use lowercase 'e')"));
            } else if ch == ' ' {
                let next = self.cursor.peek_char(1);
                if next.is_ascii_digit() {
                    space_col = self.cursor.column();
                    self.cursor.advance();
                    last_was_space = true;
                } else if next == '.' {
                    return Err(self.error_here("Unexpected space in number"));
                } else {
                    break;
                }
            } else {
                break;
            }
        }

        if has_dot || has_exponent {
            match digits.parse::<f64>() {
                Ok(value) => Ok(Token::new(TokenKind::Float(value), start_line, start_col)),
                Err(_) => Err(self.error_here(format!("Invalid float: {}", digits))),
            }
        } else {
            match digits.parse::<BigInt>() {
                Ok(value) => Ok(Token::new(TokenKind::Int(value), start_line, start_col)),
                Err(_) => Err(self.error_here(format!("Invalid integer: {}", digits))),
            }
        }
    }
}
