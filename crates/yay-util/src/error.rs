//! Core error types for the YAY pipeline.
//!
//! This module defines the two error kinds exposed by the library: the
//! positioned syntax error raised by the validator, lexer, and parser, and
//! the base error wrapping everything a public entry point can fail with.

use std::fmt;

use thiserror::Error;

/// A syntax error in YAY input.
///
/// Carries an optional 1-based source position. The formatted message
/// appends `(line L, col C)` when both are known and `(line L)` when only
/// the line is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YaySyntaxError {
    /// Description of the violation.
    pub message: String,

    /// 1-based line number, when known.
    pub line: Option<u32>,

    /// 1-based column number, when known.
    pub col: Option<u32>,
}

impl YaySyntaxError {
    /// Creates a syntax error with no position.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
            col: None,
        }
    }

    /// Creates a syntax error at the given line and column.
    ///
    /// # Arguments
    ///
    /// * `line` - 1-based source line of the offending character
    /// * `col` - 1-based source column of the offending character
    pub fn at(message: impl Into<String>, line: u32, col: u32) -> Self {
        Self {
            message: message.into(),
            line: Some(line),
            col: Some(col),
        }
    }
}

impl fmt::Display for YaySyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.line, self.col) {
            (Some(line), Some(col)) => {
                write!(f, "{} (line {}, col {})", self.message, line, col)
            }
            (Some(line), None) => write!(f, "{} (line {})", self.message, line),
            _ => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for YaySyntaxError {}

/// Error type for the public library surface.
#[derive(Debug, Error)]
pub enum YayError {
    /// Syntax error raised while parsing YAY input.
    #[error(transparent)]
    Syntax(#[from] YaySyntaxError),

    /// I/O failure in a stream entry point.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for validator, lexer, and parser operations.
pub type SyntaxResult<T> = std::result::Result<T, YaySyntaxError>;

/// Result type alias for the public library surface.
pub type YayResult<T> = std::result::Result<T, YayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_position() {
        let err = YaySyntaxError::at("Tab not allowed (use spaces)", 3, 7);
        assert_eq!(
            err.to_string(),
            "Tab not allowed (use spaces) (line 3, col 7)"
        );
    }

    #[test]
    fn test_display_line_only() {
        let err = YaySyntaxError {
            message: "Unexpected trailing space".to_string(),
            line: Some(2),
            col: None,
        };
        assert_eq!(err.to_string(), "Unexpected trailing space (line 2)");
    }

    #[test]
    fn test_display_no_position() {
        let err = YaySyntaxError::new("No value found in document");
        assert_eq!(err.to_string(), "No value found in document");
    }

    #[test]
    fn test_yay_error_wraps_syntax() {
        let err: YayError = YaySyntaxError::at("Illegal BOM", 1, 1).into();
        assert_eq!(err.to_string(), "Illegal BOM (line 1, col 1)");
    }
}
