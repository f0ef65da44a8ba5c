//! yay - Parser and Serializer for the YAY Data Format
//!
//! YAY is a strict, human-authored data-interchange format in the design
//! space of YAML and JSON, with an unambiguous, whitespace-pedantic
//! grammar: two-space indentation, exactly one space after `:` and `,`,
//! no tabs, comments with `#`, grouped digits in numbers, first-class
//! byte arrays, and multi-line block strings.
//!
//! The library surface is four functions:
//!
//! ```
//! use yay::{parse, emit, EmitOptions};
//!
//! let value = parse("name: 'Ada'\nage: 36\n").unwrap();
//! let text = emit(&value, &EmitOptions::default());
//! assert_eq!(parse(&text).unwrap(), value);
//! ```
//!
//! `parse_stream` and `emit_stream` are the same operations over
//! `std::io` readers and writers. The core is pure and synchronous: the
//! stream wrappers read everything up front and write everything at the
//! end, and no I/O happens anywhere else.

use std::io::{Read, Write};

pub use yay_emit::EmitOptions;
pub use yay_lex::{Lexer, Token, TokenKind};
pub use yay_util::value::Object;
pub use yay_util::{Value, YayError, YayResult, YaySyntaxError};

/// Parses a YAY document into a value tree.
///
/// # Errors
///
/// Returns a positioned [`YaySyntaxError`] on the first violation; there
/// is no recovery.
pub fn parse(text: &str) -> Result<Value, YaySyntaxError> {
    yay_par::parse_str(text)
}

/// Reads all text from `reader`, then parses it.
///
/// # Errors
///
/// [`YayError::Io`] when reading fails (including invalid UTF-8), and
/// [`YayError::Syntax`] for parse failures.
pub fn parse_stream<R: Read>(mut reader: R) -> YayResult<Value> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(parse(&text)?)
}

/// Serializes a value tree to canonical YAY text.
///
/// With `indent: true` (the default) composites use block form and the
/// output ends with a newline; with `indent: false` everything is inline.
pub fn emit(value: &Value, options: &EmitOptions) -> String {
    yay_emit::emit(value, options)
}

/// Serializes a value tree and writes it to `writer`.
///
/// # Errors
///
/// [`YayError::Io`] when writing fails.
pub fn emit_stream<W: Write>(value: &Value, mut writer: W, options: &EmitOptions) -> YayResult<()> {
    writer.write_all(emit(value, options).as_bytes())?;
    Ok(())
}
