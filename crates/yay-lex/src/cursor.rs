//! Character cursor for traversing YAY source text.
//!
//! This module provides the `Cursor` struct which maintains position state
//! while iterating through source characters. It handles UTF-8 encoding
//! correctly and tracks 1-based line/column information for error reporting.
//! Block scalars rewind to a line start by restoring a saved snapshot.

/// A cursor for traversing source text character by character.
///
/// The cursor maintains the current byte position in the source string and
/// provides methods for advancing, peeking ahead, and saving/restoring
/// position state. Columns count characters, not bytes.
///
/// # Example
///
/// ```
/// use yay_lex::cursor::Cursor;
///
/// let mut cursor = Cursor::new("a: 1");
/// assert_eq!(cursor.current_char(), 'a');
/// cursor.advance();
/// assert_eq!(cursor.current_char(), ':');
/// ```
pub struct Cursor<'a> {
    /// The source text being traversed.
    source: &'a str,

    /// Current byte position in the source.
    position: usize,

    /// Current line number (1-based).
    line: u32,

    /// Current column number (1-based, in characters).
    column: u32,
}

impl<'a> Cursor<'a> {
    /// Creates a new cursor at the start of the given source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Returns the character at the cursor position.
    ///
    /// Returns `'\0'` at the end of the source. YAY forbids NUL in source
    /// text, so the sentinel is unambiguous.
    #[inline]
    pub fn current_char(&self) -> char {
        if self.position >= self.source.len() {
            return '\0';
        }

        // Fast path for ASCII (most common case)
        let b = self.source.as_bytes()[self.position];
        if b < 128 {
            return b as char;
        }

        self.source[self.position..].chars().next().unwrap_or('\0')
    }

    /// Returns the character `offset` characters ahead of the cursor.
    ///
    /// `peek_char(0)` is the current character. Returns `'\0'` past the end.
    ///
    /// # Example
    ///
    /// ```
    /// use yay_lex::cursor::Cursor;
    ///
    /// let cursor = Cursor::new("-1");
    /// assert_eq!(cursor.peek_char(0), '-');
    /// assert_eq!(cursor.peek_char(1), '1');
    /// assert_eq!(cursor.peek_char(2), '\0');
    /// ```
    #[inline]
    pub fn peek_char(&self, offset: usize) -> char {
        self.source[self.position..]
            .chars()
            .nth(offset)
            .unwrap_or('\0')
    }

    /// Advances the cursor to the next character.
    ///
    /// Updates line and column tracking. Does nothing at the end.
    #[inline]
    pub fn advance(&mut self) {
        if self.position >= self.source.len() {
            return;
        }

        // Fast path for ASCII (most common)
        let b = self.source.as_bytes()[self.position];
        if b < 128 {
            self.position += 1;
            if b == b'\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            return;
        }

        if let Some(c) = self.source[self.position..].chars().next() {
            self.position += c.len_utf8();
            self.column += 1;
        }
    }

    /// Returns true if the cursor is at the end of the source.
    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Returns the current line number (1-based).
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Returns the current column number (1-based).
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Returns the full source text.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Creates a snapshot of the current cursor state.
    ///
    /// # Example
    ///
    /// ```
    /// use yay_lex::cursor::Cursor;
    ///
    /// let mut cursor = Cursor::new("abc");
    /// let snapshot = cursor.snapshot();
    /// cursor.advance();
    /// cursor.restore(snapshot);
    /// assert_eq!(cursor.current_char(), 'a');
    /// ```
    pub fn snapshot(&self) -> CursorSnapshot {
        CursorSnapshot {
            position: self.position,
            line: self.line,
            column: self.column,
        }
    }

    /// Restores the cursor to a previously saved snapshot.
    pub fn restore(&mut self, snapshot: CursorSnapshot) {
        self.position = snapshot.position;
        self.line = snapshot.line;
        self.column = snapshot.column;
    }
}

/// A snapshot of cursor state that can be restored later.
#[derive(Clone, Copy, Debug)]
pub struct CursorSnapshot {
    /// Byte position in source.
    position: usize,
    /// Line number (1-based).
    line: u32,
    /// Column number (1-based).
    column: u32,
}
