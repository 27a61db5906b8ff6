//! Position-tracking cursor over cleaned text.
//!
//! The cursor owns the scan offset plus one-based line/column counters. The
//! offset is the only authority for what comes next; line and column exist
//! for diagnostics and advance in lock-step with every consumed character
//! (a newline bumps the line and resets the column, everything else bumps
//! the column).

/// Scanning cursor over a fixed character buffer.
#[derive(Debug)]
pub struct Cursor {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
}

impl Cursor {
    /// Create a cursor at the start of `text`.
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// One-based line number of the next character.
    pub fn line(&self) -> usize {
        self.line
    }

    /// One-based column number of the next character.
    pub fn column(&self) -> usize {
        self.column
    }

    /// True once every character has been consumed.
    pub fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    /// The next character, without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// True when the unconsumed text starts with `prefix`.
    pub fn starts_with(&self, prefix: &str) -> bool {
        let mut i = self.pos;
        for c in prefix.chars() {
            if self.chars.get(i).copied() != Some(c) {
                return false;
            }
            i += 1;
        }
        true
    }

    /// Consume one character, keeping line/column in step.
    pub fn advance(&mut self) {
        if let Some(&c) = self.chars.get(self.pos) {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            self.pos += 1;
        }
    }

    /// Consume `n` characters.
    pub fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    /// Skip space, tab, carriage return, and newline.
    pub fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if matches!(c, ' ' | '\t' | '\n' | '\r') {
                self.advance();
            } else {
                break;
            }
        }
    }
}
