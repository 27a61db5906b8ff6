//! Recursive-descent parser for the KONF grammar.
//!
//! Two layers share one cursor:
//!
//! 1. The top-level scan ([`Parser::parse_constants`]) walks the cleaned
//!    text looking for `const NAME = <value>;` declarations and binds each
//!    into the constant environment. Anything between declarations that is
//!    not the `const` keyword is skipped one character at a time rather than
//!    rejected.
//! 2. The value grammar ([`Parser::parse_value`]) dispatches on the next
//!    non-whitespace character: quoted string, `array(...)`, `{...}`
//!    dictionary, `true`/`false`, signed number, or a reference to an
//!    already-declared constant.
//!
//! References resolve eagerly: the referenced constant's current value is
//! cloned into place, so forward references fail and later redeclarations do
//! not retroactively change earlier uses.

use indexmap::IndexMap;
use num_bigint::BigInt;

use crate::cursor::Cursor;
use crate::error::{ParseError, Result};
use crate::value::Value;

/// The constant environment: declaration-ordered name-to-value bindings.
///
/// Re-inserting an existing name keeps its original position and replaces
/// the value, which is exactly the overwrite behavior of a repeated
/// declaration.
pub type Environment = IndexMap<String, Value>;

/// True for characters a name may consist of.
fn is_name_char(c: char) -> bool {
    c.is_ascii_uppercase() || c == '_'
}

/// Parser over cleaned (comment-free) text.
pub struct Parser {
    cursor: Cursor,
    constants: Environment,
}

impl Parser {
    /// Create a parser at the start of `text`.
    ///
    /// The text is expected to be comment-free already; run
    /// [`strip_comments`](crate::strip_comments) first on raw source.
    pub fn new(text: &str) -> Self {
        Self {
            cursor: Cursor::new(text),
            constants: Environment::new(),
        }
    }

    /// Where scanning currently stands, as a one-based (line, column) pair.
    pub fn position(&self) -> (usize, usize) {
        (self.cursor.line(), self.cursor.column())
    }

    /// The constants bound so far, in declaration order.
    pub fn constants(&self) -> &Environment {
        &self.constants
    }

    /// Consume the parser, yielding the constant environment.
    pub fn into_constants(self) -> Environment {
        self.constants
    }

    /// Scan the whole input for constant declarations.
    ///
    /// Stray characters between declarations are tolerated and skipped one
    /// at a time; only a malformed declaration or value is an error.
    pub fn parse_constants(&mut self) -> Result<()> {
        while !self.cursor.at_end() {
            self.cursor.skip_whitespace();
            if self.cursor.at_end() {
                break;
            }

            if self.cursor.starts_with("const") {
                self.cursor.advance_by(5);
                self.cursor.skip_whitespace();

                let name = self.parse_name()?;
                self.cursor.skip_whitespace();

                if self.cursor.peek() != Some('=') {
                    return Err(ParseError::ExpectedEquals(name, self.cursor.line()));
                }
                self.cursor.advance();

                let value = self.parse_value()?;
                self.constants.insert(name, value);

                // The trailing semicolon is optional.
                self.cursor.skip_whitespace();
                if self.cursor.peek() == Some(';') {
                    self.cursor.advance();
                }
            } else {
                self.cursor.advance();
            }
        }
        Ok(())
    }

    /// Parse one value at the cursor.
    ///
    /// Dispatches in fixed priority order: string, `array(`, `{`, `true`,
    /// `false`, number, constant reference. The keyword matches are plain
    /// prefix matches with no word-boundary check, so `trueX` parses as
    /// `true` and leaves `X` for the caller.
    pub fn parse_value(&mut self) -> Result<Value> {
        self.cursor.skip_whitespace();

        let c = match self.cursor.peek() {
            Some(c) => c,
            None => return Err(ParseError::ExpectedValue(self.cursor.line())),
        };

        if c == '"' {
            return self.parse_string().map(Value::String);
        }

        if self.cursor.starts_with("array(") {
            return self.parse_array().map(Value::Array);
        }

        if c == '{' {
            return self.parse_dict().map(Value::Dict);
        }

        if self.cursor.starts_with("true") {
            self.cursor.advance_by(4);
            return Ok(Value::Bool(true));
        }
        if self.cursor.starts_with("false") {
            self.cursor.advance_by(5);
            return Ok(Value::Bool(false));
        }

        if c == '+' || c == '-' || c.is_ascii_digit() {
            return self.parse_number();
        }

        if is_name_char(c) {
            let line = self.cursor.line();
            let name = self.parse_name()?;
            return match self.constants.get(&name) {
                Some(value) => Ok(value.clone()),
                None => Err(ParseError::UnknownConstant(name, line)),
            };
        }

        Err(ParseError::UnknownValue(c, self.cursor.line()))
    }

    /// Parse a quoted string. The cursor sits on the opening quote.
    ///
    /// Content is taken verbatim up to the closing quote; there are no
    /// escape sequences, and a raw newline or end of input before the
    /// closing quote is fatal.
    fn parse_string(&mut self) -> Result<String> {
        let line = self.cursor.line();
        self.cursor.advance();

        let mut content = String::new();
        loop {
            match self.cursor.peek() {
                Some('"') => {
                    self.cursor.advance();
                    return Ok(content);
                }
                Some('\n') | None => return Err(ParseError::UnterminatedString(line)),
                Some(c) => {
                    content.push(c);
                    self.cursor.advance();
                }
            }
        }
    }

    /// Parse a number. The cursor sits on a sign or digit.
    ///
    /// Lexeme shape: optional sign, digits, optionally `.` and more digits.
    /// A lexeme without `.` becomes an arbitrary-precision integer; with `.`
    /// it becomes a float. A bare sign collects an empty digit run and fails
    /// the numeric parse.
    fn parse_number(&mut self) -> Result<Value> {
        let line = self.cursor.line();
        let mut lexeme = String::new();

        if let Some(c @ ('+' | '-')) = self.cursor.peek() {
            lexeme.push(c);
            self.cursor.advance();
        }

        while let Some(c) = self.cursor.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            lexeme.push(c);
            self.cursor.advance();
        }

        if self.cursor.peek() == Some('.') {
            lexeme.push('.');
            self.cursor.advance();
            while let Some(c) = self.cursor.peek() {
                if !c.is_ascii_digit() {
                    break;
                }
                lexeme.push(c);
                self.cursor.advance();
            }
        }

        if lexeme.contains('.') {
            match lexeme.parse::<f64>() {
                Ok(f) => Ok(Value::Float(f)),
                Err(_) => Err(ParseError::InvalidNumber(lexeme, line)),
            }
        } else {
            match lexeme.parse::<BigInt>() {
                Ok(n) => Ok(Value::Integer(n)),
                Err(_) => Err(ParseError::InvalidNumber(lexeme, line)),
            }
        }
    }

    /// Parse `array( value, ... )`. The cursor sits on the `a` of `array(`.
    fn parse_array(&mut self) -> Result<Vec<Value>> {
        self.cursor.advance_by(6);

        let mut items = Vec::new();
        loop {
            self.cursor.skip_whitespace();
            match self.cursor.peek() {
                None => return Err(ParseError::UnterminatedArray(self.cursor.line())),
                Some(')') => {
                    self.cursor.advance();
                    break;
                }
                Some(_) => {}
            }

            let value = self.parse_value()?;
            items.push(value);

            self.cursor.skip_whitespace();
            match self.cursor.peek() {
                Some(',') => {
                    self.cursor.advance();
                }
                // The close paren is consumed at the top of the loop.
                Some(')') => {}
                _ => return Err(ParseError::ExpectedArraySeparator(self.cursor.line())),
            }
        }

        Ok(items)
    }

    /// Parse `{ NAME: value, ... }`. The cursor sits on the `{`.
    fn parse_dict(&mut self) -> Result<IndexMap<String, Value>> {
        self.cursor.advance();

        let mut entries = IndexMap::new();
        loop {
            self.cursor.skip_whitespace();
            match self.cursor.peek() {
                None => return Err(ParseError::UnterminatedDict(self.cursor.line())),
                Some('}') => {
                    self.cursor.advance();
                    break;
                }
                Some(c) if is_name_char(c) => {}
                Some(_) => return Err(ParseError::ExpectedName(self.cursor.line())),
            }

            let name = self.parse_name()?;
            self.cursor.skip_whitespace();

            if self.cursor.peek() != Some(':') {
                return Err(ParseError::ExpectedColon(name, self.cursor.line()));
            }
            self.cursor.advance();

            let value = self.parse_value()?;
            entries.insert(name, value);

            self.cursor.skip_whitespace();
            match self.cursor.peek() {
                Some(',') => {
                    self.cursor.advance();
                }
                Some('}') => {}
                _ => return Err(ParseError::ExpectedDictSeparator(self.cursor.line())),
            }
        }

        Ok(entries)
    }

    /// Parse a run of `[A-Z_]` characters into a name.
    fn parse_name(&mut self) -> Result<String> {
        let line = self.cursor.line();
        let mut name = String::new();

        while let Some(c) = self.cursor.peek() {
            if !is_name_char(c) {
                break;
            }
            name.push(c);
            self.cursor.advance();
        }

        if name.is_empty() {
            return Err(ParseError::EmptyName(line));
        }
        Ok(name)
    }
}
