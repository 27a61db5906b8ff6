//! Error types for KONF parsing.

use thiserror::Error;

/// Result type for KONF parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Classification of a parse failure.
///
/// The CLI maps each kind to its own diagnostic prefix; the parser itself
/// treats both the same way (fatal, no recovery).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Grammar violation.
    Syntax,
    /// Reference to a constant that is not declared at the point of use.
    Name,
}

/// Error type for KONF parsing.
#[derive(Error, Debug)]
pub enum ParseError {
    /// End of input where a value was required.
    #[error("Expected a value on line {0}")]
    ExpectedValue(usize),

    /// A character no value can start with.
    #[error("Unknown value on line {1}: character '{0}'")]
    UnknownValue(char, usize),

    /// String literal without a closing quote on its line.
    #[error("Unterminated string on line {0}")]
    UnterminatedString(usize),

    /// Numeric lexeme that does not parse (e.g. a bare sign).
    #[error("Invalid number format '{0}' on line {1}")]
    InvalidNumber(String, usize),

    /// End of input inside `array(...)`.
    #[error("Unterminated array on line {0}")]
    UnterminatedArray(usize),

    /// End of input inside `{...}`.
    #[error("Unterminated dictionary on line {0}")]
    UnterminatedDict(usize),

    /// Array element not followed by `,` or `)`.
    #[error("Expected ',' or ')' on line {0}")]
    ExpectedArraySeparator(usize),

    /// Dictionary entry not followed by `,` or `}`.
    #[error("Expected ',' or '}}' on line {0}")]
    ExpectedDictSeparator(usize),

    /// Dictionary key starting with a character outside `[A-Z_]`.
    #[error("Expected a name matching [A-Z_] on line {0}")]
    ExpectedName(usize),

    /// Name with zero characters.
    #[error("Empty name on line {0}")]
    EmptyName(usize),

    /// Dictionary key not followed by `:`.
    #[error("Expected ':' after name {0} on line {1}")]
    ExpectedColon(String, usize),

    /// Constant declaration without `=`.
    #[error("Expected '=' after const {0} on line {1}")]
    ExpectedEquals(String, usize),

    /// Reference to a constant that has not been declared yet.
    #[error("Unknown constant '{0}' on line {1}")]
    UnknownConstant(String, usize),
}

impl ParseError {
    /// Classify this error for diagnostics.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::UnknownConstant(_, _) => ErrorKind::Name,
            _ => ErrorKind::Syntax,
        }
    }
}
