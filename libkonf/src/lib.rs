//! KONF configuration language parser.
//!
//! KONF is a small declarative configuration language: a sequence of typed
//! `const NAME = value;` declarations over strings, numbers, booleans,
//! `array(...)` sequences, `{ NAME: value }` dictionaries, and references to
//! previously declared constants. Parsing produces an insertion-ordered
//! constant environment; serialization renders it as a pretty-printed XML
//! document with one typed `constant` element per declaration.
//!
//! # Pipeline
//!
//! The translator operates in three phases:
//!
//! 1. **Comment stripping**: removes `#` line comments and `#= ... =#`
//!    block comments, line by line, before any token is read.
//!
//! 2. **Constant scan**: a recursive-descent pass over the cleaned text
//!    builds the environment, resolving each reference against what has
//!    been declared so far.
//!
//! 3. **XML serialization**: walks the environment and emits one `constant`
//!    element per entry under a `configuration` root.

mod cursor;
mod error;
mod parser;
mod strip;
mod value;
mod xml;

pub use error::{ErrorKind, ParseError, Result};
pub use parser::{Environment, Parser};
pub use strip::strip_comments;
pub use value::Value;
pub use xml::to_xml;

/// Parse a KONF document into its constant environment.
///
/// # Example
///
/// ```
/// use libkonf::parse;
///
/// let env = parse("const PORT = 8080;").unwrap();
/// assert_eq!(env["PORT"].as_integer().unwrap().to_string(), "8080");
/// ```
pub fn parse(input: &str) -> Result<Environment> {
    let cleaned = strip::strip_comments(input);
    let mut parser = parser::Parser::new(&cleaned);
    parser.parse_constants()?;
    Ok(parser.into_constants())
}

/// Translate a KONF document straight to its XML form.
///
/// Equivalent to [`parse`] followed by [`to_xml`].
///
/// # Example
///
/// ```
/// use libkonf::translate;
///
/// let xml = translate("const GREETING = \"hi\";").unwrap();
/// assert!(xml.contains("<constant name=\"GREETING\" type=\"string\">hi</constant>"));
/// ```
pub fn translate(input: &str) -> Result<String> {
    let constants = parse(input)?;
    Ok(xml::to_xml(&constants))
}
