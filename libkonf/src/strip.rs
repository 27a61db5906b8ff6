//! Comment stripping.
//!
//! KONF has two comment forms:
//!
//! - `#` runs to the end of the line.
//! - `#= ... =#` spans lines and does not nest; the first `=#` closes it.
//!
//! Stripping happens once, over the raw text, before any token is read. The
//! pass works line by line with a single cross-line flag for an open block
//! comment, so `=#` never matches across a line boundary.

/// Remove comments from `text`, returning the cleaned text the parser scans.
///
/// A line that becomes empty after stripping is dropped from the output, as
/// is any line on which a block comment is still open at the end of the
/// line. Surviving lines keep their characters verbatim and are joined with
/// `\n`. An unterminated block comment silently swallows everything to the
/// end of the input; that is not an error at this stage.
pub fn strip_comments(text: &str) -> String {
    let mut result: Vec<String> = Vec::new();
    let mut in_block = false;

    for line in text.split('\n') {
        let chars: Vec<char> = line.chars().collect();
        let mut cleaned = String::new();
        let mut i = 0;

        while i < chars.len() {
            if !in_block && chars[i] == '#' {
                if i + 1 < chars.len() && chars[i + 1] == '=' {
                    in_block = true;
                    i += 2;
                    continue;
                }
                // Line comment: the rest of the line is gone.
                break;
            } else if in_block {
                if i + 1 < chars.len() && chars[i] == '=' && chars[i + 1] == '#' {
                    in_block = false;
                    i += 2;
                    continue;
                }
                i += 1;
            } else {
                cleaned.push(chars[i]);
                i += 1;
            }
        }

        if !in_block && !cleaned.is_empty() {
            result.push(cleaned);
        }
    }

    result.join("\n")
}
