//! Forward paren matching across lines.

use super::ScanError;
use super::comments::{find_in_code, is_code_at};
use super::patterns::FUNCTION_KEYWORD;
use crate::buffer::{LineBuffer, SourcePosition};

/// A balanced parenthetical block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParenBlock {
    /// Text strictly between the opening and closing paren, verbatim.
    pub interior: String,
    pub open: SourcePosition,
    pub close: SourcePosition,
}

/// Matches the `(` at `open_paren` with its closing `)`, continuing onto later
/// lines as needed.
///
/// Parens inside string literals are counted like any other.
pub fn match_parens(buffer: &LineBuffer, open_paren: SourcePosition) -> Result<ParenBlock, ScanError> {
    let text = buffer.text();
    let start = open_paren.offset();
    if text.as_bytes().get(start) != Some(&b'(') {
        return Err(ScanError::NotFound);
    }

    let mut depth: i32 = 0;
    for (idx, byte) in text.bytes().enumerate().skip(start) {
        match byte {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(ParenBlock {
                        interior: text[start + 1..idx].to_string(),
                        open: open_paren,
                        close: SourcePosition(idx),
                    });
                }
            }
            _ => {}
        }
    }

    Err(ScanError::Unterminated {
        line: buffer.line_number_at(open_paren),
    })
}

/// Finds and matches the parameter list belonging to the declaration on
/// `declaration`.
///
/// The list starts at the first `(` after the `function` keyword (or anywhere on
/// the line when there is no keyword). When the declaration line has no `(` at
/// all, the first later line containing one is used. Parens and keywords inside
/// comments are skipped.
pub fn find_parameter_block(buffer: &LineBuffer, declaration: usize) -> Result<ParenBlock, ScanError> {
    let text = buffer.line(declaration).ok_or(ScanError::NotFound)?;
    let line_start = buffer.line_start(declaration).ok_or(ScanError::NotFound)?;
    let from = FUNCTION_KEYWORD
        .find_iter(text)
        .map(|m| m.start())
        .find(|&start| is_code_at(text, start))
        .unwrap_or(0);

    let open = match find_in_code(text, from, '(') {
        Some(col) => line_start + col,
        None => (declaration + 1..buffer.line_count())
            .find_map(|line| {
                let col = find_in_code(buffer.line(line)?, 0, '(')?;
                Some(buffer.line_start(line)? + col)
            })
            .ok_or(ScanError::NotFound)?,
    };

    match_parens(buffer, SourcePosition(open))
}
