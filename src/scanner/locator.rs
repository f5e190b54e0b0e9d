//! Resolving the declaration line a doc comment belongs to.
//!
//! These heuristics accept the occasional non-function rather than miss a real
//! one.

use super::comments::{find_in_code, strip};
use super::parens::match_parens;
use super::patterns::{COLON_ARROW, CONTROL_KEYWORD, is_function_line};
use super::{Dialect, QueryDirection, ScanError};
use crate::buffer::{LineBuffer, SourcePosition};
use tracing::trace;

/// Returns the index of the declaration line, or `None` when `line` does not
/// belong to a function header.
///
/// `line` is the line after the comment for [`QueryDirection::CommentAboveFunction`]
/// and the line before it for [`QueryDirection::CommentInsideFunction`].
pub fn locate_declaration(
    buffer: &LineBuffer,
    line: usize,
    direction: QueryDirection,
    dialect: Dialect,
) -> Option<usize> {
    match resolve_declaration(buffer, line, direction, dialect) {
        Ok(declaration) => Some(declaration),
        Err(err) => {
            trace!(line, ?direction, ?dialect, %err, "declaration not resolved");
            None
        }
    }
}

/// Same as [`locate_declaration`] but reports why resolution failed.
pub fn resolve_declaration(
    buffer: &LineBuffer,
    line: usize,
    direction: QueryDirection,
    dialect: Dialect,
) -> Result<usize, ScanError> {
    let text = buffer.line(line).ok_or(ScanError::NotFound)?;

    // A comment typed mid-statement never documents anything.
    if direction == QueryDirection::CommentInsideFunction && !strip(text).trim_end().ends_with('{') {
        return Err(ScanError::NotFound);
    }

    match (dialect, direction) {
        (Dialect::PlainFunctionSyntax, QueryDirection::CommentInsideFunction) => {
            walk_back(buffer, line, is_function_line)
        }
        (Dialect::PlainFunctionSyntax, QueryDirection::CommentAboveFunction) => {
            if is_function_line(&strip(text)) {
                Ok(line)
            } else {
                Err(ScanError::NotFound)
            }
        }
        (Dialect::AnnotatedSignatureSyntax, QueryDirection::CommentInsideFunction) => {
            walk_back(buffer, line, |code| code.contains('(') || COLON_ARROW.is_match(code))
        }
        (Dialect::AnnotatedSignatureSyntax, QueryDirection::CommentAboveFunction) => {
            annotated_header(buffer, line, text)
        }
    }
}

/// Walks backward from `line` until `is_header` accepts a line. Reaching an
/// earlier line that holds a `{` first means the start line opened some other
/// block.
fn walk_back(
    buffer: &LineBuffer,
    line: usize,
    is_header: impl Fn(&str) -> bool,
) -> Result<usize, ScanError> {
    let mut current = line;
    loop {
        let code = strip(buffer.line(current).ok_or(ScanError::NotFound)?);
        if current != line && code.contains('{') {
            return Err(ScanError::NotFound);
        }
        if is_header(&code) {
            return Ok(current);
        }
        current = current.checked_sub(1).ok_or(ScanError::NotFound)?;
    }
}

fn annotated_header(buffer: &LineBuffer, line: usize, text: &str) -> Result<usize, ScanError> {
    let code = strip(text);
    if COLON_ARROW.is_match(&code) {
        return Ok(line);
    }
    if CONTROL_KEYWORD.is_match(&code) {
        return Err(ScanError::AmbiguousHeader { line });
    }
    if !code.contains('(') {
        return Err(ScanError::NotFound);
    }

    let column = find_in_code(text, 0, '(').ok_or(ScanError::NotFound)?;
    let line_start = buffer.line_start(line).ok_or(ScanError::NotFound)?;
    let block = match_parens(buffer, SourcePosition(line_start + column))?;

    let between = text_before_next_brace(buffer, block.close)?;
    let between = between.trim();
    if between.is_empty() || between.starts_with(':') {
        Ok(line)
    } else {
        Err(ScanError::AmbiguousHeader { line })
    }
}

/// Comment-stripped text between `after` (exclusive) and the next `{`.
fn text_before_next_brace(buffer: &LineBuffer, after: SourcePosition) -> Result<String, ScanError> {
    let first_line = buffer.line_number_at(after);
    let first_start = buffer.line_start(first_line).ok_or(ScanError::NotFound)?;
    let mut between = String::new();

    for current in first_line..buffer.line_count() {
        let raw = buffer.line(current).ok_or(ScanError::NotFound)?;
        let segment = if current == first_line {
            raw.get(after.offset() + 1 - first_start..).unwrap_or_default()
        } else {
            raw
        };
        let code = strip(segment);
        if let Some(brace) = code.find('{') {
            between.push_str(&code[..brace]);
            return Ok(between);
        }
        between.push_str(&code);
        between.push('\n');
    }

    Err(ScanError::NotFound)
}
