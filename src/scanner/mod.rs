//! # Scanner
//!
//! Line-oriented heuristics that resolve a function declaration from a cursor
//! position and analyze its body. Nothing here parses JavaScript; every check is
//! textual and fails closed.

pub mod comments;
pub mod locator;
pub mod params;
pub mod parens;
pub mod patterns;
pub mod returns;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use comments::{CommentRunState, strip};
pub use locator::locate_declaration;
pub use params::{Parameter, parse};
pub use parens::{ParenBlock, find_parameter_block, match_parens};
pub use returns::{ReturnTagPolicy, body_returns_value, needs_return_tag};

/// Which function syntax heuristics apply to the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    /// Ordinary `function` declarations and expressions (JavaScript).
    PlainFunctionSyntax,
    /// Signatures with type annotations and arrow-typed members (TypeScript).
    AnnotatedSignatureSyntax,
}

impl Dialect {
    /// Maps a content type or language name onto a dialect.
    pub fn from_language(language: &str) -> Option<Self> {
        match language.trim().to_ascii_lowercase().as_str() {
            "javascript" | "js" | "jsx" | "jscript" | "mjs" | "cjs" => {
                Some(Dialect::PlainFunctionSyntax)
            }
            "typescript" | "ts" | "tsx" | "mts" | "cts" => Some(Dialect::AnnotatedSignatureSyntax),
            _ => None,
        }
    }

    /// Maps a file extension onto a dialect.
    pub fn from_extension(path: &std::path::Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_language)
    }

    pub fn supports_annotations(self) -> bool {
        matches!(self, Dialect::AnnotatedSignatureSyntax)
    }
}

/// Where the doc comment sits relative to the function it documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryDirection {
    /// The declaration follows the comment line.
    #[serde(alias = "above")]
    CommentAboveFunction,
    /// The comment was typed just inside an open function body.
    #[serde(alias = "inside")]
    CommentInsideFunction,
}

impl QueryDirection {
    /// The line the locator starts from, given the line holding the cursor.
    pub fn candidate_line(self, cursor_line: usize, line_count: usize) -> Option<usize> {
        match self {
            QueryDirection::CommentAboveFunction => {
                let next = cursor_line + 1;
                (next < line_count).then_some(next)
            }
            QueryDirection::CommentInsideFunction => cursor_line.checked_sub(1),
        }
    }
}

/// Reasons a heuristic gave up. None of these reach the user; they collapse into
/// an empty result at the engine boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanError {
    /// No enclosing function could be resolved.
    NotFound,
    /// An opening paren or brace never closes before the end of the buffer.
    Unterminated { line: usize },
    /// A candidate line was rejected as a function header.
    AmbiguousHeader { line: usize },
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::NotFound => write!(f, "no function declaration found"),
            ScanError::Unterminated { line } => {
                write!(f, "unterminated block starting on line {line}")
            }
            ScanError::AmbiguousHeader { line } => {
                write!(f, "line {line} is not a function header")
            }
        }
    }
}

impl std::error::Error for ScanError {}
