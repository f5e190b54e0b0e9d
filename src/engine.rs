//! # Stub Engine
//!
//! Answers one query: which parameters the documented function takes and
//! whether its body returns a value. Every failure inside the scanner collapses
//! into an empty [`StubResult`].

use crate::buffer::{LineBuffer, SourcePosition};
use crate::scanner::{
    Dialect, Parameter, QueryDirection, ReturnTagPolicy, ScanError, body_returns_value,
    find_parameter_block, locate_declaration, parse, strip,
};
use serde::Serialize;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StubQuery {
    pub position: SourcePosition,
    pub direction: QueryDirection,
    pub dialect: Dialect,
    pub return_policy: ReturnTagPolicy,
}

/// What the engine found for a query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StubResult {
    pub parameters: Vec<Parameter>,
    pub needs_return_tag: bool,
    /// `None` when no declaration was resolved.
    pub declaration_line: Option<usize>,
    /// Leading whitespace of the declaration line.
    pub indentation: String,
}

impl StubResult {
    pub fn is_resolved(&self) -> bool {
        self.declaration_line.is_some()
    }
}

pub struct StubEngine<'a> {
    buffer: &'a LineBuffer,
}

impl<'a> StubEngine<'a> {
    pub fn new(buffer: &'a LineBuffer) -> Self {
        Self { buffer }
    }

    pub fn resolve(&self, query: &StubQuery) -> StubResult {
        let cursor_line = self.buffer.line_number_at(query.position);
        let Some(candidate) = query
            .direction
            .candidate_line(cursor_line, self.buffer.line_count())
        else {
            debug!(cursor_line, direction = ?query.direction, "no line to inspect");
            return StubResult::default();
        };

        let Some(declaration) =
            locate_declaration(self.buffer, candidate, query.direction, query.dialect)
        else {
            debug!(cursor_line, candidate, "no declaration for comment");
            return StubResult::default();
        };

        let parameters = match self.parameters(declaration, query.dialect) {
            Ok(parameters) => parameters,
            Err(err) => {
                trace!(declaration, %err, "parameter list not extracted");
                Vec::new()
            }
        };

        let needs_return_tag = query
            .return_policy
            .decide(|| body_returns_value(self.buffer, declaration));

        debug!(
            declaration,
            parameters = parameters.len(),
            needs_return_tag,
            "resolved declaration"
        );

        StubResult {
            parameters,
            needs_return_tag,
            declaration_line: Some(declaration),
            indentation: self.buffer.indentation(declaration).to_string(),
        }
    }

    /// Comment-strips the parameter list one line at a time and joins the
    /// pieces with single spaces, so a list wrapped over several lines parses
    /// the same as its one-line spelling.
    fn parameters(&self, declaration: usize, dialect: Dialect) -> Result<Vec<Parameter>, ScanError> {
        let block = find_parameter_block(self.buffer, declaration)?;
        let interior = block
            .interior
            .lines()
            .map(|line| strip(line).trim().to_string())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        Ok(parse(&interior, dialect))
    }
}
