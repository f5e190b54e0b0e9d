//! Deciding whether a function body returns a value at its own scope.

use super::comments::CommentRunState;
use super::locator::locate_declaration;
use super::patterns::{ARROW_BLOCK, FUNCTION_KEYWORD, RETURN_WITH_VALUE};
use super::{Dialect, QueryDirection};
use crate::buffer::{LineBuffer, SourcePosition};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// When a return tag is generated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnTagPolicy {
    Always,
    Never,
    /// Scan the body for a `return <expr>`.
    #[default]
    Auto,
}

impl ReturnTagPolicy {
    /// `Always` and `Never` answer without running `scan`.
    pub fn decide(self, scan: impl FnOnce() -> bool) -> bool {
        match self {
            ReturnTagPolicy::Always => true,
            ReturnTagPolicy::Never => false,
            ReturnTagPolicy::Auto => scan(),
        }
    }
}

/// Whether the function documented by a comment at `position` needs a return tag.
///
/// Fails closed: an unresolved declaration yields `false`.
pub fn needs_return_tag(
    buffer: &LineBuffer,
    position: SourcePosition,
    direction: QueryDirection,
    dialect: Dialect,
    policy: ReturnTagPolicy,
) -> bool {
    policy.decide(|| {
        let cursor_line = buffer.line_number_at(position);
        let Some(candidate) = direction.candidate_line(cursor_line, buffer.line_count()) else {
            return false;
        };
        let Some(declaration) = locate_declaration(buffer, candidate, direction, dialect) else {
            return false;
        };
        body_returns_value(buffer, declaration)
    })
}

/// Scans the body of an already resolved declaration.
///
/// The body opens at the first `{` outside the parameter list, whichever side
/// of the function the comment was typed on.
pub fn body_returns_value(buffer: &LineBuffer, declaration: usize) -> bool {
    match brace_after_header(buffer, declaration) {
        Some(start) => BodyScan::new(start.comments).run(buffer, start.line, &start.rest),
        None => {
            trace!(declaration, "function body never opens");
            false
        }
    }
}

struct BodyStart {
    line: usize,
    /// Code following the opening brace on `line`.
    rest: String,
    comments: CommentRunState,
}

/// The first `{` after the parameter list, starting at the function keyword.
fn brace_after_header(buffer: &LineBuffer, declaration: usize) -> Option<BodyStart> {
    let mut comments = CommentRunState::default();
    let mut paren_depth: i32 = 0;

    for line in declaration..buffer.line_count() {
        let code = comments.code_portion(buffer.line(line)?);
        let from = if line == declaration {
            FUNCTION_KEYWORD.find(&code).map_or(0, |m| m.start())
        } else {
            0
        };

        for (idx, ch) in code[from..].char_indices() {
            match ch {
                '(' => paren_depth += 1,
                ')' => paren_depth -= 1,
                '{' if paren_depth <= 0 => {
                    let brace = from + idx;
                    return Some(BodyStart {
                        line,
                        rest: code[brace + 1..].to_string(),
                        comments,
                    });
                }
                _ => {}
            }
        }
    }
    None
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    FunctionKeyword,
    OpenParen,
    CloseParen,
    Open,
    Close,
    Return,
}

/// Brace bookkeeping for one body scan. The documented function's own brace
/// is the bottom of `braces`, so `functions_open` starts at 1.
struct BodyScan {
    comments: CommentRunState,
    /// One entry per open brace; `true` when it opened a nested function body.
    braces: Vec<bool>,
    functions_open: usize,
    paren_depth: i32,
    /// Paren depth at the last unclaimed `function` keyword or `=> {`. Only a
    /// `{` at that depth or shallower opens its body; deeper braces belong to
    /// its parameter list.
    pending_function: Option<i32>,
    nested_returns: usize,
}

impl BodyScan {
    fn new(comments: CommentRunState) -> Self {
        Self {
            comments,
            braces: vec![true],
            functions_open: 1,
            paren_depth: 0,
            pending_function: None,
            nested_returns: 0,
        }
    }

    fn run(mut self, buffer: &LineBuffer, first_line: usize, rest: &str) -> bool {
        if let Some(found) = self.scan_code(rest) {
            return found;
        }

        for line in first_line + 1..buffer.line_count() {
            let Some(text) = buffer.line(line) else {
                break;
            };
            let code = self.comments.code_portion(text);
            if code.trim().is_empty() {
                continue;
            }
            if let Some(found) = self.scan_code(&code) {
                trace!(line, found, nested_returns = self.nested_returns, "body scan finished");
                return found;
            }
        }

        trace!(nested_returns = self.nested_returns, "body scan reached end of buffer");
        false
    }

    /// Processes one line of code. `Some` ends the scan.
    fn scan_code(&mut self, code: &str) -> Option<bool> {
        for event in events(code) {
            match event {
                Event::FunctionKeyword => self.pending_function = Some(self.paren_depth),
                Event::OpenParen => self.paren_depth += 1,
                Event::CloseParen => self.paren_depth -= 1,
                Event::Open => {
                    let opens_function = self
                        .pending_function
                        .is_some_and(|depth| self.paren_depth <= depth);
                    if opens_function {
                        self.pending_function = None;
                        self.functions_open += 1;
                    }
                    self.braces.push(opens_function);
                }
                Event::Close => {
                    if self.braces.pop() == Some(true) {
                        self.functions_open -= 1;
                    }
                    if self.braces.is_empty() {
                        return Some(false);
                    }
                }
                Event::Return => {
                    if self.functions_open == 1 {
                        return Some(true);
                    }
                    self.nested_returns += 1;
                }
            }
        }
        None
    }
}

/// Events on a line of code in source order.
fn events(code: &str) -> Vec<Event> {
    let mut events: Vec<(usize, Event)> = code
        .char_indices()
        .filter_map(|(idx, ch)| match ch {
            '(' => Some((idx, Event::OpenParen)),
            ')' => Some((idx, Event::CloseParen)),
            '{' => Some((idx, Event::Open)),
            '}' => Some((idx, Event::Close)),
            _ => None,
        })
        .collect();
    events.extend(
        FUNCTION_KEYWORD
            .find_iter(code)
            .chain(ARROW_BLOCK.find_iter(code))
            .map(|m| (m.start(), Event::FunctionKeyword)),
    );
    events.extend(
        RETURN_WITH_VALUE
            .find_iter(code)
            .map(|m| (m.start(), Event::Return)),
    );
    events.sort_by_key(|(idx, _)| *idx);
    events.into_iter().map(|(_, event)| event).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABOVE: QueryDirection = QueryDirection::CommentAboveFunction;
    const INSIDE: QueryDirection = QueryDirection::CommentInsideFunction;
    const PLAIN: Dialect = Dialect::PlainFunctionSyntax;
    const ANNOTATED: Dialect = Dialect::AnnotatedSignatureSyntax;

    fn above(source: &str) -> bool {
        let buffer = LineBuffer::new(format!("/**\n{source}"));
        needs_return_tag(&buffer, SourcePosition(3), ABOVE, PLAIN, ReturnTagPolicy::Auto)
    }

    #[test]
    fn test_direct_return() {
        assert!(above("function f(x) {\n  return x;\n}"));
    }

    #[test]
    fn test_return_only_in_nested_function() {
        assert!(!above("function f(x) {\n  function g(){ return 1; }\n}"));
    }

    #[test]
    fn test_return_after_nested_function_closes() {
        assert!(above(
            "function f(x) {\n  if (x) {\n    var g = function () {\n      return 1;\n    };\n  }\n  return g;\n}"
        ));
    }

    #[test]
    fn test_nested_function_brace_on_next_line() {
        assert!(!above("function f() {\n  function g()\n  {\n    return 2;\n  }\n}"));
    }

    #[test]
    fn test_bare_return_is_not_a_value() {
        assert!(!above("function f(x) {\n  if (!x) return;\n  x.run();\n}"));
    }

    #[test]
    fn test_return_on_closing_line() {
        assert!(above("function f(x) {\n  x++; return x; }"));
        assert!(above("function f(x) { return x; }"));
    }

    #[test]
    fn test_return_after_function_closes_belongs_elsewhere() {
        assert!(!above("function f(x) {\n  x++;\n}\nfunction g() {\n  return 1;\n}"));
    }

    #[test]
    fn test_returns_in_comments_are_ignored() {
        assert!(!above(
            "function f(x) {\n  // return x;\n  /*\n  return x;\n  */\n  x++;\n}"
        ));
    }

    #[test]
    fn test_destructured_parameters() {
        assert!(above("function f({ a, b }) {\n  return a + b;\n}"));
    }

    #[test]
    fn test_nested_destructured_parameter_is_not_the_body() {
        assert!(!above("function f(x) {\n  function g({ a }) {\n    return a;\n  }\n}"));
        assert!(!above("function f(x) {\n  function g({a}) { return a; }\n  x++;\n}"));
    }

    #[test]
    fn test_nested_default_object_parameter() {
        assert!(!above("function f(x) {\n  function g(opts = {}) {\n    return opts;\n  }\n}"));
    }

    #[test]
    fn test_callback_with_destructured_parameter() {
        assert!(!above(
            "function f(xs) {\n  xs.forEach(function ({ id }) {\n    return id;\n  });\n}"
        ));
        assert!(above(
            "function f({ a }) {\n  var g = function ({ b }) { return b; };\n  return a;\n}"
        ));
    }

    #[test]
    fn test_arrow_callback_return_is_nested() {
        assert!(!above("function f(xs) {\n  xs.forEach((x) => {\n    return x;\n  });\n}"));
    }

    #[test]
    fn test_object_literal_return() {
        assert!(above("function f() {\n  return {\n    a: 1\n  };\n}"));
    }

    #[test]
    fn test_unresolved_declaration_fails_closed() {
        assert!(!above("var x = 1;\nreturn x;"));
    }

    #[test]
    fn test_policy_short_circuits() {
        let buffer = LineBuffer::new("/**\nvar x = 1;");
        assert!(needs_return_tag(&buffer, SourcePosition(3), ABOVE, PLAIN, ReturnTagPolicy::Always));

        let buffer = LineBuffer::new("/**\nfunction f() {\n  return 1;\n}");
        assert!(!needs_return_tag(&buffer, SourcePosition(3), ABOVE, PLAIN, ReturnTagPolicy::Never));
    }

    #[test]
    fn test_comment_inside_function() {
        let buffer = LineBuffer::new("function f(a) {\n    ///\n    return a * 2;\n}");
        let position = SourcePosition(buffer.line_start(1).unwrap() + 7);
        assert!(needs_return_tag(&buffer, position, INSIDE, PLAIN, ReturnTagPolicy::Auto));

        let buffer = LineBuffer::new("function f(a) {\n    ///\n    console.log(a);\n}");
        let position = SourcePosition(buffer.line_start(1).unwrap() + 7);
        assert!(!needs_return_tag(&buffer, position, INSIDE, PLAIN, ReturnTagPolicy::Auto));
    }

    #[test]
    fn test_comment_inside_after_object_literal_on_header_line() {
        let buffer = LineBuffer::new(
            "function f(a) { var o = {\n    ///\n    a: 1\n  };\n  return o;\n}",
        );
        let position = SourcePosition(buffer.line_start(1).unwrap() + 7);
        assert!(needs_return_tag(&buffer, position, INSIDE, PLAIN, ReturnTagPolicy::Auto));
    }

    #[test]
    fn test_comment_inside_multi_line_header() {
        let buffer = LineBuffer::new("function f(a,\n           b) {\n    ///\n    return a + b;\n}");
        let position = SourcePosition(buffer.line_start(2).unwrap() + 7);
        assert!(needs_return_tag(&buffer, position, INSIDE, PLAIN, ReturnTagPolicy::Auto));
    }

    #[test]
    fn test_annotated_signature() {
        let buffer = LineBuffer::new("/**\nfoo(): (x: number) => string {\n return (x)=>\"\"+x;\n}");
        assert!(needs_return_tag(&buffer, SourcePosition(3), ABOVE, ANNOTATED, ReturnTagPolicy::Auto));

        let buffer = LineBuffer::new("/**\nlog(message: string): void {\n  console.log(message);\n}");
        assert!(!needs_return_tag(&buffer, SourcePosition(3), ABOVE, ANNOTATED, ReturnTagPolicy::Auto));
    }

    #[test]
    fn test_unclosed_body_reaches_end_of_buffer() {
        assert!(!above("function f(x) {\n  x++;"));
    }
}
