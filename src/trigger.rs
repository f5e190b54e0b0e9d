//! Recognizing the keystrokes that open a doc comment, and continuing a doc
//! comment onto a new line when Enter is pressed inside it.

use crate::buffer::{LineBuffer, SourcePosition};
use crate::render::CommentStyle;
use crate::scanner::patterns::JSDOC_LINE;
use crate::stub_config::StubOptions;
use serde::Serialize;

/// Which comment style the text before `position` just opened, if any.
pub fn detect_trigger(
    buffer: &LineBuffer,
    position: SourcePosition,
    options: &StubOptions,
) -> Option<CommentStyle> {
    let before = text_before(buffer, position)?;
    [CommentStyle::JsDoc, CommentStyle::VsDoc]
        .into_iter()
        .find(|style| style.is_enabled(options) && before.ends_with(style.trigger()))
}

/// Text to insert at `position` in place of a plain newline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Continuation {
    pub style: CommentStyle,
    /// Newline followed by the comment prefix for the new line.
    pub text: String,
}

/// Continues a doc comment when Enter is pressed at `position`.
///
/// A line is continued when the next line belongs to the same comment or the
/// cursor is not at the end of the line, and only when the cursor sits after
/// the comment marker.
pub fn continue_comment(
    buffer: &LineBuffer,
    position: SourcePosition,
    options: &StubOptions,
) -> Option<Continuation> {
    if !options.auto_new_line {
        return None;
    }

    let line = buffer.line_number_at(position);
    let text = buffer.line(line)?;
    let column = position.offset().checked_sub(buffer.line_start(line)?)?;
    let at_end = column >= text.len();
    let next = buffer.line(line + 1).unwrap_or_default();
    let newline = buffer.newline();

    if options.vsdoc_enabled && text.trim_start().starts_with("///") {
        let continues = next.trim_start().starts_with("///") || !at_end;
        let slash = text.find('/')?;
        if !continues || column < slash + 3 {
            return None;
        }
        return Some(Continuation {
            style: CommentStyle::VsDoc,
            text: format!("{newline}{}/// ", &text[..slash]),
        });
    }

    if options.jsdoc_enabled && options.use_asterisk && JSDOC_LINE.is_match(text) {
        let continues = JSDOC_LINE.is_match(next) || !at_end;
        let asterisk = text.find('*')?;
        if !continues || column < asterisk {
            return None;
        }
        let indent = text[..asterisk].replace('/', " ");
        return Some(Continuation {
            style: CommentStyle::JsDoc,
            text: format!("{newline}{indent}* "),
        });
    }

    None
}

fn text_before(buffer: &LineBuffer, position: SourcePosition) -> Option<&str> {
    let line = buffer.line_number_at(position);
    let start = buffer.line_start(line)?;
    let end = position.offset().min(buffer.line_end(line)?);
    buffer.text().get(start..end)
}
