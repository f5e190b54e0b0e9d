//! # Stub Rendering
//!
//! Turns a [`StubResult`] into comment text in one of the two comment styles.

use crate::buffer::{LineBuffer, SourcePosition};
use crate::engine::StubResult;
use crate::scanner::patterns::TYPE_ATTRIBUTE;
use crate::scanner::{Dialect, Parameter, QueryDirection};
use crate::stub_config::StubOptions;
use serde::{Deserialize, Serialize};

/// Placeholder type written for untyped JavaScript parameters.
const PLACEHOLDER_TYPE: &str = "type";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentStyle {
    /// `/** ... */` above the function.
    JsDoc,
    /// `/// <summary>` lines inside the function body.
    VsDoc,
}

impl CommentStyle {
    pub fn direction(self) -> QueryDirection {
        match self {
            CommentStyle::JsDoc => QueryDirection::CommentAboveFunction,
            CommentStyle::VsDoc => QueryDirection::CommentInsideFunction,
        }
    }

    /// The characters that open this style of comment.
    pub fn trigger(self) -> &'static str {
        match self {
            CommentStyle::JsDoc => "/**",
            CommentStyle::VsDoc => "///",
        }
    }

    pub fn is_enabled(self, options: &StubOptions) -> bool {
        match self {
            CommentStyle::JsDoc => options.jsdoc_enabled,
            CommentStyle::VsDoc => options.vsdoc_enabled,
        }
    }
}

/// Replace `replace_start..replace_end` with `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StubEdit {
    pub replace_start: SourcePosition,
    pub replace_end: SourcePosition,
    pub text: String,
}

pub struct StubRenderer<'a> {
    buffer: &'a LineBuffer,
    options: &'a StubOptions,
}

impl<'a> StubRenderer<'a> {
    pub fn new(buffer: &'a LineBuffer, options: &'a StubOptions) -> Self {
        Self { buffer, options }
    }

    /// The edit that replaces the cursor line, from its start up to `position`,
    /// with the rendered stub. `None` when the declaration was not resolved.
    pub fn edit(
        &self,
        style: CommentStyle,
        dialect: Dialect,
        position: SourcePosition,
        result: &StubResult,
    ) -> Option<StubEdit> {
        let text = self.render(style, dialect, result)?;
        let line = self.buffer.line_number_at(position);
        let replace_start = SourcePosition(self.buffer.line_start(line)?);

        Some(StubEdit {
            replace_start,
            replace_end: position,
            text,
        })
    }

    pub fn render(&self, style: CommentStyle, dialect: Dialect, result: &StubResult) -> Option<String> {
        if !result.is_resolved() {
            return None;
        }
        Some(match style {
            CommentStyle::JsDoc => self.render_jsdoc(dialect, result),
            CommentStyle::VsDoc => self.render_vsdoc(result),
        })
    }

    fn render_jsdoc(&self, dialect: Dialect, result: &StubResult) -> String {
        let newline = self.buffer.newline();
        let indent = &result.indentation;
        let asterisk = if self.options.use_asterisk { " * " } else { "" };
        let line = format!("{newline}{indent}{asterisk}");
        let plain = !dialect.supports_annotations();

        let mut body = String::new();
        if self.options.multi_line_summary {
            body.push_str(&line);
        }
        for param in &result.parameters {
            body.push_str(&line);
            body.push_str(&jsdoc_param(param, plain));
        }
        if result.needs_return_tag {
            body.push_str(&line);
            body.push_str("@returns");
            if plain {
                body.push_str(" {");
                body.push_str(PLACEHOLDER_TYPE);
                body.push('}');
            }
        }

        let mut stub = format!("{indent}/**{body}");
        if !body.is_empty() {
            stub.push_str(newline);
            stub.push_str(indent);
        }
        stub.push_str(" */");
        stub
    }

    fn render_vsdoc(&self, result: &StubResult) -> String {
        let indent = format!("{}{}", result.indentation, self.options.tab());
        let line = format!("{}{indent}/// ", self.buffer.newline());
        let blank_lines = format!("{line}{line}");

        let mut stub = format!("{indent}/// <summary>");
        if self.options.multi_line_summary {
            stub.push_str(&blank_lines);
        }
        stub.push_str("</summary>");

        for param in &result.parameters {
            stub.push_str(&line);
            stub.push_str(&self.vsdoc_param_open(param));
            if self.options.multi_line_param {
                stub.push_str(&blank_lines);
            }
            stub.push_str("</param>");
        }

        if result.needs_return_tag {
            stub.push_str(&line);
            stub.push_str("<returns");
            push_attributes(&mut stub, &self.options.return_attributes);
            stub.push('>');
            if self.options.multi_line_return {
                stub.push_str(&blank_lines);
            }
            stub.push_str("</returns>");
        }
        stub
    }

    /// A known type replaces any default `type="..."` attribute.
    fn vsdoc_param_open(&self, param: &Parameter) -> String {
        let mut tag = format!("<param name=\"{}\"", param.name);
        let mut attributes = self.options.param_attributes.clone();
        if let Some(type_name) = &param.type_name {
            tag.push_str(&format!(" type=\"{type_name}\""));
            attributes = TYPE_ATTRIBUTE.replace_all(&attributes, "").into_owned();
        }
        push_attributes(&mut tag, &attributes);
        tag.push('>');
        tag
    }
}

fn jsdoc_param(param: &Parameter, plain: bool) -> String {
    let type_name = if plain {
        Some(PLACEHOLDER_TYPE)
    } else {
        param.type_name.as_deref()
    };
    match type_name {
        Some(type_name) => format!("@param {{{type_name}}} {}", param.name),
        None => format!("@param {}", param.name),
    }
}

fn push_attributes(tag: &mut String, attributes: &str) {
    let attributes = attributes.trim();
    if !attributes.is_empty() {
        tag.push(' ');
        tag.push_str(attributes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(parameters: Vec<Parameter>, needs_return_tag: bool, indentation: &str) -> StubResult {
        StubResult {
            parameters,
            needs_return_tag,
            declaration_line: Some(1),
            indentation: indentation.to_string(),
        }
    }

    fn typed(name: &str, type_name: &str) -> Parameter {
        Parameter::new(name, Some(type_name.to_string()))
    }

    #[test]
    fn test_jsdoc_plain_uses_placeholder_types() {
        let buffer = LineBuffer::new("/**\nfunction add(a, b) {\n  return a + b;\n}");
        let options = StubOptions::default();
        let stub = StubRenderer::new(&buffer, &options)
            .render(
                CommentStyle::JsDoc,
                Dialect::PlainFunctionSyntax,
                &result(
                    vec![Parameter::untyped("a"), Parameter::untyped("b")],
                    true,
                    "",
                ),
            )
            .unwrap();
        assert_eq!(
            stub,
            "/**\n * \n * @param {type} a\n * @param {type} b\n * @returns {type}\n */"
        );
    }

    #[test]
    fn test_jsdoc_annotated_keeps_real_types() {
        let buffer = LineBuffer::new("  /**\r\n  area(w: number, h): number {\r\n  }");
        let options = StubOptions {
            multi_line_summary: false,
            ..StubOptions::default()
        };
        let stub = StubRenderer::new(&buffer, &options)
            .render(
                CommentStyle::JsDoc,
                Dialect::AnnotatedSignatureSyntax,
                &result(vec![typed("w", "number"), Parameter::untyped("h")], true, "  "),
            )
            .unwrap();
        assert_eq!(
            stub,
            "  /**\r\n   * @param {number} w\r\n   * @param h\r\n   * @returns\r\n   */"
        );
    }

    #[test]
    fn test_jsdoc_empty_body_and_no_asterisk() {
        let buffer = LineBuffer::new("/**\nfunction f() {}");
        let options = StubOptions {
            multi_line_summary: false,
            use_asterisk: false,
            ..StubOptions::default()
        };
        let renderer = StubRenderer::new(&buffer, &options);
        let empty = result(Vec::new(), false, "");
        assert_eq!(
            renderer.render(CommentStyle::JsDoc, Dialect::PlainFunctionSyntax, &empty),
            Some("/** */".to_string())
        );

        let one = result(vec![Parameter::untyped("x")], false, "");
        assert_eq!(
            renderer.render(CommentStyle::JsDoc, Dialect::PlainFunctionSyntax, &one),
            Some("/**\n@param {type} x\n */".to_string())
        );
    }

    #[test]
    fn test_vsdoc_default_options() {
        let buffer = LineBuffer::new("function f(a) {\n    ///\n    return a;\n}");
        let options = StubOptions::default();
        let stub = StubRenderer::new(&buffer, &options)
            .render(
                CommentStyle::VsDoc,
                Dialect::PlainFunctionSyntax,
                &result(vec![Parameter::untyped("a")], true, ""),
            )
            .unwrap();
        assert_eq!(
            stub,
            "    /// <summary>\n    /// \n    /// </summary>\n    /// <param name=\"a\"></param>\n    /// <returns type=\"\"></returns>"
        );
    }

    #[test]
    fn test_vsdoc_known_type_replaces_default_type_attribute() {
        let buffer = LineBuffer::new("f(a: string, b) {\n\t///\n}");
        let options = StubOptions {
            multi_line_summary: false,
            multi_line_param: true,
            use_spaces_for_tabs: false,
            param_attributes: "type=\"Object\" optional=\"false\"".to_string(),
            ..StubOptions::default()
        };
        let stub = StubRenderer::new(&buffer, &options)
            .render(
                CommentStyle::VsDoc,
                Dialect::AnnotatedSignatureSyntax,
                &result(vec![typed("a", "string"), Parameter::untyped("b")], false, ""),
            )
            .unwrap();
        assert_eq!(
            stub,
            concat!(
                "\t/// <summary></summary>",
                "\n\t/// <param name=\"a\" type=\"string\" optional=\"false\">\n\t/// \n\t/// </param>",
                "\n\t/// <param name=\"b\" type=\"Object\" optional=\"false\">\n\t/// \n\t/// </param>",
            )
        );
    }

    #[test]
    fn test_edit_spans_line_start_to_cursor() {
        let text = "function f(a) {\n    ///\n}";
        let buffer = LineBuffer::new(text);
        let options = StubOptions::default();
        let cursor = SourcePosition(text.find("///").unwrap() + 3);
        let edit = StubRenderer::new(&buffer, &options)
            .edit(
                CommentStyle::VsDoc,
                Dialect::PlainFunctionSyntax,
                cursor,
                &result(Vec::new(), false, ""),
            )
            .unwrap();
        assert_eq!(edit.replace_start, SourcePosition(16));
        assert_eq!(edit.replace_end, cursor);
    }

    #[test]
    fn test_unresolved_renders_nothing() {
        let buffer = LineBuffer::new("/**");
        let options = StubOptions::default();
        let renderer = StubRenderer::new(&buffer, &options);
        assert!(
            renderer
                .render(CommentStyle::JsDoc, Dialect::PlainFunctionSyntax, &StubResult::default())
                .is_none()
        );
    }
}
