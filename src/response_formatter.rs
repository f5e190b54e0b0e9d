use crate::render::CommentStyle;
use crate::scanner::{Parameter, ReturnTagPolicy};
use crate::types::*;
use rmcp::model::{CallToolResult, Content};
use serde_json;

pub struct ResponseFormatter;

impl ResponseFormatter {
    /// Create a formatted response with both JSON data and human-readable text
    pub fn create_formatted_response<T>(
        result: &T,
        summary: String,
    ) -> Result<CallToolResult, Box<dyn std::error::Error + Send + Sync>>
    where
        T: serde::Serialize,
    {
        let json_value = serde_json::to_value(result)?;

        let contents = vec![Content::text(summary), Content::json(json_value)?];

        Ok(CallToolResult::success(contents))
    }

    pub fn format_analyze_result(result: &AnalyzeFunctionResult) -> String {
        match result.declaration_line {
            Some(line) => format!(
                "Function declared on line {} with {}. {}",
                line + 1,
                Self::describe_parameters(&result.parameters),
                Self::describe_return(result.needs_return_tag)
            ),
            None => "No function declaration found for this comment position".to_string(),
        }
    }

    pub fn format_stub_result(result: &GenerateStubResult) -> String {
        let Some(style) = result.style else {
            return "No doc comment trigger before the cursor (expected /** or ///)".to_string();
        };
        let style_name = Self::style_name(style);

        match (&result.edit, result.declaration_line) {
            (Some(edit), Some(line)) => {
                let mut summary = format!(
                    "{style_name} stub for the function on line {} with {}. {}\n\n",
                    line + 1,
                    Self::describe_parameters(&result.parameters),
                    Self::describe_return(result.needs_return_tag)
                );
                summary.push_str(&edit.text);
                summary
            }
            _ => format!("{style_name} trigger found, but no function declaration to document"),
        }
    }

    pub fn format_file_stub_result(result: &FileStubResult) -> String {
        format!(
            "{}\n{}",
            result.file_path,
            Self::format_stub_result(&result.stub)
        )
    }

    pub fn format_continuation(result: &ContinueCommentResult) -> String {
        match (result.style, &result.text) {
            (Some(style), Some(text)) => format!(
                "Continue {} comment with {:?}",
                Self::style_name(style),
                text
            ),
            _ => "Not inside a doc comment; insert a plain newline".to_string(),
        }
    }

    pub fn format_options(result: &OptionsResult) -> String {
        let source = result
            .options_file
            .as_deref()
            .unwrap_or("built-in defaults");
        let policy = match result.options.return_tag {
            ReturnTagPolicy::Always => "always",
            ReturnTagPolicy::Never => "never",
            ReturnTagPolicy::Auto => "when the body returns a value",
        };
        format!(
            "Options from {source}. JSDoc {}, VSDoc {}, return tags {policy}",
            Self::on_off(result.options.jsdoc_enabled),
            Self::on_off(result.options.vsdoc_enabled)
        )
    }

    fn describe_parameters(parameters: &[Parameter]) -> String {
        if parameters.is_empty() {
            return "no parameters".to_string();
        }
        let names: Vec<String> = parameters
            .iter()
            .map(|p| match &p.type_name {
                Some(type_name) => format!("{}: {type_name}", p.name),
                None => p.name.clone(),
            })
            .collect();
        format!(
            "{} parameter{} ({})",
            parameters.len(),
            if parameters.len() == 1 { "" } else { "s" },
            names.join(", ")
        )
    }

    fn describe_return(needs_return_tag: bool) -> &'static str {
        if needs_return_tag {
            "Needs a return tag"
        } else {
            "No return tag"
        }
    }

    fn style_name(style: CommentStyle) -> &'static str {
        match style {
            CommentStyle::JsDoc => "JSDoc",
            CommentStyle::VsDoc => "VSDoc",
        }
    }

    fn on_off(enabled: bool) -> &'static str {
        if enabled { "enabled" } else { "disabled" }
    }
}
