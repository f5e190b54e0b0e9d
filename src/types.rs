use crate::buffer::{LineBuffer, SourcePosition};
use crate::errors::ServiceError;
use crate::render::{CommentStyle, StubEdit};
use crate::scanner::{Dialect, Parameter, QueryDirection, ReturnTagPolicy};
use crate::stub_config::StubOptions;
use serde::{Deserialize, Serialize};

/// Where the cursor sits. Either `offset`, or `line` with an optional
/// `column` (both 0-based, column counted in characters). A missing column
/// means the end of the line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CursorLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
}

impl CursorLocation {
    pub fn at(line: usize, column: usize) -> Self {
        Self {
            line: Some(line),
            column: Some(column),
            offset: None,
        }
    }

    pub fn end_of_line(line: usize) -> Self {
        Self {
            line: Some(line),
            ..Self::default()
        }
    }

    pub fn resolve(&self, buffer: &LineBuffer) -> Result<SourcePosition, ServiceError> {
        if let Some(offset) = self.offset {
            if offset > buffer.text().len() || !buffer.text().is_char_boundary(offset) {
                return Err(ServiceError::InvalidPosition(format!(
                    "offset {offset} is not a character boundary inside the document"
                )));
            }
            return Ok(SourcePosition(offset));
        }

        let Some(line) = self.line else {
            return Err(ServiceError::InvalidPosition(
                "provide either 'offset' or 'line' (with optional 'column')".to_string(),
            ));
        };
        let position = match self.column {
            Some(column) => buffer.position_of(line, column),
            None => buffer.end_of_line(line),
        };
        position.ok_or_else(|| {
            ServiceError::InvalidPosition(format!(
                "line {line}, column {} is outside the document ({} lines)",
                self.column.map_or_else(|| "end".to_string(), |c| c.to_string()),
                buffer.line_count()
            ))
        })
    }
}

// Engine analysis types
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeFunctionParam {
    pub code: String,
    pub language: String,
    #[serde(flatten)]
    pub cursor: CursorLocation,
    pub direction: QueryDirection,
    /// Overrides the configured return tag policy
    #[serde(default)]
    pub return_tag: Option<ReturnTagPolicy>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeFunctionResult {
    pub dialect: Dialect,
    pub direction: QueryDirection,
    pub declaration_line: Option<usize>,
    pub parameters: Vec<Parameter>,
    pub needs_return_tag: bool,
}

// Stub generation types
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateStubParam {
    pub code: String,
    pub language: String,
    #[serde(flatten)]
    pub cursor: CursorLocation,
    /// Comment style to render; detected from the text before the cursor when absent
    #[serde(default)]
    pub style: Option<CommentStyle>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateStubResult {
    /// `None` when the cursor does not follow `/**` or `///`
    pub style: Option<CommentStyle>,
    pub declaration_line: Option<usize>,
    pub parameters: Vec<Parameter>,
    pub needs_return_tag: bool,
    /// Replace the cursor line up to the cursor with `edit.text`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit: Option<StubEdit>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileStubParam {
    pub path: String,
    /// Inferred from the file extension when absent
    #[serde(default)]
    pub language: Option<String>,
    #[serde(flatten)]
    pub cursor: CursorLocation,
    #[serde(default)]
    pub style: Option<CommentStyle>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileStubResult {
    pub file_path: String,
    #[serde(flatten)]
    pub stub: GenerateStubResult,
}

// Comment continuation types
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContinueCommentParam {
    pub code: String,
    #[serde(flatten)]
    pub cursor: CursorLocation,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContinueCommentResult {
    pub continued: bool,
    pub style: Option<CommentStyle>,
    /// Insert in place of the plain newline
    pub text: Option<String>,
}

// Options types
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetOptionsParam {}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReloadOptionsParam {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsResult {
    pub options_file: Option<String>,
    pub options: StubOptions,
}

// Utility types
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListLanguagesParam {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageInfo {
    pub name: String,
    pub dialect: Dialect,
    pub extensions: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListLanguagesResult {
    pub languages: Vec<LanguageInfo>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentationResult {
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_resolve() {
        let buffer = LineBuffer::new("/**\nfunction f() {}");
        assert_eq!(
            CursorLocation::at(0, 3).resolve(&buffer).unwrap(),
            SourcePosition(3)
        );
        assert_eq!(
            CursorLocation::end_of_line(1).resolve(&buffer).unwrap(),
            SourcePosition(19)
        );

        let offset = CursorLocation {
            offset: Some(2),
            ..CursorLocation::default()
        };
        assert_eq!(offset.resolve(&buffer).unwrap(), SourcePosition(2));
    }

    #[test]
    fn test_cursor_resolve_errors() {
        let buffer = LineBuffer::new("é");
        let inside_char = CursorLocation {
            offset: Some(1),
            ..CursorLocation::default()
        };
        assert!(matches!(
            inside_char.resolve(&buffer),
            Err(ServiceError::InvalidPosition(_))
        ));
        assert!(CursorLocation::default().resolve(&buffer).is_err());
        assert!(CursorLocation::at(3, 0).resolve(&buffer).is_err());
    }

    #[test]
    fn test_flattened_cursor_deserializes() {
        let param: GenerateStubParam = serde_json::from_value(serde_json::json!({
            "code": "/**\nfunction f() {}",
            "language": "javascript",
            "line": 0,
            "column": 3,
            "style": "jsdoc"
        }))
        .unwrap();
        assert_eq!(param.cursor.line, Some(0));
        assert_eq!(param.cursor.column, Some(3));
        assert_eq!(param.style, Some(CommentStyle::JsDoc));
    }
}
