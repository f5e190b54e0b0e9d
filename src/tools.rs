use crate::scanner::Dialect;
use crate::types::*;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, ErrorData, JsonObject, ListToolsResult, Tool,
};
use serde_json::{self, Value, json};
use std::borrow::Cow;
use std::sync::Arc;

pub struct ToolService;

/// Wraps a JSON schema literal for a tool definition.
fn schema(value: Value) -> Arc<JsonObject> {
    match value {
        Value::Object(map) => Arc::new(map),
        _ => Arc::new(JsonObject::new()),
    }
}

/// Cursor properties shared by every tool that takes a position.
fn cursor_properties(properties: Value) -> Value {
    let mut merged = json!({
        "line": { "type": "integer", "minimum": 0, "description": "0-based line of the cursor" },
        "column": { "type": "integer", "minimum": 0, "description": "0-based character column; defaults to the end of the line" },
        "offset": { "type": "integer", "minimum": 0, "description": "Absolute byte offset; alternative to line/column" }
    });
    if let (Some(merged), Value::Object(extra)) = (merged.as_object_mut(), properties) {
        merged.extend(extra);
    }
    merged
}

impl ToolService {
    pub fn list_tools() -> ListToolsResult {
        ListToolsResult {
            tools: vec![
                Tool::new(
                    "generate_stub",
                    "Generate a JSDoc (/**) or VSDoc (///) comment stub for the function at the cursor. The style is detected from the text before the cursor unless given.",
                    schema(json!({
                        "type": "object",
                        "properties": cursor_properties(json!({
                            "code": { "type": "string" },
                            "language": { "type": "string", "description": "javascript, jsx, typescript or tsx" },
                            "style": { "type": "string", "enum": ["jsdoc", "vsdoc"] }
                        })),
                        "required": ["code", "language"]
                    })),
                ),
                Tool::new(
                    "file_stub",
                    "Generate a comment stub for the function at a cursor position in a file under the allowed root directories.",
                    schema(json!({
                        "type": "object",
                        "properties": cursor_properties(json!({
                            "path": { "type": "string", "description": "Absolute path, or relative to a root directory" },
                            "language": { "type": "string", "description": "Defaults to the file extension" },
                            "style": { "type": "string", "enum": ["jsdoc", "vsdoc"] }
                        })),
                        "required": ["path"]
                    })),
                ),
                Tool::new(
                    "analyze_function",
                    "Resolve the function a doc comment belongs to and report its parameters and whether it needs a return tag, without rendering a stub.",
                    schema(json!({
                        "type": "object",
                        "properties": cursor_properties(json!({
                            "code": { "type": "string" },
                            "language": { "type": "string" },
                            "direction": { "type": "string", "enum": ["above", "inside"], "description": "Comment above the function (JSDoc) or just inside its body (VSDoc)" },
                            "return_tag": { "type": "string", "enum": ["auto", "always", "never"] }
                        })),
                        "required": ["code", "language", "direction"]
                    })),
                ),
                Tool::new(
                    "continue_comment",
                    "Text to insert when Enter is pressed at the cursor inside a doc comment, continuing the comment prefix.",
                    schema(json!({
                        "type": "object",
                        "properties": cursor_properties(json!({
                            "code": { "type": "string" }
                        })),
                        "required": ["code"]
                    })),
                ),
                Tool::new(
                    "get_options",
                    "Show the stub options currently in effect and the file they came from.",
                    schema(json!({ "type": "object", "properties": {} })),
                ),
                Tool::new(
                    "reload_options",
                    "Re-read the .docstub.yml options file.",
                    schema(json!({ "type": "object", "properties": {} })),
                ),
                Tool::new(
                    "list_languages",
                    "List supported languages and their file extensions.",
                    schema(json!({ "type": "object", "properties": {} })),
                ),
                Tool::new(
                    "documentation",
                    "Provides detailed usage examples for all tools.",
                    schema(json!({ "type": "object", "properties": {} })),
                ),
            ],
            ..Default::default()
        }
    }

    pub fn parse_param<T>(request: &CallToolRequestParam) -> Result<T, ErrorData>
    where
        T: serde::de::DeserializeOwned,
    {
        serde_json::from_value(serde_json::Value::Object(
            request.arguments.clone().unwrap_or_default(),
        ))
        .map_err(|e| ErrorData::invalid_params(Cow::Owned(e.to_string()), None))
    }

    pub fn create_success_result<T>(result: &T) -> Result<CallToolResult, ErrorData>
    where
        T: serde::Serialize,
    {
        let json_value = serde_json::to_value(result)
            .map_err(|e| ErrorData::internal_error(Cow::Owned(e.to_string()), None))?;
        Ok(CallToolResult::success(vec![Content::json(json_value)?]))
    }

    pub fn list_languages() -> ListLanguagesResult {
        let language = |name: &str, extensions: &[&str]| {
            let dialect = Dialect::from_language(name).unwrap_or(Dialect::PlainFunctionSyntax);
            LanguageInfo {
                name: name.to_string(),
                dialect,
                extensions: extensions.iter().map(|s| s.to_string()).collect(),
            }
        };

        ListLanguagesResult {
            languages: vec![
                language("javascript", &["js", "mjs", "cjs"]),
                language("jsx", &["jsx"]),
                language("typescript", &["ts", "mts", "cts"]),
                language("tsx", &["tsx"]),
            ],
        }
    }

    pub fn get_documentation() -> DocumentationResult {
        let docs = r##"
# Doc Stub MCP Service Documentation

This service writes documentation comment skeletons for JavaScript and TypeScript
functions. It finds the function a comment belongs to, lists its parameters
(with their written types in TypeScript) and decides whether a return tag is needed.

## Key Concepts

**Comment styles:**
- `jsdoc`: typed as `/**` on the line above a function
- `vsdoc`: typed as `///` on the first line inside a function body

**Cursor:** `line` + `column` (0-based, column in characters, defaults to end of line)
or an absolute byte `offset`.

**Return tags:** emitted when the body has a `return <value>` at the function's own
level. Returns inside nested functions do not count.

## Tools

### generate_stub
```json
{
  "code": "/**\nfunction add(a, b) {\n  return a + b;\n}",
  "language": "javascript",
  "line": 0,
  "column": 3
}
```
Returns an `edit` that replaces the cursor line, from its start to the cursor, with:
```
/**
 *
 * @param {type} a
 * @param {type} b
 * @returns {type}
 */
```

### file_stub
Same as `generate_stub` for a file inside the root directories
```json
{ "path": "src/math.ts", "line": 11 }
```

### analyze_function
Raw analysis without rendering
```json
{
  "code": "function area(w: number, h: number): number {\n    ///\n    return w * h;\n}",
  "language": "typescript",
  "line": 1,
  "direction": "inside"
}
```

### continue_comment
Prefix for the next comment line after Enter
```json
{ "code": "    /// <summary>\n    /// </summary>", "line": 0 }
```

### get_options, reload_options
Show or re-read `.docstub.yml`. Keys (all optional, camelCase):
`jsdocEnabled`, `vsdocEnabled`, `autoNewLine`, `multiLineSummary`,
`returnTag` (`auto`/`always`/`never`), `returnAttributes`, `multiLineReturn`,
`paramAttributes`, `multiLineParam`, `useAsterisk`, `useSpacesForTabs`,
`spacesForTabsCount`.

## Limits

The analysis is textual. String literals containing braces or parentheses,
and unusual formatting, can confuse it; it then produces an empty stub rather
than an error.
"##;

        DocumentationResult {
            content: docs.to_string(),
        }
    }
}
