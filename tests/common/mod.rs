// Common test utilities
#![allow(dead_code)]

use docstub_mcp::config::ServiceConfig;
use docstub_mcp::docstub_service::DocStubService;
use docstub_mcp::stub_config::StubOptions;
use rmcp::model::{CallToolRequestParam, CallToolResult};
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

pub const MATH_JS: &str = r#"/**
function add(a, b) {
    return a + b;
}

function logAll(items) {
    ///
    items.forEach(function (item) {
        return console.log(item);
    });
}
"#;

pub const SHAPES_TS: &str = r#"export class Shapes {
    /**
    public area(width: number,
                height: number): number {
        return width * height;
    }

    public describe(shape: Map<string, number[]>, label?: string) {
        ///
        console.log(label, shape);
    }
}
"#;

/// A project directory holding one JavaScript and one TypeScript file.
pub fn setup_test_files() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join("src")).unwrap();
    fs::write(temp_dir.path().join("src/math.js"), MATH_JS).unwrap();
    fs::write(temp_dir.path().join("src/shapes.ts"), SHAPES_TS).unwrap();
    temp_dir
}

pub fn service_for(root: &TempDir) -> DocStubService {
    let config = ServiceConfig {
        root_directories: vec![root.path().to_path_buf()],
        ..Default::default()
    };
    DocStubService::with_options(config, StubOptions::default())
}

pub fn request(name: &'static str, arguments: Value) -> CallToolRequestParam {
    CallToolRequestParam {
        name: name.into(),
        arguments: arguments.as_object().cloned(),
    }
}

/// The text summary of a formatted response.
pub fn summary_text(result: &CallToolResult) -> String {
    result.content[0]
        .as_text()
        .map(|t| t.text.clone())
        .unwrap_or_default()
}

/// The JSON payload of a formatted response.
pub fn payload(result: &CallToolResult) -> Value {
    let text = result
        .content
        .last()
        .and_then(|c| c.as_text())
        .map(|t| t.text.clone())
        .unwrap_or_default();
    serde_json::from_str(&text).unwrap()
}
