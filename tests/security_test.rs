mod common;

use common::*;
use docstub_mcp::config::ServiceConfig;
use docstub_mcp::docstub_service::DocStubService;
use docstub_mcp::errors::ServiceError;
use docstub_mcp::stub_config::StubOptions;
use docstub_mcp::{CursorLocation, FileStubParam};
use std::fs;
use tempfile::TempDir;

fn param(path: &str) -> FileStubParam {
    FileStubParam {
        path: path.to_string(),
        language: None,
        cursor: CursorLocation::end_of_line(0),
        style: None,
    }
}

#[tokio::test]
async fn test_path_traversal_blocked() {
    let outer = TempDir::new().unwrap();
    let root = outer.path().join("project");
    fs::create_dir_all(&root).unwrap();
    fs::write(outer.path().join("escape.js"), "/**\nfunction f() {}").unwrap();

    let config = ServiceConfig {
        root_directories: vec![root.clone()],
        ..Default::default()
    };
    let service = DocStubService::with_options(config, StubOptions::default());

    let absolute = outer.path().join("escape.js");
    for path in ["../escape.js", absolute.to_str().unwrap(), "/etc/passwd"] {
        let result = service.file_stub(param(path)).await;
        assert!(result.is_err(), "{path} should be rejected");
    }
}

#[tokio::test]
async fn test_missing_file() {
    let root = setup_test_files();
    let service = service_for(&root);

    let result = service.file_stub(param("src/missing.js")).await;
    assert!(matches!(result, Err(ServiceError::FileNotFound(_))));
}

#[tokio::test]
async fn test_file_too_large() {
    let root = setup_test_files();
    let config = ServiceConfig {
        root_directories: vec![root.path().to_path_buf()],
        max_file_size: 16,
        ..Default::default()
    };
    let service = DocStubService::with_options(config, StubOptions::default());

    let result = service.file_stub(param("src/math.js")).await;
    assert!(matches!(result, Err(ServiceError::FileTooLarge { limit: 16, .. })));
}

#[tokio::test]
async fn test_unknown_extension_needs_language() {
    let root = setup_test_files();
    fs::write(root.path().join("script.py"), "def f(): pass").unwrap();
    let service = service_for(&root);

    let result = service.file_stub(param("script.py")).await;
    assert!(matches!(result, Err(ServiceError::UnsupportedLanguage(ext)) if ext == ".py"));
}
