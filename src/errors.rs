//! # Error Types
//!
//! Error handling for the doc-stub MCP service.
//! Provides structured error types that can be converted to MCP ErrorData.

use rmcp::model::ErrorData;
use std::fmt;
use std::path::PathBuf;

/// Error types that can occur during service operations.
///
/// Scanner failures never surface here; they degrade to an empty stub inside
/// the engine. These errors cover bad requests, I/O and configuration.
#[derive(Debug)]
pub enum ServiceError {
    /// Internal service error with custom message
    Internal(String),
    /// I/O error reading files
    Io(std::io::Error),
    /// Error parsing the YAML options file
    SerdeYaml(serde_yaml::Error),
    /// Error parsing JSON data
    SerdeJson(serde_json::Error),
    /// Requested file not found
    FileNotFound(PathBuf),
    /// File exceeds the configured size limit
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },
    /// Cursor position does not exist in the document
    InvalidPosition(String),
    /// Language has no dialect
    UnsupportedLanguage(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Internal(msg) => write!(f, "Internal error: {msg}"),
            ServiceError::Io(err) => write!(f, "IO error: {err}"),
            ServiceError::SerdeYaml(err) => write!(f, "YAML parsing error: {err}"),
            ServiceError::SerdeJson(err) => write!(f, "JSON parsing error: {err}"),
            ServiceError::FileNotFound(path) => write!(f, "File not found: {}", path.display()),
            ServiceError::FileTooLarge { path, size, limit } => write!(
                f,
                "File too large: {} is {size} bytes (limit {limit})",
                path.display()
            ),
            ServiceError::InvalidPosition(msg) => write!(f, "Invalid position: {msg}"),
            ServiceError::UnsupportedLanguage(lang) => write!(
                f,
                "Unsupported language: {lang}. Use javascript, jsx, typescript or tsx"
            ),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<std::io::Error> for ServiceError {
    fn from(err: std::io::Error) -> Self {
        ServiceError::Io(err)
    }
}

impl From<serde_yaml::Error> for ServiceError {
    fn from(err: serde_yaml::Error) -> Self {
        ServiceError::SerdeYaml(err)
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::SerdeJson(err)
    }
}

impl From<ServiceError> for ErrorData {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidPosition(_) | ServiceError::UnsupportedLanguage(_) => {
                ErrorData::invalid_params(err.to_string(), None)
            }
            _ => ErrorData::internal_error(err.to_string(), None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::ErrorCode;

    #[test]
    fn test_request_errors_are_invalid_params() {
        let data: ErrorData = ServiceError::UnsupportedLanguage("rust".into()).into();
        assert_eq!(data.code, ErrorCode::INVALID_PARAMS);
        assert!(data.message.contains("rust"));

        let data: ErrorData = ServiceError::InvalidPosition("line 9".into()).into();
        assert_eq!(data.code, ErrorCode::INVALID_PARAMS);
    }

    #[test]
    fn test_other_errors_are_internal() {
        let data: ErrorData = ServiceError::FileNotFound(PathBuf::from("/x.js")).into();
        assert_eq!(data.code, ErrorCode::INTERNAL_ERROR);
        assert!(data.message.contains("/x.js"));
    }
}
