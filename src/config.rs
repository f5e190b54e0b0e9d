use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Maximum file size to process (in bytes)
    pub max_file_size: u64,
    /// Root directories files may be read from (defaults to current working directory)
    pub root_directories: Vec<PathBuf>,
    /// Explicit options file; when unset, `.docstub.yml` is discovered
    pub options_file: Option<PathBuf>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_file_size: 10 * 1024 * 1024, // 10MB
            root_directories: vec![std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))],
            options_file: None,
        }
    }
}
