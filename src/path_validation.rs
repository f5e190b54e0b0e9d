use crate::errors::ServiceError;
use std::path::{Path, PathBuf};

/// Resolves a requested file path against the allowed roots.
///
/// Relative paths are tried under each root in order. The result is the
/// canonical path of an existing file inside one of the roots.
pub fn resolve_file_within_roots(
    requested: &str,
    root_directories: &[PathBuf],
) -> Result<PathBuf, ServiceError> {
    let requested_path = Path::new(requested);

    if requested_path.is_absolute() {
        return validate_path_within_roots(requested_path, root_directories);
    }

    for root in root_directories {
        let candidate = root.join(requested_path);
        if candidate.exists() {
            return validate_path_within_roots(&candidate, root_directories);
        }
    }

    Err(ServiceError::FileNotFound(requested_path.to_path_buf()))
}

/// Validates that an existing path is within one of the allowed root directories
pub fn validate_path_within_roots(
    path: &Path,
    root_directories: &[PathBuf],
) -> Result<PathBuf, ServiceError> {
    let canonical_path = path
        .canonicalize()
        .map_err(|_| ServiceError::FileNotFound(path.to_path_buf()))?;

    // Roots that no longer exist cannot contain anything.
    let inside = root_directories
        .iter()
        .filter_map(|root| root.canonicalize().ok())
        .any(|root| canonical_path.starts_with(root));

    if inside {
        Ok(canonical_path)
    } else {
        Err(ServiceError::Internal(
            "Path is outside allowed directories".to_string(),
        ))
    }
}
