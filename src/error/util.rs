//! Utility functions for error handling
//!
//! File helpers that attach the path and the reason the file was needed.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{FeatureError, Result};

/// Safely open a file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
///
/// # Returns
/// * `Result<fs::File>` - The opened file or a detailed error
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.exists() {
        return Err(FeatureError::file("File not found", path, purpose));
    }

    if !path.is_file() {
        return Err(FeatureError::file("Path is not a file", path, purpose));
    }

    fs::File::open(path).map_err(|e| {
        let message = match e.kind() {
            io::ErrorKind::PermissionDenied => "Permission denied - check file permissions",
            io::ErrorKind::NotFound => "File not found - it may have been deleted during operation",
            _ => "Failed to open file",
        };
        FeatureError::File {
            message: message.to_string(),
            path: path.to_path_buf(),
            purpose: purpose.to_string(),
            source: Some(e),
        }
    })
}

/// Create (or truncate) a file for writing, creating missing parent directories
pub fn safe_create_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| FeatureError::File {
            message: "Failed to create output directory".to_string(),
            path: parent.to_path_buf(),
            purpose: purpose.to_string(),
            source: Some(e),
        })?;
    }

    fs::File::create(path).map_err(|e| FeatureError::File {
        message: "Failed to create file".to_string(),
        path: path.to_path_buf(),
        purpose: purpose.to_string(),
        source: Some(e),
    })
}

/// Safely read a file to string with rich error information
pub fn safe_read_to_string(path: &Path, purpose: &str) -> Result<String> {
    let mut file = safe_open_file(path, purpose)?;

    let mut content = String::new();
    match io::Read::read_to_string(&mut file, &mut content) {
        Ok(_) => Ok(content),
        Err(e) => {
            let message = match e.kind() {
                io::ErrorKind::InvalidData => "File contains invalid UTF-8 data - cannot read as text",
                _ => "Failed to read file content",
            };
            Err(FeatureError::File {
                message: message.to_string(),
                path: path.to_path_buf(),
                purpose: purpose.to_string(),
                source: Some(e),
            })
        }
    }
}
