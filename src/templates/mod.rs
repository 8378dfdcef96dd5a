//! Dork template loader
//!
//! Reads a library of saved dork queries from a line-delimited UTF-8
//! file: one template per line, blank lines and `#` comments ignored.
//! No caching, the file is re-read on every call.

use std::io::ErrorKind;
use std::path::Path;
use thiserror::Error;

/// Errors reported by [`load_templates`]
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("dork file not found: {0}")]
    NotFound(String),
    #[error("dork file contains no usable templates: {0}")]
    Empty(String),
    #[error("failed to read dork file: {0}")]
    Io(#[from] std::io::Error),
}

/// Load dork templates from `path`
pub fn load_templates(path: impl AsRef<Path>) -> Result<Vec<String>, LoadError> {
    let path = path.as_ref();

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(LoadError::NotFound(path.display().to_string()))
        }
        Err(e) => return Err(e.into()),
    };

    let templates: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect();

    if templates.is_empty() {
        return Err(LoadError::Empty(path.display().to_string()));
    }

    Ok(templates)
}
