//! Loading command trees from JSON or YAML files.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::CommandDef;

/// Errors that can occur while loading a command tree.
#[derive(Debug, Error)]
pub enum TreeError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Convenience alias for results with [`TreeError`].
pub type Result<T> = std::result::Result<T, TreeError>;

/// Loads a command tree, choosing the format by file extension.
///
/// Files ending in `.yaml` or `.yml` are parsed as YAML; everything else is
/// parsed as JSON.
///
/// # Errors
///
/// Returns [`TreeError::IoError`] if the file cannot be read and a
/// format-specific variant if parsing fails.
pub fn load_tree(path: impl AsRef<Path>) -> Result<CommandDef> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)?;
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    if is_yaml {
        Ok(serde_yaml::from_str(&raw)?)
    } else {
        Ok(serde_json::from_str(&raw)?)
    }
}
