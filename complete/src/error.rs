//! Error types for completion script generation.

use thiserror::Error;

/// Errors that can occur while generating a completion script.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// The shell identifier is not one of `bash`, `pwsh`, or `powershell`.
    #[error("unsupported shell: {0} (expected bash, pwsh, or powershell)")]
    UnsupportedShell(String),

    /// A tunable in [`CompletionConfig`](crate::CompletionConfig) is out of range.
    #[error("invalid completion config: {0}")]
    InvalidConfig(String),

    /// File or stdout I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Convenience alias for results with [`CompletionError`].
pub type Result<T> = std::result::Result<T, CompletionError>;
