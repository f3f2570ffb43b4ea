//! Library error type and result alias.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the quill library.
#[derive(Error, Debug)]
pub enum QuillError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// API credential missing; raised before any network call.
    #[error("missing API key: set the {0} environment variable or add a key to the config")]
    MissingApiKey(String),

    #[error("no AI provider is available; configure an API key for Gemini or OpenAI")]
    NoProviderAvailable,

    #[error("{provider} API error ({status}): {message}")]
    Api {
        provider: &'static str,
        status: u16,
        message: String,
    },

    #[error("network error: {0}")]
    Network(String),

    #[error("empty response from {0}")]
    EmptyResponse(&'static str),

    /// A mode's required memory section is absent or empty.
    #[error("missing required section '{section}' in {file}")]
    MissingSection { section: String, file: PathBuf },

    #[error("project not found: {0} (run 'quill init' first)")]
    ProjectNotFound(PathBuf),

    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("file is empty: {0}")]
    EmptyFile(PathBuf),

    #[error("section '{0}' not found")]
    SectionNotFound(String),

    #[error("{0}")]
    Other(String),
}

/// Library result type.
pub type Result<T> = std::result::Result<T, QuillError>;
