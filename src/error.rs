//! Error types for the strm mounter.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the strm mounter.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("OpenRouter API key not configured. Set OPENROUTER_API_KEY environment variable")]
    OpenRouterApiKeyMissing,

    #[error("Invalid config file {path}: {source}")]
    InvalidConfig {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    // Download source errors
    #[error("Invalid downloads input: {0}")]
    InvalidDownloads(String),

    // Naming errors
    #[error("Completion returned no choices")]
    EmptyCompletion,

    #[error("JSON object not found in response")]
    JsonNotFound,

    // File system errors
    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }
}
