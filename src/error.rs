//! Error types for the dashboard rewriter

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, rewriting or writing a dashboard
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Reading the input dashboard failed
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the output dashboard failed
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input was not valid JSON, or output could not be serialized
    #[error("Invalid dashboard JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request failed (connection, timeout, body decoding)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Fetching {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// A key the rewrite depends on is absent
    #[error("Dashboard is missing expected key `{0}`")]
    MissingKey(String),

    /// A value has the wrong JSON type
    #[error("Expected {expected} at `{path}`")]
    UnexpectedType { path: String, expected: &'static str },

    /// Configuration file could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),

    /// Command line was used incorrectly
    #[error("{0}")]
    Usage(String),
}

/// Result type alias for dashboard operations
pub type Result<T> = std::result::Result<T, DashboardError>;

impl DashboardError {
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }
}
