//! Error types for request handling

use std::path::PathBuf;

/// Why a request body could not be used
#[derive(Debug, thiserror::Error)]
pub enum BodyError {
    #[error("request body is missing")]
    Missing,

    #[error("request body is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("request body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why a static asset could not be served
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("asset path escapes the asset root: {0}")]
    Traversal(String),

    #[error("asset not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read asset {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
