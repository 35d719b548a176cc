//! Common Error Types
//!
//! Errors raised at the fallible seams (key-value backends and document
//! serialization). The dashboard swallows most of them; callers at the
//! binary boundary may report them.

/// Storage and serialization errors
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}

/// Result type for fallible storage operations
pub type Result<T> = std::result::Result<T, StorageError>;
