//! Repository-specific error types.

use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Error, Debug)]
pub enum RepoError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Storage operation failed: {0}")]
    Storage(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

impl RepoError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        RepoError::NotFound {
            kind,
            id: id.into(),
        }
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepoError>;
