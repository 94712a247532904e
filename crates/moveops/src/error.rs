use thiserror::Error;

use crate::lifecycle::TransitionError;
use crate::repo::RepoError;
use crate::vision::VisionError;

/// Top-level error for the moving-operations core.
///
/// Everything propagates upward; this crate never swallows or retries.
/// Retry policy belongs to the collaborator that owns the failing call.
#[derive(Error, Debug)]
pub enum MoveOpsError {
    #[error("Transition error: {0}")]
    Transition(#[from] TransitionError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),

    #[error("Vision error: {0}")]
    Vision(#[from] VisionError),
}

/// Malformed or disallowed caller input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Worker '{id}' is inactive and cannot be assigned")]
    InactiveWorker { id: String },
}

pub type Result<T> = std::result::Result<T, MoveOpsError>;
