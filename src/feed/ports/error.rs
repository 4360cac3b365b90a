//! Errors shared by the feed repositories.

use crate::feed::domain::{ActivityId, CommentId};
use std::sync::Arc;
use thiserror::Error;

/// Result type for feed repository operations.
pub type FeedRepositoryResult<T> = Result<T, FeedRepositoryError>;

/// Errors returned by comment and activity repositories.
#[derive(Debug, Clone, Error)]
pub enum FeedRepositoryError {
    /// A comment with the same identifier already exists.
    #[error("duplicate comment identifier: {0}")]
    DuplicateComment(CommentId),

    /// An activity entry with the same identifier already exists.
    #[error("duplicate activity identifier: {0}")]
    DuplicateActivity(ActivityId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl FeedRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
