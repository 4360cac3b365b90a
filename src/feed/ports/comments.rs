//! Repository port for task comments.

use super::FeedRepositoryResult;
use crate::feed::domain::Comment;
use crate::task::domain::TaskId;
use async_trait::async_trait;

/// Comment persistence contract.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Appends a comment.
    ///
    /// # Errors
    ///
    /// Returns [`super::FeedRepositoryError::DuplicateComment`] when the ID
    /// already exists.
    async fn store(&self, comment: &Comment) -> FeedRepositoryResult<()>;

    /// Returns the comments on `task_id`, oldest first. An unknown task has
    /// no comments.
    async fn list_by_task(&self, task_id: TaskId) -> FeedRepositoryResult<Vec<Comment>>;
}
