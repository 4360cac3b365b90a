//! Read access to task comments and the activity log.

use crate::feed::{
    domain::{Activity, Comment},
    ports::{ActivityRepository, CommentRepository, FeedRepositoryError},
};
use crate::task::domain::TaskId;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for feed reads.
#[derive(Debug, Error)]
pub enum FeedServiceError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] FeedRepositoryError),
}

/// Result type for feed service operations.
pub type FeedServiceResult<T> = Result<T, FeedServiceError>;

/// Read-only service over comments and activity entries.
pub struct FeedService<M, A>
where
    M: CommentRepository,
    A: ActivityRepository,
{
    comments: Arc<M>,
    activities: Arc<A>,
}

impl<M, A> Clone for FeedService<M, A>
where
    M: CommentRepository,
    A: ActivityRepository,
{
    fn clone(&self) -> Self {
        Self {
            comments: Arc::clone(&self.comments),
            activities: Arc::clone(&self.activities),
        }
    }
}

impl<M, A> FeedService<M, A>
where
    M: CommentRepository,
    A: ActivityRepository,
{
    /// Creates a new feed service.
    #[must_use]
    pub const fn new(comments: Arc<M>, activities: Arc<A>) -> Self {
        Self {
            comments,
            activities,
        }
    }

    /// Lists the comments on a task, oldest first.
    ///
    /// The task is not looked up: an unknown task yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`FeedServiceError::Repository`] when the lookup fails.
    pub async fn comments_for_task(&self, task_id: TaskId) -> FeedServiceResult<Vec<Comment>> {
        Ok(self.comments.list_by_task(task_id).await?)
    }

    /// Lists the activity log in recording order.
    ///
    /// # Errors
    ///
    /// Returns [`FeedServiceError::Repository`] when the lookup fails.
    pub async fn activities(&self) -> FeedServiceResult<Vec<Activity>> {
        Ok(self.activities.list_all().await?)
    }
}
