//! Repository port for the activity log.

use super::FeedRepositoryResult;
use crate::feed::domain::Activity;
use async_trait::async_trait;

/// Activity log persistence contract.
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// Appends an activity entry.
    ///
    /// # Errors
    ///
    /// Returns [`super::FeedRepositoryError::DuplicateActivity`] when the ID
    /// already exists.
    async fn store(&self, activity: &Activity) -> FeedRepositoryResult<()>;

    /// Returns every entry in the order it was recorded.
    async fn list_all(&self) -> FeedRepositoryResult<Vec<Activity>>;
}
