//! Comment records attached to a task.

use super::{CommentId, FeedDomainError};
use crate::task::domain::TaskId;
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;

/// A remark left on a task by a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    id: CommentId,
    task_id: TaskId,
    user_id: UserId,
    content: String,
    created_at: DateTime<Utc>,
}

/// Data required to rebuild a comment from storage.
#[derive(Debug, Clone)]
pub struct PersistedCommentData {
    /// Identifier.
    pub id: CommentId,
    /// Commented task.
    pub task_id: TaskId,
    /// Author.
    pub user_id: UserId,
    /// Body text.
    pub content: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Creates a comment stamped with the clock's current time.
    ///
    /// # Errors
    ///
    /// Returns [`FeedDomainError::EmptyContent`] when the body is blank.
    pub fn new(
        task_id: TaskId,
        user_id: UserId,
        content: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, FeedDomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(FeedDomainError::EmptyContent);
        }
        Ok(Self {
            id: CommentId::new(),
            task_id,
            user_id,
            content,
            created_at: clock.utc(),
        })
    }

    /// Rebuilds a comment from persisted data.
    #[must_use]
    pub fn from_persisted(data: PersistedCommentData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            user_id: data.user_id,
            content: data.content,
            created_at: data.created_at,
        }
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> CommentId {
        self.id
    }

    /// Returns the commented task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the author.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the body text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
