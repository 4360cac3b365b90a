//! In-memory repository for task comments.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use super::poisoned;
use crate::feed::{
    domain::{Comment, CommentId},
    ports::{CommentRepository, FeedRepositoryError, FeedRepositoryResult},
};
use crate::task::domain::TaskId;

/// Thread-safe in-memory comment repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCommentRepository {
    state: Arc<RwLock<InMemoryCommentState>>,
}

#[derive(Debug, Default)]
struct InMemoryCommentState {
    ids: HashSet<CommentId>,
    by_task: HashMap<TaskId, Vec<Comment>>,
}

impl InMemoryCommentRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn store(&self, comment: &Comment) -> FeedRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if !state.ids.insert(comment.id()) {
            return Err(FeedRepositoryError::DuplicateComment(comment.id()));
        }
        state
            .by_task
            .entry(comment.task_id())
            .or_default()
            .push(comment.clone());
        Ok(())
    }

    async fn list_by_task(&self, task_id: TaskId) -> FeedRepositoryResult<Vec<Comment>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.by_task.get(&task_id).cloned().unwrap_or_default())
    }
}
