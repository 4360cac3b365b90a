//! In-memory activity log.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use super::poisoned;
use crate::feed::{
    domain::{Activity, ActivityId},
    ports::{ActivityRepository, FeedRepositoryError, FeedRepositoryResult},
};

/// Thread-safe in-memory activity repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryActivityRepository {
    state: Arc<RwLock<InMemoryActivityState>>,
}

#[derive(Debug, Default)]
struct InMemoryActivityState {
    ids: HashSet<ActivityId>,
    entries: Vec<Activity>,
}

impl InMemoryActivityRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ActivityRepository for InMemoryActivityRepository {
    async fn store(&self, activity: &Activity) -> FeedRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if !state.ids.insert(activity.id()) {
            return Err(FeedRepositoryError::DuplicateActivity(activity.id()));
        }
        state.entries.push(activity.clone());
        Ok(())
    }

    async fn list_all(&self) -> FeedRepositoryResult<Vec<Activity>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.entries.clone())
    }
}
