//! Activity log entries.

use super::{ActivityId, FeedDomainError, ParseEntityKindError};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of record an activity entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A task.
    Task,
    /// A project.
    Project,
}

impl EntityKind {
    /// Returns the stored representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Project => "project",
        }
    }
}

impl TryFrom<&str> for EntityKind {
    type Error = ParseEntityKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "task" => Ok(Self::Task),
            "project" => Ok(Self::Project),
            _ => Err(ParseEntityKindError(value.to_owned())),
        }
    }
}

/// Something a user did to a task or project, e.g. `created` or `moved`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    id: ActivityId,
    entity_kind: EntityKind,
    entity_id: Uuid,
    user_id: UserId,
    action: String,
    details: Option<String>,
    created_at: DateTime<Utc>,
}

/// Data required to rebuild an activity entry from storage.
#[derive(Debug, Clone)]
pub struct PersistedActivityData {
    /// Identifier.
    pub id: ActivityId,
    /// Kind of the referenced record.
    pub entity_kind: EntityKind,
    /// Identifier of the referenced record.
    pub entity_id: Uuid,
    /// Acting user.
    pub user_id: UserId,
    /// Action verb.
    pub action: String,
    /// Free-form details.
    pub details: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Activity {
    /// Records `action` by `user_id` on the given entity.
    ///
    /// # Errors
    ///
    /// Returns [`FeedDomainError::EmptyAction`] when the action is blank.
    pub fn new(
        entity_kind: EntityKind,
        entity_id: Uuid,
        user_id: UserId,
        action: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, FeedDomainError> {
        let raw = action.into();
        let action = raw.trim();
        if action.is_empty() {
            return Err(FeedDomainError::EmptyAction);
        }
        Ok(Self {
            id: ActivityId::new(),
            entity_kind,
            entity_id,
            user_id,
            action: action.to_owned(),
            details: None,
            created_at: clock.utc(),
        })
    }

    /// Attaches details. Blank details are dropped.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        let text = details.into();
        self.details = (!text.trim().is_empty()).then_some(text);
        self
    }

    /// Rebuilds an activity entry from persisted data.
    #[must_use]
    pub fn from_persisted(data: PersistedActivityData) -> Self {
        Self {
            id: data.id,
            entity_kind: data.entity_kind,
            entity_id: data.entity_id,
            user_id: data.user_id,
            action: data.action,
            details: data.details,
            created_at: data.created_at,
        }
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> ActivityId {
        self.id
    }

    /// Returns the kind of the referenced record.
    #[must_use]
    pub const fn entity_kind(&self) -> EntityKind {
        self.entity_kind
    }

    /// Returns the identifier of the referenced record.
    #[must_use]
    pub const fn entity_id(&self) -> Uuid {
        self.entity_id
    }

    /// Returns the acting user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the action verb.
    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Returns the details, if any.
    #[must_use]
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
