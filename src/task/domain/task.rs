//! Task aggregate root.

use super::{TaskDomainError, TaskId, TaskPriority, TaskTags, UserId};
use crate::project::domain::ProjectId;
use crate::workflow::domain::StageName;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Maximum title length, matching the `VARCHAR(255)` title column.
const MAX_TITLE_LENGTH: usize = 255;

/// Task aggregate root.
///
/// `status` names the board stage the task currently sits in. The aggregate
/// does not know its project's stage list; callers check membership before
/// constructing or moving a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    title: String,
    description: Option<String>,
    assignee_id: Option<UserId>,
    status: StageName,
    priority: TaskPriority,
    tags: TaskTags,
    due_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owning project.
    pub project_id: ProjectId,
    /// Persisted title.
    pub title: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted assignee, if any.
    pub assignee_id: Option<UserId>,
    /// Persisted stage.
    pub status: StageName,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted tags.
    pub tags: TaskTags,
    /// Persisted due date, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Partial update applied to a task.
///
/// `None` leaves a field untouched. Clearable fields use a nested `Option`
/// where `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement or cleared description.
    pub description: Option<Option<String>>,
    /// Replacement or cleared assignee.
    pub assignee_id: Option<Option<UserId>>,
    /// Replacement stage.
    pub status: Option<StageName>,
    /// Replacement priority.
    pub priority: Option<TaskPriority>,
    /// Replacement tag set.
    pub tags: Option<TaskTags>,
    /// Replacement or cleared due date.
    pub due_date: Option<Option<DateTime<Utc>>>,
}

impl TaskPatch {
    /// Returns `true` when the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.assignee_id.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.tags.is_none()
            && self.due_date.is_none()
    }
}

impl Task {
    /// Creates a new task in `status` with medium priority and no tags.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank, or
    /// [`TaskDomainError::TitleTooLong`] when it exceeds 255 characters.
    pub fn new(
        project_id: ProjectId,
        title: impl Into<String>,
        status: StageName,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let title = normalize_title(title.into())?;
        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            project_id,
            title,
            description: None,
            assignee_id: None,
            status,
            priority: TaskPriority::default(),
            tags: TaskTags::default(),
            due_date: None,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Sets the description. Blank descriptions are dropped.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = non_blank(description.into());
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee_id: UserId) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: TaskTags) -> Self {
        self.tags = tags;
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            title: data.title,
            description: data.description,
            assignee_id: data.assignee_id,
            status: data.status,
            priority: data.priority,
            tags: data.tags,
            due_date: data.due_date,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assignee_id(&self) -> Option<UserId> {
        self.assignee_id
    }

    /// Returns the current stage.
    #[must_use]
    pub const fn status(&self) -> &StageName {
        &self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the tags.
    #[must_use]
    pub const fn tags(&self) -> &TaskTags {
        &self.tags
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Moves the task to `stage`, changing nothing but the status.
    ///
    /// Returns `false` without touching the timestamp when the task already
    /// sits in `stage`.
    pub fn move_to(&mut self, stage: StageName, clock: &impl Clock) -> bool {
        if self.status == stage {
            return false;
        }
        self.status = stage;
        self.touch(clock);
        true
    }

    /// Overwrites the status without touching timestamps.
    ///
    /// Used to revert an optimistic move that failed to persist.
    pub(crate) fn restore_status(&mut self, stage: StageName) {
        self.status = stage;
    }

    /// Applies a partial update.
    ///
    /// The patch is validated before any field changes, so a rejected patch
    /// leaves the task untouched.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the patch carries a blank
    /// title.
    pub fn apply(&mut self, patch: TaskPatch, clock: &impl Clock) -> Result<(), TaskDomainError> {
        let TaskPatch {
            title,
            description,
            assignee_id,
            status,
            priority,
            tags,
            due_date,
        } = patch;
        let title = title.map(normalize_title).transpose()?;

        if let Some(value) = title {
            self.title = value;
        }
        if let Some(value) = description {
            self.description = value.and_then(non_blank);
        }
        if let Some(value) = assignee_id {
            self.assignee_id = value;
        }
        if let Some(value) = status {
            self.status = value;
        }
        if let Some(value) = priority {
            self.priority = value;
        }
        if let Some(value) = tags {
            self.tags = value;
        }
        if let Some(value) = due_date {
            self.due_date = value;
        }
        self.touch(clock);
        Ok(())
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn normalize_title(raw: String) -> Result<String, TaskDomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyTitle);
    }
    let length = trimmed.chars().count();
    if length > MAX_TITLE_LENGTH {
        return Err(TaskDomainError::TitleTooLong(length));
    }
    Ok(trimmed.to_owned())
}

fn non_blank(text: String) -> Option<String> {
    (!text.trim().is_empty()).then_some(text)
}
