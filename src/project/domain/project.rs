//! Project aggregate root.

use super::{ProjectDomainError, ProjectId, ProjectStatus, WorkspaceId};
use crate::workflow::domain::WorkflowId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Maximum name length, matching the `VARCHAR(255)` name column.
const MAX_NAME_LENGTH: usize = 255;

/// Project aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    workspace_id: WorkspaceId,
    name: String,
    description: Option<String>,
    workflow_id: Option<WorkflowId>,
    status: ProjectStatus,
    due_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Persisted project identifier.
    pub id: ProjectId,
    /// Persisted owning workspace.
    pub workspace_id: WorkspaceId,
    /// Persisted display name.
    pub name: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted workflow binding, if any.
    pub workflow_id: Option<WorkflowId>,
    /// Persisted lifecycle status.
    pub status: ProjectStatus,
    /// Persisted due date, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Creates a new active project with no workflow bound.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyProjectName`] when the name is
    /// blank, or [`ProjectDomainError::ProjectNameTooLong`] when it exceeds
    /// 255 characters.
    pub fn new(
        workspace_id: WorkspaceId,
        name: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, ProjectDomainError> {
        let raw_name = name.into();
        let trimmed = raw_name.trim();
        if trimmed.is_empty() {
            return Err(ProjectDomainError::EmptyProjectName);
        }
        let length = trimmed.chars().count();
        if length > MAX_NAME_LENGTH {
            return Err(ProjectDomainError::ProjectNameTooLong(length));
        }

        let timestamp = clock.utc();
        Ok(Self {
            id: ProjectId::new(),
            workspace_id,
            name: trimmed.to_owned(),
            description: None,
            workflow_id: None,
            status: ProjectStatus::Active,
            due_date: None,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Sets the description. Blank descriptions are dropped.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let text = description.into();
        self.description = (!text.trim().is_empty()).then_some(text);
        self
    }

    /// Binds the project to a workflow at construction time.
    #[must_use]
    pub const fn with_workflow(mut self, workflow_id: WorkflowId) -> Self {
        self.workflow_id = Some(workflow_id);
        self
    }

    /// Sets the lifecycle status at construction time.
    #[must_use]
    pub const fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            workspace_id: data.workspace_id,
            name: data.name,
            description: data.description,
            workflow_id: data.workflow_id,
            status: data.status,
            due_date: data.due_date,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the owning workspace.
    #[must_use]
    pub const fn workspace_id(&self) -> WorkspaceId {
        self.workspace_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the bound workflow, if any.
    #[must_use]
    pub const fn workflow_id(&self) -> Option<WorkflowId> {
        self.workflow_id
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ProjectStatus {
        self.status
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

    /// Replaces the workflow binding. `None` reverts to the default stages.
    ///
    /// Existing tasks keep their status; any status the new stage list lacks
    /// becomes orphaned on the board.
    pub fn assign_workflow(&mut self, workflow_id: Option<WorkflowId>, clock: &impl Clock) {
        self.workflow_id = workflow_id;
        self.updated_at = clock.utc();
    }
}
