//! Workflow aggregate root.

use super::{StageList, WorkflowDomainError, WorkflowId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Maximum name length, matching the `VARCHAR(255)` name column.
const MAX_NAME_LENGTH: usize = 255;

/// Named, ordered list of stages that defines the columns of a board.
///
/// The stage ordering is fixed at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workflow {
    id: WorkflowId,
    name: String,
    description: Option<String>,
    steps: StageList,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedWorkflowData {
    /// Persisted workflow identifier.
    pub id: WorkflowId,
    /// Persisted display name.
    pub name: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted ordered stages.
    pub steps: StageList,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Workflow {
    /// Creates a new workflow definition.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDomainError::EmptyWorkflowName`] when the name is
    /// blank, or [`WorkflowDomainError::WorkflowNameTooLong`] when it exceeds
    /// 255 characters.
    pub fn new(
        name: impl Into<String>,
        steps: StageList,
        clock: &impl Clock,
    ) -> Result<Self, WorkflowDomainError> {
        let raw_name = name.into();
        let trimmed = raw_name.trim();
        if trimmed.is_empty() {
            return Err(WorkflowDomainError::EmptyWorkflowName);
        }
        let length = trimmed.chars().count();
        if length > MAX_NAME_LENGTH {
            return Err(WorkflowDomainError::WorkflowNameTooLong(length));
        }

        let timestamp = clock.utc();
        Ok(Self {
            id: WorkflowId::new(),
            name: trimmed.to_owned(),
            description: None,
            steps,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Sets the free-form description. Blank descriptions are dropped.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let text = description.into();
        self.description = (!text.trim().is_empty()).then_some(text);
        self
    }

    /// Reconstructs a workflow from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedWorkflowData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            steps: data.steps,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the workflow identifier.
    #[must_use]
    pub const fn id(&self) -> WorkflowId {
        self.id
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

    /// Returns the ordered stages.
    #[must_use]
    pub const fn steps(&self) -> &StageList {
        &self.steps
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
}
