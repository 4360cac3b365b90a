//! Service-level errors for board operations.

use crate::project::domain::ProjectId;
use crate::project::ports::ProjectRepositoryError;
use crate::task::domain::TaskId;
use crate::task::ports::TaskRepositoryError;
use crate::workflow::domain::{WorkflowDomainError, WorkflowId};
use crate::workflow::ports::WorkflowRepositoryError;
use thiserror::Error;

/// Errors returned by board services.
#[derive(Debug, Error)]
pub enum BoardError {
    /// The project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// The project is bound to a workflow that does not exist.
    #[error("workflow not found: {0}")]
    WorkflowNotFound(WorkflowId),

    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The stage is not a column on the project's board.
    #[error("stage '{stage}' is not on the board of project {project_id}")]
    InvalidStage {
        /// Project whose board was checked.
        project_id: ProjectId,
        /// Rejected stage name.
        stage: String,
    },

    /// The stage name failed validation.
    #[error(transparent)]
    Stage(#[from] WorkflowDomainError),

    /// Project lookup failed.
    #[error(transparent)]
    Project(#[from] ProjectRepositoryError),

    /// Workflow lookup failed.
    #[error(transparent)]
    Workflow(#[from] WorkflowRepositoryError),

    /// Task persistence failed.
    #[error(transparent)]
    Task(#[from] TaskRepositoryError),
}

/// Result type for board service operations.
pub type BoardResult<T> = Result<T, BoardError>;
