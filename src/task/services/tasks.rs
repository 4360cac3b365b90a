//! Stage-guarded task service.

use crate::board::services::{BoardError, StageGuard};
use crate::project::{domain::ProjectId, ports::ProjectRepository};
use crate::task::{
    domain::{Task, TaskDomainError, TaskId, TaskPatch, TaskPriority, TaskTags, UserId},
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::workflow::{
    domain::{StageName, WorkflowDomainError},
    ports::WorkflowRepository,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    project_id: ProjectId,
    title: String,
    status: Option<String>,
    description: Option<String>,
    assignee_id: Option<UserId>,
    priority: Option<TaskPriority>,
    tags: Vec<String>,
    due_date: Option<DateTime<Utc>>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    ///
    /// Without [`CreateTaskRequest::with_status`] the task starts in the
    /// first stage of its project's board.
    #[must_use]
    pub fn new(project_id: ProjectId, title: impl Into<String>) -> Self {
        Self {
            project_id,
            title: title.into(),
            status: None,
            description: None,
            assignee_id: None,
            priority: None,
            tags: Vec::new(),
            due_date: None,
        }
    }

    /// Sets the initial stage.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
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
        self.priority = Some(priority);
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Task validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The requested stage name is malformed.
    #[error(transparent)]
    Stage(#[from] WorkflowDomainError),
    /// Project lookup or the stage check failed.
    #[error(transparent)]
    Board(#[from] BoardError),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// No task has the requested identifier.
    #[error("task not found: {0}")]
    NotFound(TaskId),
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task orchestration service.
///
/// Every write that sets a status first checks it against the owning
/// project's board.
pub struct TaskService<P, W, T, C>
where
    P: ProjectRepository,
    W: WorkflowRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    guard: StageGuard<P, W>,
    tasks: Arc<T>,
    clock: Arc<C>,
}

impl<P, W, T, C> Clone for TaskService<P, W, T, C>
where
    P: ProjectRepository,
    W: WorkflowRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            guard: self.guard.clone(),
            tasks: Arc::clone(&self.tasks),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<P, W, T, C> TaskService<P, W, T, C>
where
    P: ProjectRepository,
    W: WorkflowRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(guard: StageGuard<P, W>, tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            guard,
            tasks,
            clock,
        }
    }

    /// Creates and stores a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] for a blank title or tag,
    /// [`TaskServiceError::Board`] when the project is unknown or the status
    /// is not on its board, or a repository error when persistence fails.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskServiceResult<Task> {
        let CreateTaskRequest {
            project_id,
            title,
            status,
            description,
            assignee_id,
            priority,
            tags,
            due_date,
        } = request;

        let resolved = self.guard.resolve(project_id).await?;
        let status = match status {
            Some(raw) => StageName::new(raw)?,
            None => resolved.stages(self.guard.default_stages()).first().clone(),
        };
        self.guard.ensure_stage(&resolved, &status)?;

        let mut task = Task::new(project_id, title, status, &*self.clock)?
            .with_tags(TaskTags::new(tags)?);
        if let Some(text) = description {
            task = task.with_description(text);
        }
        if let Some(user) = assignee_id {
            task = task.with_assignee(user);
        }
        if let Some(value) = priority {
            task = task.with_priority(value);
        }
        if let Some(due) = due_date {
            task = task.with_due_date(due);
        }

        self.tasks.store(&task).await?;
        tracing::info!(
            task_id = %task.id(),
            project_id = %project_id,
            status = %task.status(),
            "task created"
        );
        Ok(task)
    }

    /// Applies a partial update to a task.
    ///
    /// A patch that changes the status is checked against the project's
    /// board; a patch that leaves it alone is accepted even for an orphaned
    /// task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] for an unknown task,
    /// [`TaskServiceError::Board`] when the new status is not on the board,
    /// or [`TaskServiceError::Domain`] when the patch is invalid.
    pub async fn update(&self, task_id: TaskId, patch: TaskPatch) -> TaskServiceResult<Task> {
        let mut task = self.find_by_id(task_id).await?;
        if patch.is_empty() {
            return Ok(task);
        }

        if let Some(status) = patch.status.as_ref().filter(|next| *next != task.status()) {
            let resolved = self.guard.resolve(task.project_id()).await?;
            self.guard.ensure_stage(&resolved, status)?;
        }

        task.apply(patch, &*self.clock)?;
        self.tasks.update(&task).await?;
        tracing::debug!(task_id = %task_id, "task updated");
        Ok(task)
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not exist.
    pub async fn delete(&self, task_id: TaskId) -> TaskServiceResult<()> {
        match self.tasks.delete(task_id).await {
            Ok(()) => {
                tracing::info!(task_id = %task_id, "task deleted");
                Ok(())
            }
            Err(TaskRepositoryError::NotFound(_)) => Err(TaskServiceError::NotFound(task_id)),
            Err(err) => Err(err.into()),
        }
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when no task matches.
    pub async fn find_by_id(&self, task_id: TaskId) -> TaskServiceResult<Task> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or(TaskServiceError::NotFound(task_id))
    }

    /// Lists tasks, optionally restricted to one project.
    ///
    /// A project with no tasks, known or not, yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when lookup fails.
    pub async fn list(&self, project_id: Option<ProjectId>) -> TaskServiceResult<Vec<Task>> {
        let tasks = match project_id {
            Some(id) => self.tasks.list_by_project(id).await?,
            None => self.tasks.list_all().await?,
        };
        Ok(tasks)
    }
}
