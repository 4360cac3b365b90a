//! Service layer for project creation and workflow binding.

use crate::project::{
    domain::{Project, ProjectDomainError, ProjectId, ProjectStatus, WorkspaceId},
    ports::{ProjectRepository, ProjectRepositoryError},
};
use crate::workflow::{
    domain::WorkflowId,
    ports::{WorkflowRepository, WorkflowRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    workspace_id: WorkspaceId,
    name: String,
    description: Option<String>,
    workflow_id: Option<WorkflowId>,
    status: Option<ProjectStatus>,
    due_date: Option<DateTime<Utc>>,
}

impl CreateProjectRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(workspace_id: WorkspaceId, name: impl Into<String>) -> Self {
        Self {
            workspace_id,
            name: name.into(),
            description: None,
            workflow_id: None,
            status: None,
            due_date: None,
        }
    }

    /// Sets the project description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Binds the project to a workflow on creation.
    #[must_use]
    pub const fn with_workflow(mut self, workflow_id: WorkflowId) -> Self {
        self.workflow_id = Some(workflow_id);
        self
    }

    /// Sets the initial lifecycle status.
    #[must_use]
    pub const fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// Service-level errors for project operations.
#[derive(Debug, Error)]
pub enum ProjectServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),
    /// No project has the requested identifier.
    #[error("project not found: {0}")]
    NotFound(ProjectId),
    /// The referenced workflow does not exist.
    #[error("workflow not found: {0}")]
    WorkflowNotFound(WorkflowId),
    /// Project repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProjectRepositoryError),
    /// Workflow repository lookup failed.
    #[error(transparent)]
    Workflows(#[from] WorkflowRepositoryError),
}

/// Result type for project service operations.
pub type ProjectServiceResult<T> = Result<T, ProjectServiceError>;

/// Project orchestration service.
pub struct ProjectService<P, W, C>
where
    P: ProjectRepository,
    W: WorkflowRepository,
    C: Clock + Send + Sync,
{
    projects: Arc<P>,
    workflows: Arc<W>,
    clock: Arc<C>,
}

impl<P, W, C> Clone for ProjectService<P, W, C>
where
    P: ProjectRepository,
    W: WorkflowRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            projects: Arc::clone(&self.projects),
            workflows: Arc::clone(&self.workflows),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<P, W, C> ProjectService<P, W, C>
where
    P: ProjectRepository,
    W: WorkflowRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new project service.
    #[must_use]
    pub const fn new(projects: Arc<P>, workflows: Arc<W>, clock: Arc<C>) -> Self {
        Self {
            projects,
            workflows,
            clock,
        }
    }

    /// Creates and stores a project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Domain`] for a blank name,
    /// [`ProjectServiceError::WorkflowNotFound`] when the requested workflow
    /// does not exist, or a repository error when persistence fails.
    pub async fn create(&self, request: CreateProjectRequest) -> ProjectServiceResult<Project> {
        let CreateProjectRequest {
            workspace_id,
            name,
            description,
            workflow_id,
            status,
            due_date,
        } = request;

        let mut project = Project::new(workspace_id, name, &*self.clock)?;
        if let Some(workflow_id) = workflow_id {
            self.ensure_workflow(workflow_id).await?;
            project = project.with_workflow(workflow_id);
        }
        if let Some(text) = description {
            project = project.with_description(text);
        }
        if let Some(status) = status {
            project = project.with_status(status);
        }
        if let Some(due) = due_date {
            project = project.with_due_date(due);
        }

        self.projects.store(&project).await?;
        tracing::info!(project_id = %project.id(), "project created");
        Ok(project)
    }

    /// Retrieves a project by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::NotFound`] when no project matches.
    pub async fn find_by_id(&self, id: ProjectId) -> ProjectServiceResult<Project> {
        self.projects
            .find_by_id(id)
            .await?
            .ok_or(ProjectServiceError::NotFound(id))
    }

    /// Lists every project in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Repository`] when lookup fails.
    pub async fn list(&self) -> ProjectServiceResult<Vec<Project>> {
        Ok(self.projects.list_all().await?)
    }

    /// Binds a project to a workflow, or unbinds it with `None`.
    ///
    /// Existing task statuses are left untouched; tasks whose status the new
    /// stage list lacks become orphans on the board.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::NotFound`] or
    /// [`ProjectServiceError::WorkflowNotFound`] when either record is
    /// missing.
    pub async fn assign_workflow(
        &self,
        project_id: ProjectId,
        workflow_id: Option<WorkflowId>,
    ) -> ProjectServiceResult<Project> {
        let mut project = self.find_by_id(project_id).await?;
        if let Some(id) = workflow_id {
            self.ensure_workflow(id).await?;
        }

        project.assign_workflow(workflow_id, &*self.clock);
        self.projects.update(&project).await?;
        tracing::info!(
            project_id = %project_id,
            workflow_id = ?workflow_id.map(WorkflowId::into_inner),
            "project workflow assigned"
        );
        Ok(project)
    }

    async fn ensure_workflow(&self, workflow_id: WorkflowId) -> ProjectServiceResult<()> {
        self.workflows
            .find_by_id(workflow_id)
            .await?
            .map(|_| ())
            .ok_or(ProjectServiceError::WorkflowNotFound(workflow_id))
    }
}
