//! Service layer for creating, listing and deleting workflows.

use crate::project::ports::{ProjectRepository, ProjectRepositoryError};
use crate::workflow::{
    domain::{StageList, Workflow, WorkflowDomainError, WorkflowId},
    ports::{WorkflowRepository, WorkflowRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateWorkflowRequest {
    name: String,
    steps: Vec<String>,
    description: Option<String>,
}

impl CreateWorkflowRequest {
    /// Creates a request with the required name and ordered stage names.
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            steps: steps.into_iter().map(Into::into).collect(),
            description: None,
        }
    }

    /// Sets the workflow description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Service-level errors for workflow operations.
#[derive(Debug, Error)]
pub enum WorkflowServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] WorkflowDomainError),
    /// No workflow has the requested identifier.
    #[error("workflow not found: {0}")]
    NotFound(WorkflowId),
    /// The workflow is still bound to at least one project.
    #[error("workflow {0} is still referenced by a project")]
    WorkflowInUse(WorkflowId),
    /// Workflow repository operation failed.
    #[error(transparent)]
    Repository(#[from] WorkflowRepositoryError),
    /// Project repository lookup failed.
    #[error(transparent)]
    Projects(#[from] ProjectRepositoryError),
}

/// Result type for workflow service operations.
pub type WorkflowServiceResult<T> = Result<T, WorkflowServiceError>;

/// Workflow catalogue orchestration service.
pub struct WorkflowCatalogService<W, P, C>
where
    W: WorkflowRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    workflows: Arc<W>,
    projects: Arc<P>,
    clock: Arc<C>,
}

impl<W, P, C> Clone for WorkflowCatalogService<W, P, C>
where
    W: WorkflowRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            workflows: Arc::clone(&self.workflows),
            projects: Arc::clone(&self.projects),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<W, P, C> WorkflowCatalogService<W, P, C>
where
    W: WorkflowRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new workflow catalogue service.
    #[must_use]
    pub const fn new(workflows: Arc<W>, projects: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            workflows,
            projects,
            clock,
        }
    }

    /// Creates and stores a workflow.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError::Domain`] when the name or stages are
    /// invalid, or [`WorkflowServiceError::Repository`] when persistence
    /// fails.
    pub async fn create(&self, request: CreateWorkflowRequest) -> WorkflowServiceResult<Workflow> {
        let steps = StageList::new(request.steps)?;
        let mut workflow = Workflow::new(request.name, steps, &*self.clock)?;
        if let Some(description) = request.description {
            workflow = workflow.with_description(description);
        }

        self.workflows.store(&workflow).await?;
        tracing::info!(
            workflow_id = %workflow.id(),
            stages = workflow.steps().len(),
            "workflow created"
        );
        Ok(workflow)
    }

    /// Retrieves a workflow by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError::NotFound`] when no workflow matches.
    pub async fn find_by_id(&self, id: WorkflowId) -> WorkflowServiceResult<Workflow> {
        self.workflows
            .find_by_id(id)
            .await?
            .ok_or(WorkflowServiceError::NotFound(id))
    }

    /// Lists every workflow in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError::Repository`] when lookup fails.
    pub async fn list(&self) -> WorkflowServiceResult<Vec<Workflow>> {
        Ok(self.workflows.list_all().await?)
    }

    /// Deletes a workflow that no project references.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError::WorkflowInUse`] when a project is still
    /// bound to the workflow, including one bound after the check but before
    /// the delete reached the store, or [`WorkflowServiceError::NotFound`] when it
    /// does not exist.
    pub async fn delete(&self, id: WorkflowId) -> WorkflowServiceResult<()> {
        if self.projects.uses_workflow(id).await? {
            return Err(WorkflowServiceError::WorkflowInUse(id));
        }

        match self.workflows.delete(id).await {
            Ok(()) => {
                tracing::info!(workflow_id = %id, "workflow deleted");
                Ok(())
            }
            Err(WorkflowRepositoryError::NotFound(_)) => Err(WorkflowServiceError::NotFound(id)),
            Err(WorkflowRepositoryError::InUse(_)) => Err(WorkflowServiceError::WorkflowInUse(id)),
            Err(err) => Err(err.into()),
        }
    }
}
