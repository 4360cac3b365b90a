//! Stage compatibility guard shared by board and task services.

use super::{BoardError, BoardResult};
use crate::board::domain::{is_valid_stage_for_project, resolve_stages};
use crate::project::domain::{Project, ProjectId};
use crate::project::ports::ProjectRepository;
use crate::workflow::domain::{StageList, StageName, Workflow};
use crate::workflow::ports::WorkflowRepository;
use std::sync::Arc;

/// A project together with its bound workflow, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProject {
    project: Project,
    workflow: Option<Workflow>,
}

impl ResolvedProject {
    /// Returns the project.
    #[must_use]
    pub const fn project(&self) -> &Project {
        &self.project
    }

    /// Returns the bound workflow, if any.
    #[must_use]
    pub const fn workflow(&self) -> Option<&Workflow> {
        self.workflow.as_ref()
    }

    /// Returns the board stages, falling back to `fallback` when unbound.
    #[must_use]
    pub fn stages<'a>(&'a self, fallback: &'a StageList) -> &'a StageList {
        resolve_stages(&self.project, self.workflow.as_ref(), fallback)
    }

    /// Consumes the value, returning the project.
    #[must_use]
    pub fn into_project(self) -> Project {
        self.project
    }
}

/// Resolves projects to their stage lists and rejects stages a board lacks.
pub struct StageGuard<P, W>
where
    P: ProjectRepository,
    W: WorkflowRepository,
{
    projects: Arc<P>,
    workflows: Arc<W>,
    default_stages: Arc<StageList>,
}

impl<P, W> Clone for StageGuard<P, W>
where
    P: ProjectRepository,
    W: WorkflowRepository,
{
    fn clone(&self) -> Self {
        Self {
            projects: Arc::clone(&self.projects),
            workflows: Arc::clone(&self.workflows),
            default_stages: Arc::clone(&self.default_stages),
        }
    }
}

impl<P, W> StageGuard<P, W>
where
    P: ProjectRepository,
    W: WorkflowRepository,
{
    /// Creates a guard that falls back to `default_stages` for unbound
    /// projects.
    #[must_use]
    pub const fn new(projects: Arc<P>, workflows: Arc<W>, default_stages: Arc<StageList>) -> Self {
        Self {
            projects,
            workflows,
            default_stages,
        }
    }

    /// Returns the stage list used for projects without a workflow.
    #[must_use]
    pub fn default_stages(&self) -> &StageList {
        &self.default_stages
    }

    /// Loads a project and its bound workflow.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::ProjectNotFound`] or
    /// [`BoardError::WorkflowNotFound`] when either record is missing, or a
    /// repository error when lookup fails.
    pub async fn resolve(&self, project_id: ProjectId) -> BoardResult<ResolvedProject> {
        let project = self
            .projects
            .find_by_id(project_id)
            .await?
            .ok_or(BoardError::ProjectNotFound(project_id))?;

        let workflow = match project.workflow_id() {
            Some(workflow_id) => Some(
                self.workflows
                    .find_by_id(workflow_id)
                    .await?
                    .ok_or(BoardError::WorkflowNotFound(workflow_id))?,
            ),
            None => None,
        };

        Ok(ResolvedProject { project, workflow })
    }

    /// Fails unless `stage` is a column on `resolved`'s board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidStage`] when the stage is not listed.
    pub fn ensure_stage(&self, resolved: &ResolvedProject, stage: &StageName) -> BoardResult<()> {
        if is_valid_stage_for_project(
            &resolved.project,
            resolved.workflow.as_ref(),
            &self.default_stages,
            stage.as_str(),
        ) {
            return Ok(());
        }

        tracing::debug!(
            project_id = %resolved.project.id(),
            stage = %stage,
            "rejected stage outside the project's board"
        );
        Err(BoardError::InvalidStage {
            project_id: resolved.project.id(),
            stage: stage.to_string(),
        })
    }
}
