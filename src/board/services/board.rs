//! Server-side board loading and stage transitions.

use super::{BoardError, BoardResult, StageGuard};
use crate::board::domain::{Board, derive_columns};
use crate::board::ports::{MoveGatewayError, TaskMoveGateway};
use crate::project::domain::{Project, ProjectId};
use crate::project::ports::ProjectRepository;
use crate::task::domain::{Task, TaskId};
use crate::task::ports::TaskRepository;
use crate::workflow::domain::{StageList, StageName};
use crate::workflow::ports::WorkflowRepository;
use async_trait::async_trait;
use mockable::Clock;
use std::sync::Arc;

/// Request payload for moving a task to another stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveTaskRequest {
    task_id: TaskId,
    stage: String,
}

impl MoveTaskRequest {
    /// Creates a move request.
    #[must_use]
    pub fn new(task_id: TaskId, stage: impl Into<String>) -> Self {
        Self {
            task_id,
            stage: stage.into(),
        }
    }
}

/// A project's board: its stages and the derived columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectBoard {
    project: Project,
    stages: StageList,
    board: Board,
}

impl ProjectBoard {
    /// Returns the project.
    #[must_use]
    pub const fn project(&self) -> &Project {
        &self.project
    }

    /// Returns the board stages in column order.
    #[must_use]
    pub const fn stages(&self) -> &StageList {
        &self.stages
    }

    /// Returns the derived columns and orphaned tasks.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Consumes the value, returning its parts.
    #[must_use]
    pub fn into_parts(self) -> (Project, StageList, Board) {
        (self.project, self.stages, self.board)
    }
}

/// Board orchestration service.
pub struct BoardService<P, W, T, C>
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

impl<P, W, T, C> Clone for BoardService<P, W, T, C>
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

impl<P, W, T, C> BoardService<P, W, T, C>
where
    P: ProjectRepository,
    W: WorkflowRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new board service.
    #[must_use]
    pub const fn new(guard: StageGuard<P, W>, tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            guard,
            tasks,
            clock,
        }
    }

    /// Returns the stages shown on a project's board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::ProjectNotFound`] or
    /// [`BoardError::WorkflowNotFound`] when lookup fails.
    pub async fn available_stages(&self, project_id: ProjectId) -> BoardResult<StageList> {
        let resolved = self.guard.resolve(project_id).await?;
        Ok(resolved.stages(self.guard.default_stages()).clone())
    }

    /// Loads a project's board.
    ///
    /// Orphaned tasks are reported in the returned board and logged.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError`] when the project, its workflow or its tasks
    /// cannot be loaded.
    pub async fn load_board(&self, project_id: ProjectId) -> BoardResult<ProjectBoard> {
        let resolved = self.guard.resolve(project_id).await?;
        let stages = resolved.stages(self.guard.default_stages()).clone();
        let tasks = self.tasks.list_by_project(project_id).await?;
        let board = derive_columns(&stages, tasks);

        if !board.orphaned().is_empty() {
            tracing::warn!(
                project_id = %project_id,
                orphaned = board.orphaned().len(),
                "tasks with a status outside the board's stages"
            );
        }

        Ok(ProjectBoard {
            project: resolved.into_project(),
            stages,
            board,
        })
    }

    /// Moves a task into another stage of its project's board.
    ///
    /// Only the status changes. Moving a task into the stage it already
    /// occupies returns it unchanged without writing.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TaskNotFound`] for an unknown task,
    /// [`BoardError::InvalidStage`] when the stage is not on the board, or a
    /// repository error when persistence fails.
    pub async fn move_task(&self, request: MoveTaskRequest) -> BoardResult<Task> {
        let MoveTaskRequest { task_id, stage } = request;
        let target = StageName::new(stage)?;

        let mut task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(BoardError::TaskNotFound(task_id))?;
        let resolved = self.guard.resolve(task.project_id()).await?;
        self.guard.ensure_stage(&resolved, &target)?;

        let from = task.status().clone();
        if !task.move_to(target, &*self.clock) {
            tracing::debug!(task_id = %task_id, stage = %from, "task already in stage");
            return Ok(task);
        }

        self.tasks.update(&task).await?;
        tracing::info!(
            task_id = %task_id,
            from = %from,
            to = %task.status(),
            "task moved"
        );
        Ok(task)
    }
}

#[async_trait]
impl<P, W, T, C> TaskMoveGateway for BoardService<P, W, T, C>
where
    P: ProjectRepository,
    W: WorkflowRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    async fn persist_move(
        &self,
        task_id: TaskId,
        stage: &StageName,
    ) -> Result<Task, MoveGatewayError> {
        self.move_task(MoveTaskRequest::new(task_id, stage.as_str()))
            .await
            .map_err(|err| match err {
                BoardError::Project(_) | BoardError::Workflow(_) | BoardError::Task(_) => {
                    MoveGatewayError::Unavailable(err.to_string())
                }
                _ => MoveGatewayError::Rejected(err.to_string()),
            })
    }
}
