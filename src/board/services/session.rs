//! Client-side board state with optimistic moves.
//!
//! A [`BoardSession`] owns a local copy of a project's tasks. A move is
//! applied to that copy first ([`BoardSession::begin_move`]) so the card
//! shows in its new column immediately, then resolved once persistence
//! answers:
//!
//! ```text
//! Pending ──commit──▶ Committed
//!    │
//!    └──roll_back──▶ RolledBack
//! ```
//!
//! Every optimistic move bumps a per-task revision. A response for a move
//! that is no longer its task's latest revision is superseded and ignored,
//! so out-of-order responses cannot overwrite a newer local move.
//!
//! The session also keeps the last record the store confirmed for each
//! task. A failed move restores that record rather than the stage the card
//! left, which may itself have been an unconfirmed optimistic move.

use super::ProjectBoard;
use crate::board::domain::{Board, derive_columns};
use crate::board::ports::TaskMoveGateway;
use crate::project::domain::ProjectId;
use crate::task::domain::{Task, TaskId};
use crate::workflow::domain::{StageList, StageName};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// An optimistic move awaiting its persistence outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a pending move must be committed or rolled back"]
pub struct PendingMove {
    task_id: TaskId,
    from: StageName,
    to: StageName,
    revision: u64,
}

impl PendingMove {
    /// Returns the moved task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the stage the task left.
    #[must_use]
    pub const fn origin(&self) -> &StageName {
        &self.from
    }

    /// Returns the stage the task was moved into.
    #[must_use]
    pub const fn target(&self) -> &StageName {
        &self.to
    }
}

/// Record of a move that failed to persist and was reverted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveFailure {
    task_id: TaskId,
    attempted: StageName,
    restored: StageName,
    reason: String,
}

impl MoveFailure {
    /// Returns the task whose move failed.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the stage the move tried to reach.
    #[must_use]
    pub const fn attempted(&self) -> &StageName {
        &self.attempted
    }

    /// Returns the stage the task was restored to.
    #[must_use]
    pub const fn restored(&self) -> &StageName {
        &self.restored
    }

    /// Returns the persistence error message.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for MoveFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "move of task {} to '{}' failed: {}",
            self.task_id, self.attempted, self.reason
        )
    }
}

/// Terminal state of a pending move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move persisted; the stored task replaced the local copy.
    Committed(Task),
    /// The move failed; the local copy was reverted.
    RolledBack(MoveFailure),
    /// A newer move of the same task was started; this result was ignored.
    Superseded,
}

/// Errors returned by [`BoardSession`] operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardSessionError {
    /// The task is not on this board.
    #[error("task not on board: {0}")]
    UnknownTask(TaskId),

    /// The stage is not a column on this board.
    #[error("stage '{0}' is not on this board")]
    InvalidStage(StageName),

    /// Persistence failed and the move was reverted.
    #[error("{0}")]
    MoveFailed(MoveFailure),

    /// A newer move of the task overtook this one.
    #[error("move of task {0} was superseded by a newer move")]
    Superseded(TaskId),
}

/// Local, optimistically updated copy of one project's board.
#[derive(Debug, Clone)]
pub struct BoardSession {
    project_id: ProjectId,
    stages: StageList,
    tasks: Vec<Task>,
    revisions: HashMap<TaskId, u64>,
    in_flight: HashMap<TaskId, usize>,
    confirmed: HashMap<TaskId, Confirmed>,
    failures: Vec<MoveFailure>,
}

/// Latest stored record of a task and the move revision that produced it.
#[derive(Debug, Clone)]
struct Confirmed {
    revision: u64,
    task: Task,
}

impl BoardSession {
    /// Creates a session over `tasks` shown with `stages`.
    #[must_use]
    pub fn new(project_id: ProjectId, stages: StageList, tasks: Vec<Task>) -> Self {
        let confirmed = tasks
            .iter()
            .map(|task| {
                let record = Confirmed {
                    revision: 0,
                    task: task.clone(),
                };
                (task.id(), record)
            })
            .collect();
        Self {
            project_id,
            stages,
            tasks,
            revisions: HashMap::new(),
            in_flight: HashMap::new(),
            confirmed,
            failures: Vec::new(),
        }
    }

    /// Creates a session from a freshly loaded board, orphans included.
    #[must_use]
    pub fn from_board(loaded: ProjectBoard) -> Self {
        let (project, stages, board) = loaded.into_parts();
        let (columns, orphaned) = board.into_parts();
        let tasks = columns
            .into_iter()
            .flat_map(|column| column.tasks().to_vec())
            .chain(orphaned)
            .collect();
        Self::new(project.id(), stages, tasks)
    }

    /// Returns the project this board belongs to.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the board stages.
    #[must_use]
    pub const fn stages(&self) -> &StageList {
        &self.stages
    }

    /// Returns the local task list, including optimistic changes.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the local copy of a task.
    #[must_use]
    pub fn task(&self, task_id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == task_id)
    }

    /// Derives the current columns from the local task list.
    #[must_use]
    pub fn columns(&self) -> Board {
        derive_columns(&self.stages, self.tasks.iter().cloned())
    }

    /// Returns `true` while any move of `task_id` awaits persistence.
    #[must_use]
    pub fn is_pending(&self, task_id: TaskId) -> bool {
        self.in_flight.get(&task_id).is_some_and(|count| *count > 0)
    }

    /// Returns reverted moves not yet acknowledged by the caller.
    #[must_use]
    pub fn failures(&self) -> &[MoveFailure] {
        &self.failures
    }

    /// Drops the recorded failures, returning them.
    pub fn take_failures(&mut self) -> Vec<MoveFailure> {
        std::mem::take(&mut self.failures)
    }

    /// Applies a move to the local copy before it is persisted.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError::InvalidStage`] when `stage` is not a
    /// column, or [`BoardSessionError::UnknownTask`] when the task is not on
    /// this board. Nothing changes on error.
    pub fn begin_move(
        &mut self,
        task_id: TaskId,
        stage: &StageName,
    ) -> Result<PendingMove, BoardSessionError> {
        if !self.stages.contains(stage.as_str()) {
            return Err(BoardSessionError::InvalidStage(stage.clone()));
        }
        let task = self
            .tasks
            .iter_mut()
            .find(|task| task.id() == task_id)
            .ok_or(BoardSessionError::UnknownTask(task_id))?;

        let from = task.status().clone();
        task.restore_status(stage.clone());

        let revision = self.revisions.entry(task_id).or_default();
        *revision += 1;
        *self.in_flight.entry(task_id).or_default() += 1;

        Ok(PendingMove {
            task_id,
            from,
            to: stage.clone(),
            revision: *revision,
        })
    }

    /// Resolves a pending move with the task record the store returned.
    ///
    /// A superseded result still updates the confirmed record. When every
    /// move of the task has settled by then, the local copy is reset to it,
    /// since a newer failed move will have restored an older record.
    pub fn commit(&mut self, pending: PendingMove, persisted: Task) -> MoveOutcome {
        self.settle(pending.task_id);
        self.confirm(pending.revision, &persisted);
        if !self.is_latest(&pending) {
            tracing::debug!(task_id = %pending.task_id, "ignoring superseded move result");
            if !self.is_pending(pending.task_id) {
                self.restore_confirmed(pending.task_id);
            }
            return MoveOutcome::Superseded;
        }

        if let Some(local) = self.task_mut(pending.task_id) {
            *local = persisted.clone();
        }
        MoveOutcome::Committed(persisted)
    }

    /// Resolves a pending move that failed to persist, reverting it.
    ///
    /// The task returns to its last confirmed record, not to the stage the
    /// move left.
    pub fn roll_back(&mut self, pending: PendingMove, reason: impl Into<String>) -> MoveOutcome {
        self.settle(pending.task_id);
        if !self.is_latest(&pending) {
            tracing::debug!(task_id = %pending.task_id, "ignoring superseded move failure");
            return MoveOutcome::Superseded;
        }

        let PendingMove {
            task_id, from, to, ..
        } = pending;
        let restored = match self.restore_confirmed(task_id) {
            Some(status) => status,
            None => {
                if let Some(local) = self.task_mut(task_id) {
                    local.restore_status(from.clone());
                }
                from
            }
        };

        let failure = MoveFailure {
            task_id,
            attempted: to,
            restored,
            reason: reason.into(),
        };
        tracing::warn!(
            task_id = %task_id,
            attempted = %failure.attempted,
            restored = %failure.restored,
            reason = %failure.reason,
            "board move rolled back"
        );
        self.failures.push(failure.clone());
        MoveOutcome::RolledBack(failure)
    }

    /// Moves a task optimistically and persists the move through `gateway`.
    ///
    /// The local copy changes before `gateway` is called. When persistence
    /// fails the change is reverted and the failure is both returned and
    /// kept in [`BoardSession::failures`].
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError`] when the move is invalid locally or the
    /// gateway fails.
    pub async fn move_task<G>(
        &mut self,
        gateway: &G,
        task_id: TaskId,
        stage: &StageName,
    ) -> Result<Task, BoardSessionError>
    where
        G: TaskMoveGateway + ?Sized,
    {
        let pending = self.begin_move(task_id, stage)?;
        let outcome = match gateway.persist_move(task_id, stage).await {
            Ok(persisted) => self.commit(pending, persisted),
            Err(err) => self.roll_back(pending, err.to_string()),
        };

        match outcome {
            MoveOutcome::Committed(task) => Ok(task),
            MoveOutcome::RolledBack(failure) => Err(BoardSessionError::MoveFailed(failure)),
            MoveOutcome::Superseded => Err(BoardSessionError::Superseded(task_id)),
        }
    }

    fn is_latest(&self, pending: &PendingMove) -> bool {
        self.revisions.get(&pending.task_id).copied() == Some(pending.revision)
    }

    fn settle(&mut self, task_id: TaskId) {
        if let Some(count) = self.in_flight.get_mut(&task_id) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.in_flight.remove(&task_id);
            }
        }
    }

    fn confirm(&mut self, revision: u64, persisted: &Task) {
        let newer = self
            .confirmed
            .get(&persisted.id())
            .is_none_or(|current| revision >= current.revision);
        if newer {
            let record = Confirmed {
                revision,
                task: persisted.clone(),
            };
            self.confirmed.insert(persisted.id(), record);
        }
    }

    /// Resets the local copy to the confirmed record, returning its stage.
    fn restore_confirmed(&mut self, task_id: TaskId) -> Option<StageName> {
        let record = self.confirmed.get(&task_id)?.task.clone();
        let status = record.status().clone();
        let local = self.task_mut(task_id)?;
        *local = record;
        Some(status)
    }

    fn task_mut(&mut self, task_id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id() == task_id)
    }
}
