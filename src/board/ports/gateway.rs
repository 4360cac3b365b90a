//! Persistence port behind optimistic board moves.

use crate::task::domain::{Task, TaskId};
use crate::workflow::domain::StageName;
use async_trait::async_trait;
use thiserror::Error;

/// Durable side of a board move.
///
/// A [`crate::board::services::BoardSession`] calls this after it has
/// already moved the card locally. Implementations either persist the move
/// and return the stored task, or fail so the session can revert.
#[async_trait]
pub trait TaskMoveGateway: Send + Sync {
    /// Persists `task_id`'s move into `stage`.
    ///
    /// # Errors
    ///
    /// Returns [`MoveGatewayError`] when the move was rejected or could not
    /// be delivered.
    async fn persist_move(&self, task_id: TaskId, stage: &StageName)
    -> Result<Task, MoveGatewayError>;
}

/// Failure reported by a [`TaskMoveGateway`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MoveGatewayError {
    /// The store refused the move (unknown task, stage not on the board).
    #[error("move rejected: {0}")]
    Rejected(String),

    /// The store could not be reached or failed internally.
    #[error("move could not be persisted: {0}")]
    Unavailable(String),
}
