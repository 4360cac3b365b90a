//! Application services for the task board.

mod board;
mod error;
mod guard;
mod session;

pub use board::{BoardService, MoveTaskRequest, ProjectBoard};
pub use error::{BoardError, BoardResult};
pub use guard::{ResolvedProject, StageGuard};
pub use session::{BoardSession, BoardSessionError, MoveFailure, MoveOutcome, PendingMove};
