//! Domain model for board tasks.
//!
//! The task domain keeps validation of titles, tags and priorities inside
//! the aggregate; checking a status against a project's stages is the board's
//! job.

mod error;
mod ids;
mod priority;
mod tags;
mod task;

pub use error::{ParseTaskPriorityError, TaskDomainError};
pub use crate::user::domain::UserId;
pub use ids::TaskId;
pub use priority::TaskPriority;
pub use tags::TaskTags;
pub use task::{PersistedTaskData, Task, TaskPatch};
