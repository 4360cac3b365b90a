//! Domain model for workflow definitions.
//!
//! Stage lists are validated on construction so every [`Workflow`] holds a
//! non-empty, duplicate-free, ordered set of stage names.

mod error;
mod ids;
mod stage;
mod workflow;

pub use error::WorkflowDomainError;
pub use ids::WorkflowId;
pub use stage::{StageList, StageName};
pub use workflow::{PersistedWorkflowData, Workflow};
