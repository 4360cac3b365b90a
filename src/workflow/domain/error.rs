//! Error types for workflow domain validation.

use thiserror::Error;

/// Errors returned while constructing workflow domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkflowDomainError {
    /// The workflow name is empty after trimming.
    #[error("workflow name must not be empty")]
    EmptyWorkflowName,

    /// The workflow name exceeds the 255-character storage limit.
    #[error("workflow name exceeds 255 character limit ({0} characters)")]
    WorkflowNameTooLong(usize),

    /// A stage name is empty after trimming.
    #[error("stage name must not be empty")]
    EmptyStageName,

    /// A stage name exceeds the 100-character storage limit.
    #[error("stage name exceeds 100 character limit: {0}")]
    StageNameTooLong(String),

    /// The stage list contains no stages.
    #[error("workflow must define at least one stage")]
    EmptyStageList,

    /// The same stage name appears more than once.
    #[error("duplicate stage name: {0}")]
    DuplicateStage(String),
}
