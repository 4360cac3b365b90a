//! Error types for feed record validation.

use thiserror::Error;

/// Errors returned while constructing comments and activity entries.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FeedDomainError {
    /// The comment body is empty after trimming.
    #[error("comment content must not be empty")]
    EmptyContent,

    /// The activity action is empty after trimming.
    #[error("activity action must not be empty")]
    EmptyAction,
}

/// Error returned while parsing an activity's entity kind.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown entity kind: {0}")]
pub struct ParseEntityKindError(pub String);
