//! Error types for user validation.

use thiserror::Error;

/// Errors returned while constructing users.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserDomainError {
    /// The display name is empty after trimming.
    #[error("user name must not be empty")]
    EmptyName,

    /// The display name exceeds the 255-character storage limit.
    #[error("user name exceeds 255 character limit ({0} characters)")]
    NameTooLong(usize),

    /// The email address has no local part or no domain.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// The role is empty after trimming.
    #[error("user role must not be empty")]
    EmptyRole,
}
