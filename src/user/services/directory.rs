//! Lookup of users and of the acting user.

use crate::user::{
    domain::{User, UserId},
    ports::{UserRepository, UserRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for user lookups.
#[derive(Debug, Error)]
pub enum UserServiceError {
    /// No user has the requested identifier.
    #[error("user not found: {0}")]
    NotFound(UserId),
    /// No user is configured as current and the directory is empty.
    #[error("no users are registered")]
    NoUsers,
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
}

/// Result type for user service operations.
pub type UserServiceResult<T> = Result<T, UserServiceError>;

/// Read-only view over the user repository.
///
/// Requests are not authenticated, so the "current" user is a configured
/// identifier, or the first registered user when none is configured.
pub struct UserDirectory<U: UserRepository> {
    users: Arc<U>,
    current: Option<UserId>,
}

impl<U: UserRepository> Clone for UserDirectory<U> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            current: self.current,
        }
    }
}

impl<U: UserRepository> UserDirectory<U> {
    /// Creates a directory acting as `current`, if given.
    #[must_use]
    pub const fn new(users: Arc<U>, current: Option<UserId>) -> Self {
        Self { users, current }
    }

    /// Lists every user in registration order.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::Repository`] when the lookup fails.
    pub async fn list(&self) -> UserServiceResult<Vec<User>> {
        Ok(self.users.list_all().await?)
    }

    /// Finds a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::NotFound`] when no user has `id`.
    pub async fn find_by_id(&self, id: UserId) -> UserServiceResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(UserServiceError::NotFound(id))
    }

    /// Returns the acting user.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::NotFound`] when the configured user does
    /// not exist, or [`UserServiceError::NoUsers`] when nothing is
    /// configured and no user is registered.
    pub async fn current(&self) -> UserServiceResult<User> {
        if let Some(id) = self.current {
            return self.find_by_id(id).await;
        }
        self.users
            .list_all()
            .await?
            .into_iter()
            .next()
            .ok_or(UserServiceError::NoUsers)
    }
}
