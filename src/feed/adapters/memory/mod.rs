//! In-memory feed adapters.

mod activity;
mod comment;

use crate::feed::ports::FeedRepositoryError;

pub use activity::InMemoryActivityRepository;
pub use comment::InMemoryCommentRepository;

fn poisoned(err: impl std::fmt::Display) -> FeedRepositoryError {
    FeedRepositoryError::persistence(std::io::Error::other(err.to_string()))
}
