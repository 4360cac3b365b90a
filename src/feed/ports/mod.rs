//! Port contracts for comment and activity storage.

pub mod activities;
pub mod comments;
mod error;

pub use activities::ActivityRepository;
pub use comments::CommentRepository;
pub use error::{FeedRepositoryError, FeedRepositoryResult};
