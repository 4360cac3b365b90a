//! Domain model for comments and activity entries.

mod activity;
mod comment;
mod error;
mod ids;

pub use activity::{Activity, EntityKind, PersistedActivityData};
pub use comment::{Comment, PersistedCommentData};
pub use error::{FeedDomainError, ParseEntityKindError};
pub use ids::{ActivityId, CommentId};
