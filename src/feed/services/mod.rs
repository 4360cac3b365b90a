//! Read services for comments and activity entries.

mod feed;

pub use feed::{FeedService, FeedServiceError, FeedServiceResult};
