//! `PostgreSQL` adapters for comments and the activity log.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresActivityRepository, PostgresCommentRepository};
