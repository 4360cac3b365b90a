//! `PostgreSQL` adapters for user lookup.

mod models;
mod repository;
mod schema;

pub use repository::PostgresUserRepository;
