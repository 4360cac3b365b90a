//! Shared `PostgreSQL` plumbing for the Diesel repository adapters.
//!
//! Diesel connections are synchronous, so every query runs on the blocking
//! thread pool via [`run_blocking`].

use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use thiserror::Error;

/// `PostgreSQL` connection pool shared by all repository adapters.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Failures raised while moving a query onto the blocking pool.
#[derive(Debug, Error)]
pub enum BlockingError {
    /// No connection could be checked out of the pool.
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),

    /// The blocking task panicked or was cancelled.
    #[error("blocking task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Builds a connection pool for `database_url`.
///
/// # Errors
///
/// Returns [`PoolError`] when the initial connections cannot be opened.
pub fn build_pool(database_url: &str, max_connections: u32) -> Result<PgPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder().max_size(max_connections).build(manager)
}

/// Runs `f` with a pooled connection on the blocking thread pool.
///
/// `map_err` converts pool and join failures into the caller's repository
/// error type.
pub(crate) async fn run_blocking<F, T, E, M>(pool: &PgPool, map_err: M, f: F) -> Result<T, E>
where
    F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
    M: Fn(BlockingError) -> E + Clone + Send + 'static,
{
    let pool = pool.clone();
    let map_pool_err = map_err.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = pool
            .get()
            .map_err(|err| map_pool_err(BlockingError::Pool(err)))?;
        f(&mut connection)
    })
    .await
    .map_err(|err| map_err(BlockingError::Join(err)))?
}
