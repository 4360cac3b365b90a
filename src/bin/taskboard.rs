//! Task board HTTP server.
//!
//! Usage:
//!
//! ```text
//! taskboard [--bind <addr>] [--config <path>] [--database-url <url>]
//! ```
//!
//! Without a database URL the board is kept in memory and lost on exit.
//! `TASKBOARD_ADDR`, `TASKBOARD_DATABASE_URL`, `TASKBOARD_CURRENT_USER` and
//! `TASKBOARD_LOG` may be used instead of the corresponding flags.

use clap::Parser;
use std::sync::Arc;
use taskboard::config::{BoardCliArgs, BoardConfig};
use taskboard::http::{self, AppState, Backend, Stores};
use taskboard::persistence::build_pool;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let cli = BoardCliArgs::parse();
    let config = BoardConfig::load(&cli)?;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let default_stages = config.default_stages.clone();
    let current_user = config.current_user;
    match config.database_url.as_deref() {
        Some(url) => {
            tracing::info!(max_connections = config.max_connections, "using PostgreSQL storage");
            let pool = build_pool(url, config.max_connections)?;
            let state = AppState::postgres(&pool, default_stages, current_user);
            serve(&config.bind_addr, state).await
        }
        None => {
            tracing::warn!("no database URL configured; using in-memory storage");
            let state = AppState::new(Stores::in_memory(), default_stages, current_user);
            serve(&config.bind_addr, state).await
        }
    }
}

async fn serve<B: Backend>(addr: &str, state: AppState<B>) -> Result<(), BoxError> {
    let (bound_addr, handle) = http::start_server(addr, Arc::new(state)).await?;
    tracing::info!(addr = %bound_addr, "task board listening");
    handle.await?;
    Ok(())
}
