//! Layered configuration for the task board server.
//!
//! Values resolve with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attributes)
//! 3. TOML config file (`<config dir>/taskboard/config.toml`)
//! 4. Compiled defaults

use crate::user::domain::UserId;
use crate::workflow::domain::{StageList, WorkflowDomainError};
use std::path::{Path, PathBuf};
use uuid::Uuid;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 8;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Errors that can occur when loading board configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),

    /// The configured default stage list is invalid.
    #[error("invalid [board] default_stages: {0}")]
    DefaultStages(#[from] WorkflowDomainError),
}

/// Top-level TOML config file structure. Every field is optional.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct BoardConfigFile {
    server: ServerFileConfig,
    database: DatabaseFileConfig,
    board: BoardFileConfig,
    users: UsersFileConfig,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ServerFileConfig {
    bind_addr: Option<String>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct DatabaseFileConfig {
    url: Option<String>,
    max_connections: Option<u32>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct BoardFileConfig {
    default_stages: Option<Vec<String>>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct UsersFileConfig {
    current_user: Option<Uuid>,
}

/// CLI arguments for the board server.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Workflow-driven task board server")]
pub struct BoardCliArgs {
    /// Address to bind the HTTP server to.
    #[arg(short, long, env = "TASKBOARD_ADDR")]
    pub bind: Option<String>,

    /// Path to config file (default: `<config dir>/taskboard/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// `PostgreSQL` connection URL. In-memory storage is used when unset.
    #[arg(long, env = "TASKBOARD_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum size of the database connection pool.
    #[arg(long)]
    pub max_connections: Option<u32>,

    /// User reported by `GET /api/me`. Defaults to the first registered user.
    #[arg(long, env = "TASKBOARD_CURRENT_USER")]
    pub current_user: Option<Uuid>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = DEFAULT_LOG_LEVEL, env = "TASKBOARD_LOG")]
    pub log_level: String,
}

/// Fully resolved server configuration.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// Address to bind the server to (e.g., `127.0.0.1:8080`).
    pub bind_addr: String,
    /// Database URL; `None` selects in-memory storage.
    pub database_url: Option<String>,
    /// Maximum size of the database connection pool.
    pub max_connections: u32,
    /// Stages shown for projects without a workflow.
    pub default_stages: StageList,
    /// User reported as the caller; `None` falls back to the first user.
    pub current_user: Option<UserId>,
    /// Log level filter string.
    pub log_level: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_owned(),
            database_url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            default_stages: StageList::default_board(),
            current_user: None,
            log_level: DEFAULT_LOG_LEVEL.to_owned(),
        }
    }
}

impl BoardConfig {
    /// Loads configuration by merging CLI args, env vars and a TOML file.
    ///
    /// An explicit `--config` path must exist. Without one, the default path
    /// is tried and a missing file counts as an empty config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config file cannot be read or parsed,
    /// or if its default stage list is invalid.
    pub fn load(cli: &BoardCliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Self::resolve(cli, file)
    }

    fn resolve(cli: &BoardCliArgs, file: BoardConfigFile) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let default_stages = match file.board.default_stages {
            Some(stages) => StageList::new(stages)?,
            None => defaults.default_stages,
        };

        Ok(Self {
            bind_addr: cli
                .bind
                .clone()
                .or(file.server.bind_addr)
                .unwrap_or(defaults.bind_addr),
            database_url: cli.database_url.clone().or(file.database.url),
            max_connections: cli
                .max_connections
                .or(file.database.max_connections)
                .unwrap_or(defaults.max_connections),
            default_stages,
            current_user: cli
                .current_user
                .or(file.users.current_user)
                .map(UserId::from_uuid),
            log_level: cli.log_level.clone(),
        })
    }
}

fn load_config_file(explicit_path: Option<&Path>) -> Result<BoardConfigFile, ConfigError> {
    if let Some(path) = explicit_path {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        return Ok(toml::from_str(&contents)?);
    }

    let Some(config_dir) = dirs::config_dir() else {
        return Ok(BoardConfigFile::default());
    };
    let path = config_dir.join("taskboard").join("config.toml");
    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BoardConfigFile::default()),
        Err(source) => Err(ConfigError::ReadFile { path, source }),
    }
}
