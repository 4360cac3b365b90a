//! JSON/HTTP transport for the task board.
//!
//! Routes map one-to-one onto service operations; request bodies are parsed
//! into typed DTOs in [`dto`] before any service is called, and service
//! errors are mapped to status codes in [`error`].
//!
//! Storage is selected through the [`Backend`] trait, which names the
//! repository and clock types the services are built from.

pub mod dto;
pub mod error;
mod routes;

use crate::board::services::{BoardService, StageGuard};
use crate::feed::{
    adapters::{
        memory::{InMemoryActivityRepository, InMemoryCommentRepository},
        postgres::{PostgresActivityRepository, PostgresCommentRepository},
    },
    ports::{ActivityRepository, CommentRepository},
    services::FeedService,
};
use crate::persistence::PgPool;
use crate::project::{
    adapters::{memory::InMemoryProjectRepository, postgres::PostgresProjectRepository},
    ports::ProjectRepository,
    services::ProjectService,
};
use crate::task::{
    adapters::{memory::InMemoryTaskRepository, postgres::PostgresTaskRepository},
    ports::TaskRepository,
    services::TaskService,
};
use crate::user::{
    adapters::{memory::InMemoryUserRepository, postgres::PostgresUserRepository},
    domain::UserId,
    ports::UserRepository,
    services::UserDirectory,
};
use crate::workflow::{
    adapters::{memory::InMemoryWorkflowRepository, postgres::PostgresWorkflowRepository},
    domain::StageList,
    ports::WorkflowRepository,
    services::WorkflowCatalogService,
};
use mockable::{Clock, DefaultClock};
use std::net::SocketAddr;
use std::sync::Arc;

pub use routes::router;

/// Repository and clock types backing an [`AppState`].
pub trait Backend: Send + Sync + 'static {
    /// Workflow repository implementation.
    type Workflows: WorkflowRepository + 'static;
    /// Project repository implementation.
    type Projects: ProjectRepository + 'static;
    /// Task repository implementation.
    type Tasks: TaskRepository + 'static;
    /// User repository implementation.
    type Users: UserRepository + 'static;
    /// Comment repository implementation.
    type Comments: CommentRepository + 'static;
    /// Activity log implementation.
    type Activities: ActivityRepository + 'static;
    /// Time source.
    type Clock: Clock + Send + Sync + 'static;
}

/// Process-local storage; state is lost on restart.
#[derive(Debug, Clone, Copy)]
pub struct InMemoryBackend;

impl Backend for InMemoryBackend {
    type Workflows = InMemoryWorkflowRepository;
    type Projects = InMemoryProjectRepository;
    type Tasks = InMemoryTaskRepository;
    type Users = InMemoryUserRepository;
    type Comments = InMemoryCommentRepository;
    type Activities = InMemoryActivityRepository;
    type Clock = DefaultClock;
}

/// `PostgreSQL` storage through a shared connection pool.
#[derive(Debug, Clone, Copy)]
pub struct PostgresBackend;

impl Backend for PostgresBackend {
    type Workflows = PostgresWorkflowRepository;
    type Projects = PostgresProjectRepository;
    type Tasks = PostgresTaskRepository;
    type Users = PostgresUserRepository;
    type Comments = PostgresCommentRepository;
    type Activities = PostgresActivityRepository;
    type Clock = DefaultClock;
}

/// Repositories and clock an [`AppState`] is built from.
pub struct Stores<B: Backend> {
    /// Workflow definitions.
    pub workflows: Arc<B::Workflows>,
    /// Projects.
    pub projects: Arc<B::Projects>,
    /// Tasks.
    pub tasks: Arc<B::Tasks>,
    /// Users.
    pub users: Arc<B::Users>,
    /// Task comments.
    pub comments: Arc<B::Comments>,
    /// Activity log.
    pub activities: Arc<B::Activities>,
    /// Time source.
    pub clock: Arc<B::Clock>,
}

impl Stores<InMemoryBackend> {
    /// Creates empty in-memory repositories.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            workflows: Arc::new(InMemoryWorkflowRepository::new()),
            projects: Arc::new(InMemoryProjectRepository::new()),
            tasks: Arc::new(InMemoryTaskRepository::new()),
            users: Arc::new(InMemoryUserRepository::new()),
            comments: Arc::new(InMemoryCommentRepository::new()),
            activities: Arc::new(InMemoryActivityRepository::new()),
            clock: Arc::new(DefaultClock),
        }
    }
}

impl Stores<PostgresBackend> {
    /// Creates `PostgreSQL` repositories sharing `pool`.
    #[must_use]
    pub fn postgres(pool: &PgPool) -> Self {
        Self {
            workflows: Arc::new(PostgresWorkflowRepository::new(pool.clone())),
            projects: Arc::new(PostgresProjectRepository::new(pool.clone())),
            tasks: Arc::new(PostgresTaskRepository::new(pool.clone())),
            users: Arc::new(PostgresUserRepository::new(pool.clone())),
            comments: Arc::new(PostgresCommentRepository::new(pool.clone())),
            activities: Arc::new(PostgresActivityRepository::new(pool.clone())),
            clock: Arc::new(DefaultClock),
        }
    }
}

/// Services shared by every request handler.
pub struct AppState<B: Backend> {
    workflows: WorkflowCatalogService<B::Workflows, B::Projects, B::Clock>,
    projects: ProjectService<B::Projects, B::Workflows, B::Clock>,
    tasks: TaskService<B::Projects, B::Workflows, B::Tasks, B::Clock>,
    board: BoardService<B::Projects, B::Workflows, B::Tasks, B::Clock>,
    users: UserDirectory<B::Users>,
    feed: FeedService<B::Comments, B::Activities>,
}

impl<B: Backend> AppState<B> {
    /// Wires the services over `stores`.
    ///
    /// `default_stages` is the board used by projects without a workflow.
    /// `current_user` is reported by `GET /api/me`; when `None` the first
    /// registered user is used.
    #[must_use]
    pub fn new(
        stores: Stores<B>,
        default_stages: StageList,
        current_user: Option<UserId>,
    ) -> Self {
        let Stores {
            workflows,
            projects,
            tasks,
            users,
            comments,
            activities,
            clock,
        } = stores;
        let guard = StageGuard::new(
            Arc::clone(&projects),
            Arc::clone(&workflows),
            Arc::new(default_stages),
        );
        Self {
            workflows: WorkflowCatalogService::new(
                Arc::clone(&workflows),
                Arc::clone(&projects),
                Arc::clone(&clock),
            ),
            projects: ProjectService::new(projects, workflows, Arc::clone(&clock)),
            tasks: TaskService::new(guard.clone(), Arc::clone(&tasks), Arc::clone(&clock)),
            board: BoardService::new(guard, tasks, clock),
            users: UserDirectory::new(users, current_user),
            feed: FeedService::new(comments, activities),
        }
    }

    /// Returns the workflow catalogue service.
    #[must_use]
    pub const fn workflows(&self) -> &WorkflowCatalogService<B::Workflows, B::Projects, B::Clock> {
        &self.workflows
    }

    /// Returns the project service.
    #[must_use]
    pub const fn projects(&self) -> &ProjectService<B::Projects, B::Workflows, B::Clock> {
        &self.projects
    }

    /// Returns the task service.
    #[must_use]
    pub const fn tasks(&self) -> &TaskService<B::Projects, B::Workflows, B::Tasks, B::Clock> {
        &self.tasks
    }

    /// Returns the board service.
    #[must_use]
    pub const fn board(&self) -> &BoardService<B::Projects, B::Workflows, B::Tasks, B::Clock> {
        &self.board
    }

    /// Returns the user directory.
    #[must_use]
    pub const fn users(&self) -> &UserDirectory<B::Users> {
        &self.users
    }

    /// Returns the comment and activity feed service.
    #[must_use]
    pub const fn feed(&self) -> &FeedService<B::Comments, B::Activities> {
        &self.feed
    }
}

impl AppState<InMemoryBackend> {
    /// Creates state over empty in-memory repositories.
    #[must_use]
    pub fn in_memory(default_stages: StageList) -> Self {
        Self::new(Stores::in_memory(), default_stages, None)
    }
}

impl AppState<PostgresBackend> {
    /// Creates state over `PostgreSQL` repositories sharing `pool`.
    #[must_use]
    pub fn postgres(
        pool: &PgPool,
        default_stages: StageList,
        current_user: Option<UserId>,
    ) -> Self {
        Self::new(Stores::postgres(pool), default_stages, current_user)
    }
}

/// Binds `addr` and serves the board API in a background task.
///
/// Returns the bound address (useful with port `0`) and the server task.
///
/// # Errors
///
/// Returns an I/O error when the address cannot be bound.
pub async fn start_server<B: Backend>(
    addr: &str,
    state: Arc<AppState<B>>,
) -> std::io::Result<(SocketAddr, tokio::task::JoinHandle<()>)> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, app).await {
            tracing::error!(error = %err, "board server error");
        }
    });
    Ok((bound_addr, handle))
}
