//! Mapping from service errors to HTTP responses.

use crate::board::services::BoardError;
use crate::feed::{ports::FeedRepositoryError, services::FeedServiceError};
use crate::project::{
    domain::ProjectDomainError, ports::ProjectRepositoryError, services::ProjectServiceError,
};
use crate::task::{domain::TaskDomainError, ports::TaskRepositoryError, services::TaskServiceError};
use crate::user::{ports::UserRepositoryError, services::UserServiceError};
use crate::workflow::{
    domain::WorkflowDomainError, ports::WorkflowRepositoryError, services::WorkflowServiceError,
};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Result type for request handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Error response carrying a status code, a message and the offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    field: Option<&'static str>,
}

/// JSON body of an error response.
#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
}

impl ApiError {
    /// A 400 response, optionally naming the request field at fault.
    #[must_use]
    pub fn bad_request(message: impl Into<String>, field: Option<&'static str>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            field,
        }
    }

    /// A 404 response.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::plain(StatusCode::NOT_FOUND, message)
    }

    /// A 409 response.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::plain(StatusCode::CONFLICT, message)
    }

    /// A 500 response. The detailed error is logged, not returned.
    #[must_use]
    pub fn internal(err: &dyn std::error::Error) -> Self {
        tracing::error!(error = %err, "request failed");
        Self::plain(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
    }

    /// Returns the response status.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the response message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the request field at fault, if any.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        self.field
    }

    fn plain(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            field: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            message: &self.message,
            field: self.field,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<WorkflowDomainError> for ApiError {
    fn from(err: WorkflowDomainError) -> Self {
        let field = match err {
            WorkflowDomainError::EmptyWorkflowName
            | WorkflowDomainError::WorkflowNameTooLong(_) => "name",
            _ => "steps",
        };
        Self::bad_request(err.to_string(), Some(field))
    }
}

impl From<ProjectDomainError> for ApiError {
    fn from(err: ProjectDomainError) -> Self {
        match err {
            ProjectDomainError::EmptyProjectName | ProjectDomainError::ProjectNameTooLong(_) => {
                Self::bad_request(err.to_string(), Some("name"))
            }
        }
    }
}

impl From<TaskDomainError> for ApiError {
    fn from(err: TaskDomainError) -> Self {
        let field = match err {
            TaskDomainError::EmptyTitle | TaskDomainError::TitleTooLong(_) => "title",
            TaskDomainError::EmptyTag => "tags",
        };
        Self::bad_request(err.to_string(), Some(field))
    }
}

impl From<WorkflowRepositoryError> for ApiError {
    fn from(err: WorkflowRepositoryError) -> Self {
        match err {
            WorkflowRepositoryError::DuplicateWorkflow(_) | WorkflowRepositoryError::InUse(_) => {
                Self::conflict(err.to_string())
            }
            WorkflowRepositoryError::NotFound(_) => Self::not_found(err.to_string()),
            WorkflowRepositoryError::Persistence(_) => Self::internal(&err),
        }
    }
}

impl From<ProjectRepositoryError> for ApiError {
    fn from(err: ProjectRepositoryError) -> Self {
        match err {
            ProjectRepositoryError::DuplicateProject(_) => Self::conflict(err.to_string()),
            ProjectRepositoryError::NotFound(_) => Self::not_found(err.to_string()),
            ProjectRepositoryError::Persistence(_) => Self::internal(&err),
        }
    }
}

impl From<TaskRepositoryError> for ApiError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::DuplicateTask(_) => Self::conflict(err.to_string()),
            TaskRepositoryError::NotFound(_) => Self::not_found(err.to_string()),
            TaskRepositoryError::Persistence(_) => Self::internal(&err),
        }
    }
}

impl From<WorkflowServiceError> for ApiError {
    fn from(err: WorkflowServiceError) -> Self {
        match err {
            WorkflowServiceError::Domain(inner) => inner.into(),
            WorkflowServiceError::NotFound(_) => Self::not_found(err.to_string()),
            WorkflowServiceError::WorkflowInUse(_) => Self::conflict(err.to_string()),
            WorkflowServiceError::Repository(inner) => inner.into(),
            WorkflowServiceError::Projects(inner) => inner.into(),
        }
    }
}

impl From<ProjectServiceError> for ApiError {
    fn from(err: ProjectServiceError) -> Self {
        match err {
            ProjectServiceError::Domain(inner) => inner.into(),
            ProjectServiceError::NotFound(_) | ProjectServiceError::WorkflowNotFound(_) => {
                Self::not_found(err.to_string())
            }
            ProjectServiceError::Repository(inner) => inner.into(),
            ProjectServiceError::Workflows(inner) => inner.into(),
        }
    }
}

impl From<BoardError> for ApiError {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::ProjectNotFound(_)
            | BoardError::WorkflowNotFound(_)
            | BoardError::TaskNotFound(_) => Self::not_found(err.to_string()),
            BoardError::InvalidStage { .. } => Self::bad_request(err.to_string(), Some("stage")),
            BoardError::Stage(inner) => Self::bad_request(inner.to_string(), Some("stage")),
            BoardError::Project(inner) => inner.into(),
            BoardError::Workflow(inner) => inner.into(),
            BoardError::Task(inner) => inner.into(),
        }
    }
}

impl From<TaskServiceError> for ApiError {
    fn from(err: TaskServiceError) -> Self {
        match err {
            TaskServiceError::Domain(inner) => inner.into(),
            TaskServiceError::Stage(inner) => Self::bad_request(inner.to_string(), Some("status")),
            TaskServiceError::Board(BoardError::InvalidStage { .. }) => {
                Self::bad_request(err.to_string(), Some("status"))
            }
            TaskServiceError::Board(inner) => inner.into(),
            TaskServiceError::Repository(inner) => inner.into(),
            TaskServiceError::NotFound(_) => Self::not_found(err.to_string()),
        }
    }
}

impl From<UserRepositoryError> for ApiError {
    fn from(err: UserRepositoryError) -> Self {
        match err {
            UserRepositoryError::DuplicateUser(_) | UserRepositoryError::DuplicateEmail(_) => {
                Self::conflict(err.to_string())
            }
            UserRepositoryError::Persistence(_) => Self::internal(&err),
        }
    }
}

impl From<UserServiceError> for ApiError {
    fn from(err: UserServiceError) -> Self {
        match err {
            UserServiceError::NotFound(_) | UserServiceError::NoUsers => {
                Self::not_found(err.to_string())
            }
            UserServiceError::Repository(inner) => inner.into(),
        }
    }
}

impl From<FeedRepositoryError> for ApiError {
    fn from(err: FeedRepositoryError) -> Self {
        match err {
            FeedRepositoryError::DuplicateComment(_)
            | FeedRepositoryError::DuplicateActivity(_) => Self::conflict(err.to_string()),
            FeedRepositoryError::Persistence(_) => Self::internal(&err),
        }
    }
}

impl From<FeedServiceError> for ApiError {
    fn from(err: FeedServiceError) -> Self {
        match err {
            FeedServiceError::Repository(inner) => inner.into(),
        }
    }
}
