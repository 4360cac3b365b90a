//! Request and response bodies for the HTTP API.
//!
//! Field names are camelCase on the wire. Request bodies are converted into
//! service requests here so handlers only ever see validated domain types.

use super::error::ApiError;
use crate::board::domain::BoardColumn;
use crate::board::services::ProjectBoard;
use crate::feed::domain::{Activity, ActivityId, Comment, CommentId};
use crate::project::domain::{Project, ProjectId, ProjectStatus, WorkspaceId};
use crate::project::services::CreateProjectRequest;
use crate::task::domain::{Task, TaskId, TaskPatch, TaskPriority, TaskTags, UserId};
use crate::task::services::CreateTaskRequest;
use crate::user::domain::User;
use crate::workflow::domain::{StageList, StageName, Workflow, WorkflowId};
use crate::workflow::services::CreateWorkflowRequest;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`).
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn parse_priority(raw: &str) -> Result<TaskPriority, ApiError> {
    TaskPriority::try_from(raw)
        .map_err(|err| ApiError::bad_request(err.to_string(), Some("priority")))
}

fn parse_status(raw: String) -> Result<StageName, ApiError> {
    StageName::new(raw).map_err(|err| ApiError::bad_request(err.to_string(), Some("status")))
}

// ---------------------------------------------------------------------------
// Workflows
// ---------------------------------------------------------------------------

/// Body of `POST /api/workflows`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkflowBody {
    /// Display name.
    pub name: String,
    /// Ordered stage names.
    pub steps: Vec<String>,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

impl From<CreateWorkflowBody> for CreateWorkflowRequest {
    fn from(body: CreateWorkflowBody) -> Self {
        let request = Self::new(body.name, body.steps);
        match body.description {
            Some(text) => request.with_description(text),
            None => request,
        }
    }
}

/// Workflow representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowResponse {
    /// Workflow identifier.
    pub id: WorkflowId,
    /// Display name.
    pub name: String,
    /// Description, if any.
    pub description: Option<String>,
    /// Ordered stage names.
    pub steps: Vec<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl From<Workflow> for WorkflowResponse {
    fn from(workflow: Workflow) -> Self {
        Self {
            id: workflow.id(),
            name: workflow.name().to_owned(),
            description: workflow.description().map(ToOwned::to_owned),
            steps: workflow.steps().to_strings(),
            created_at: workflow.created_at(),
            updated_at: workflow.updated_at(),
        }
    }
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

/// Body of `POST /api/projects`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectBody {
    /// Owning workspace.
    pub workspace_id: WorkspaceId,
    /// Display name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Optional workflow binding.
    #[serde(default)]
    pub workflow_id: Option<WorkflowId>,
    /// Optional lifecycle status (`active`, `on_hold`, `completed`,
    /// `archived`).
    #[serde(default)]
    pub status: Option<String>,
    /// Optional due date.
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

impl TryFrom<CreateProjectBody> for CreateProjectRequest {
    type Error = ApiError;

    fn try_from(body: CreateProjectBody) -> Result<Self, Self::Error> {
        let mut request = Self::new(body.workspace_id, body.name);
        if let Some(text) = body.description {
            request = request.with_description(text);
        }
        if let Some(workflow_id) = body.workflow_id {
            request = request.with_workflow(workflow_id);
        }
        if let Some(raw) = body.status {
            let status = ProjectStatus::try_from(raw.as_str())
                .map_err(|err| ApiError::bad_request(err.to_string(), Some("status")))?;
            request = request.with_status(status);
        }
        if let Some(due) = body.due_date {
            request = request.with_due_date(due);
        }
        Ok(request)
    }
}

/// Body of `PUT /api/projects/{id}/workflow`. A `null` workflow unbinds.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignWorkflowBody {
    /// Workflow to bind, or `null` for the default board.
    pub workflow_id: Option<WorkflowId>,
}

/// Project representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    /// Project identifier.
    pub id: ProjectId,
    /// Owning workspace.
    pub workspace_id: WorkspaceId,
    /// Display name.
    pub name: String,
    /// Description, if any.
    pub description: Option<String>,
    /// Bound workflow, if any.
    pub workflow_id: Option<WorkflowId>,
    /// Lifecycle status.
    pub status: ProjectStatus,
    /// Due date, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        Self {
            id: project.id(),
            workspace_id: project.workspace_id(),
            name: project.name().to_owned(),
            description: project.description().map(ToOwned::to_owned),
            workflow_id: project.workflow_id(),
            status: project.status(),
            due_date: project.due_date(),
            created_at: project.created_at(),
            updated_at: project.updated_at(),
        }
    }
}

/// Response of `GET /api/projects/{id}/stages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StagesResponse {
    /// Project the stages belong to.
    pub project_id: ProjectId,
    /// Stage names in board order.
    pub stages: Vec<String>,
}

impl StagesResponse {
    /// Builds the response for `project_id`.
    #[must_use]
    pub fn new(project_id: ProjectId, stages: &StageList) -> Self {
        Self {
            project_id,
            stages: stages.to_strings(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// Query string of `GET /api/tasks`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListQuery {
    /// Restricts the listing to one project.
    pub project_id: Option<ProjectId>,
}

/// Body of `POST /api/tasks`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskBody {
    /// Owning project.
    pub project_id: ProjectId,
    /// Title.
    pub title: String,
    /// Initial stage; the board's first stage when omitted.
    #[serde(default)]
    pub status: Option<String>,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Optional assignee.
    #[serde(default)]
    pub assignee_id: Option<UserId>,
    /// Optional priority (`low`, `medium`, `high`).
    #[serde(default)]
    pub priority: Option<String>,
    /// Tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Optional due date.
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

impl TryFrom<CreateTaskBody> for CreateTaskRequest {
    type Error = ApiError;

    fn try_from(body: CreateTaskBody) -> Result<Self, Self::Error> {
        let mut request = Self::new(body.project_id, body.title).with_tags(body.tags);
        if let Some(status) = body.status {
            request = request.with_status(status);
        }
        if let Some(text) = body.description {
            request = request.with_description(text);
        }
        if let Some(user) = body.assignee_id {
            request = request.with_assignee(user);
        }
        if let Some(raw) = body.priority {
            request = request.with_priority(parse_priority(&raw)?);
        }
        if let Some(due) = body.due_date {
            request = request.with_due_date(due);
        }
        Ok(request)
    }
}

/// Body of `PUT /api/tasks/{id}`.
///
/// Omitted fields stay unchanged; `null` clears `description`, `assigneeId`
/// and `dueDate`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskBody {
    /// Replacement title.
    #[serde(default)]
    pub title: Option<String>,
    /// Replacement or cleared description.
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    /// Replacement or cleared assignee.
    #[serde(default, deserialize_with = "nullable")]
    pub assignee_id: Option<Option<UserId>>,
    /// Replacement stage.
    #[serde(default)]
    pub status: Option<String>,
    /// Replacement priority.
    #[serde(default)]
    pub priority: Option<String>,
    /// Replacement tag set.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// Replacement or cleared due date.
    #[serde(default, deserialize_with = "nullable")]
    pub due_date: Option<Option<DateTime<Utc>>>,
}

impl TryFrom<UpdateTaskBody> for TaskPatch {
    type Error = ApiError;

    fn try_from(body: UpdateTaskBody) -> Result<Self, Self::Error> {
        Ok(Self {
            title: body.title,
            description: body.description,
            assignee_id: body.assignee_id,
            status: body.status.map(parse_status).transpose()?,
            priority: body.priority.as_deref().map(parse_priority).transpose()?,
            tags: body.tags.map(TaskTags::new).transpose()?,
            due_date: body.due_date,
        })
    }
}

/// Body of `POST /api/tasks/{id}/move`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveTaskBody {
    /// Target stage.
    pub stage: String,
}

/// Task representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    /// Task identifier.
    pub id: TaskId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Title.
    pub title: String,
    /// Description, if any.
    pub description: Option<String>,
    /// Assignee, if any.
    pub assignee_id: Option<UserId>,
    /// Current stage.
    pub status: String,
    /// Priority.
    pub priority: TaskPriority,
    /// Tags in sorted order.
    pub tags: Vec<String>,
    /// Due date, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id(),
            project_id: task.project_id(),
            title: task.title().to_owned(),
            description: task.description().map(ToOwned::to_owned),
            assignee_id: task.assignee_id(),
            status: task.status().to_string(),
            priority: task.priority(),
            tags: task.tags().iter().map(ToOwned::to_owned).collect(),
            due_date: task.due_date(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self::from(&task)
    }
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// One board column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnResponse {
    /// Stage shown by the column.
    pub stage: String,
    /// Tasks in the column, in fetch order.
    pub tasks: Vec<TaskResponse>,
}

impl From<&BoardColumn> for ColumnResponse {
    fn from(column: &BoardColumn) -> Self {
        Self {
            stage: column.stage().to_string(),
            tasks: column.tasks().iter().map(TaskResponse::from).collect(),
        }
    }
}

/// Response of `GET /api/projects/{id}/board`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardResponse {
    /// Project the board belongs to.
    pub project_id: ProjectId,
    /// Stage names in column order.
    pub stages: Vec<String>,
    /// Columns in stage order.
    pub columns: Vec<ColumnResponse>,
    /// Tasks whose status matches no stage.
    pub orphaned: Vec<TaskResponse>,
}

impl From<ProjectBoard> for BoardResponse {
    fn from(loaded: ProjectBoard) -> Self {
        let (project, stages, board) = loaded.into_parts();
        Self {
            project_id: project.id(),
            stages: stages.to_strings(),
            columns: board.columns().iter().map(ColumnResponse::from).collect(),
            orphaned: board.orphaned().iter().map(TaskResponse::from).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Users and feed
// ---------------------------------------------------------------------------

/// User representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// User identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Role label.
    pub role: String,
    /// Avatar image URL, if any.
    pub avatar_url: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id(),
            name: user.name().to_owned(),
            email: user.email().to_owned(),
            role: user.role().to_owned(),
            avatar_url: user.avatar_url().map(str::to_owned),
        }
    }
}

/// Comment representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    /// Comment identifier.
    pub id: CommentId,
    /// Task commented on.
    pub task_id: TaskId,
    /// Author.
    pub user_id: UserId,
    /// Comment body.
    pub content: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id(),
            task_id: comment.task_id(),
            user_id: comment.user_id(),
            content: comment.content().to_owned(),
            created_at: comment.created_at(),
        }
    }
}

/// Activity log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResponse {
    /// Entry identifier.
    pub id: ActivityId,
    /// `task` or `project`.
    pub entity_type: String,
    /// Identifier of the entity acted on.
    pub entity_id: Uuid,
    /// Acting user.
    pub user_id: UserId,
    /// What happened, e.g. `moved`.
    pub action: String,
    /// Free-form details.
    pub details: Option<String>,
    /// When it happened.
    pub created_at: DateTime<Utc>,
}

impl From<Activity> for ActivityResponse {
    fn from(activity: Activity) -> Self {
        Self {
            id: activity.id(),
            entity_type: activity.entity_kind().as_str().to_owned(),
            entity_id: activity.entity_id(),
            user_id: activity.user_id(),
            action: activity.action().to_owned(),
            details: activity.details().map(str::to_owned),
            created_at: activity.created_at(),
        }
    }
}
