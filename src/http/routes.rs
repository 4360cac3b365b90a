//! Route table and request handlers.

use super::dto::{
    ActivityResponse, AssignWorkflowBody, BoardResponse, CommentResponse, CreateProjectBody,
    CreateTaskBody, CreateWorkflowBody, MoveTaskBody, ProjectResponse, StagesResponse,
    TaskListQuery, TaskResponse, UpdateTaskBody, UserResponse, WorkflowResponse,
};
use super::error::{ApiError, ApiResult};
use super::{AppState, Backend};
use crate::board::services::MoveTaskRequest;
use crate::project::{domain::ProjectId, services::CreateProjectRequest};
use crate::task::{
    domain::{TaskId, TaskPatch},
    services::CreateTaskRequest,
};
use crate::workflow::{domain::WorkflowId, services::CreateWorkflowRequest};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use std::sync::Arc;

type SharedState<B> = State<Arc<AppState<B>>>;
type Body<T> = Result<Json<T>, JsonRejection>;
type IdPath<T> = Result<Path<T>, PathRejection>;
type ListQuery<T> = Result<Query<T>, QueryRejection>;

/// Builds the board API router over `state`.
#[must_use]
pub fn router<B: Backend>(state: Arc<AppState<B>>) -> Router {
    Router::new()
        .route(
            "/api/workflows",
            get(list_workflows::<B>).post(create_workflow::<B>),
        )
        .route(
            "/api/workflows/{id}",
            get(get_workflow::<B>).delete(delete_workflow::<B>),
        )
        .route(
            "/api/projects",
            get(list_projects::<B>).post(create_project::<B>),
        )
        .route("/api/projects/{id}", get(get_project::<B>))
        .route("/api/projects/{id}/workflow", put(assign_workflow::<B>))
        .route("/api/projects/{id}/stages", get(project_stages::<B>))
        .route("/api/projects/{id}/board", get(project_board::<B>))
        .route("/api/tasks", get(list_tasks::<B>).post(create_task::<B>))
        .route(
            "/api/tasks/{id}",
            get(get_task::<B>)
                .put(update_task::<B>)
                .delete(delete_task::<B>),
        )
        .route("/api/tasks/{id}/move", post(move_task::<B>))
        .route("/api/tasks/{id}/comments", get(task_comments::<B>))
        .route("/api/users", get(list_users::<B>))
        .route("/api/me", get(current_user::<B>))
        .route("/api/activities", get(list_activities::<B>))
        .with_state(state)
}

fn body<T>(payload: Body<T>) -> ApiResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text(), None))
}

fn path_id<T>(path: IdPath<T>) -> ApiResult<T> {
    path.map(|Path(id)| id)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text(), Some("id")))
}

fn list_query<T>(query: ListQuery<T>) -> ApiResult<T> {
    query
        .map(|Query(value)| value)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text(), Some("projectId")))
}

// workflows

async fn list_workflows<B: Backend>(
    State(state): SharedState<B>,
) -> ApiResult<Json<Vec<WorkflowResponse>>> {
    let workflows = state.workflows().list().await?;
    Ok(Json(workflows.into_iter().map(Into::into).collect()))
}

async fn create_workflow<B: Backend>(
    State(state): SharedState<B>,
    payload: Body<CreateWorkflowBody>,
) -> ApiResult<(StatusCode, Json<WorkflowResponse>)> {
    let request: CreateWorkflowRequest = body(payload)?.into();
    let workflow = state.workflows().create(request).await?;
    Ok((StatusCode::CREATED, Json(workflow.into())))
}

async fn get_workflow<B: Backend>(
    State(state): SharedState<B>,
    id: IdPath<WorkflowId>,
) -> ApiResult<Json<WorkflowResponse>> {
    let id = path_id(id)?;
    let workflow = state.workflows().find_by_id(id).await?;
    Ok(Json(workflow.into()))
}

async fn delete_workflow<B: Backend>(
    State(state): SharedState<B>,
    id: IdPath<WorkflowId>,
) -> ApiResult<StatusCode> {
    let id = path_id(id)?;
    state.workflows().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// projects

async fn list_projects<B: Backend>(
    State(state): SharedState<B>,
) -> ApiResult<Json<Vec<ProjectResponse>>> {
    let projects = state.projects().list().await?;
    Ok(Json(projects.into_iter().map(Into::into).collect()))
}

async fn create_project<B: Backend>(
    State(state): SharedState<B>,
    payload: Body<CreateProjectBody>,
) -> ApiResult<(StatusCode, Json<ProjectResponse>)> {
    let request: CreateProjectRequest = body(payload)?.try_into()?;
    let project = state.projects().create(request).await?;
    Ok((StatusCode::CREATED, Json(project.into())))
}

async fn get_project<B: Backend>(
    State(state): SharedState<B>,
    id: IdPath<ProjectId>,
) -> ApiResult<Json<ProjectResponse>> {
    let id = path_id(id)?;
    let project = state.projects().find_by_id(id).await?;
    Ok(Json(project.into()))
}

async fn assign_workflow<B: Backend>(
    State(state): SharedState<B>,
    id: IdPath<ProjectId>,
    payload: Body<AssignWorkflowBody>,
) -> ApiResult<Json<ProjectResponse>> {
    let id = path_id(id)?;
    let AssignWorkflowBody { workflow_id } = body(payload)?;
    let project = state.projects().assign_workflow(id, workflow_id).await?;
    Ok(Json(project.into()))
}

async fn project_stages<B: Backend>(
    State(state): SharedState<B>,
    id: IdPath<ProjectId>,
) -> ApiResult<Json<StagesResponse>> {
    let id = path_id(id)?;
    let stages = state.board().available_stages(id).await?;
    Ok(Json(StagesResponse::new(id, &stages)))
}

async fn project_board<B: Backend>(
    State(state): SharedState<B>,
    id: IdPath<ProjectId>,
) -> ApiResult<Json<BoardResponse>> {
    let id = path_id(id)?;
    let loaded = state.board().load_board(id).await?;
    Ok(Json(loaded.into()))
}

// tasks

async fn list_tasks<B: Backend>(
    State(state): SharedState<B>,
    query: ListQuery<TaskListQuery>,
) -> ApiResult<Json<Vec<TaskResponse>>> {
    let query = list_query(query)?;
    let tasks = state.tasks().list(query.project_id).await?;
    Ok(Json(tasks.into_iter().map(Into::into).collect()))
}

async fn create_task<B: Backend>(
    State(state): SharedState<B>,
    payload: Body<CreateTaskBody>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    let request: CreateTaskRequest = body(payload)?.try_into()?;
    let task = state.tasks().create(request).await?;
    Ok((StatusCode::CREATED, Json(task.into())))
}

async fn get_task<B: Backend>(
    State(state): SharedState<B>,
    id: IdPath<TaskId>,
) -> ApiResult<Json<TaskResponse>> {
    let id = path_id(id)?;
    let task = state.tasks().find_by_id(id).await?;
    Ok(Json(task.into()))
}

async fn update_task<B: Backend>(
    State(state): SharedState<B>,
    id: IdPath<TaskId>,
    payload: Body<UpdateTaskBody>,
) -> ApiResult<Json<TaskResponse>> {
    let id = path_id(id)?;
    let patch = TaskPatch::try_from(body(payload)?)?;
    let task = state.tasks().update(id, patch).await?;
    Ok(Json(task.into()))
}

async fn delete_task<B: Backend>(
    State(state): SharedState<B>,
    id: IdPath<TaskId>,
) -> ApiResult<StatusCode> {
    let id = path_id(id)?;
    state.tasks().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn move_task<B: Backend>(
    State(state): SharedState<B>,
    id: IdPath<TaskId>,
    payload: Body<MoveTaskBody>,
) -> ApiResult<Json<TaskResponse>> {
    let id = path_id(id)?;
    let MoveTaskBody { stage } = body(payload)?;
    let task = state.board().move_task(MoveTaskRequest::new(id, stage)).await?;
    Ok(Json(task.into()))
}

async fn task_comments<B: Backend>(
    State(state): SharedState<B>,
    id: IdPath<TaskId>,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let id = path_id(id)?;
    let comments = state.feed().comments_for_task(id).await?;
    Ok(Json(comments.into_iter().map(Into::into).collect()))
}

// users and activity

async fn list_users<B: Backend>(
    State(state): SharedState<B>,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = state.users().list().await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

async fn current_user<B: Backend>(
    State(state): SharedState<B>,
) -> ApiResult<Json<UserResponse>> {
    let user = state.users().current().await?;
    Ok(Json(user.into()))
}

async fn list_activities<B: Backend>(
    State(state): SharedState<B>,
) -> ApiResult<Json<Vec<ActivityResponse>>> {
    let activities = state.feed().activities().await?;
    Ok(Json(activities.into_iter().map(Into::into).collect()))
}
