//! JSON API round trips against a live in-memory server.

use std::sync::Arc;

use super::helpers::{DELIVERY, TestServer, expect_json, state};
use reqwest::StatusCode;
use rstest::rstest;
use serde_json::{Value, json};
use taskboard::http::dto::{BoardResponse, ProjectResponse, StagesResponse, TaskResponse, WorkflowResponse};
use taskboard::http::{AppState, InMemoryBackend};
use uuid::Uuid;

struct Seeded {
    server: TestServer,
    workflow: WorkflowResponse,
    project: ProjectResponse,
}

async fn seed(state: Arc<AppState<InMemoryBackend>>) -> Result<Seeded, eyre::Report> {
    let server = TestServer::start(state).await?;
    let workflow: WorkflowResponse = expect_json(
        server
            .post(
                "/api/workflows",
                &json!({ "name": "Delivery", "steps": DELIVERY }),
            )
            .await?,
        StatusCode::CREATED,
    )
    .await?;
    let project: ProjectResponse = expect_json(
        server
            .post(
                "/api/projects",
                &json!({
                    "workspaceId": Uuid::new_v4(),
                    "name": "Apollo",
                    "workflowId": workflow.id,
                }),
            )
            .await?,
        StatusCode::CREATED,
    )
    .await?;
    Ok(Seeded {
        server,
        workflow,
        project,
    })
}

async fn create_task(
    seeded: &Seeded,
    title: &str,
    status: &str,
) -> Result<TaskResponse, eyre::Report> {
    expect_json(
        seeded
            .server
            .post(
                "/api/tasks",
                &json!({ "projectId": seeded.project.id, "title": title, "status": status }),
            )
            .await?,
        StatusCode::CREATED,
    )
    .await
}

fn column_titles(board: &BoardResponse, stage: &str) -> Vec<String> {
    board
        .columns
        .iter()
        .find(|column| column.stage == stage)
        .map(|column| column.tasks.iter().map(|task| task.title.clone()).collect())
        .unwrap_or_default()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn moving_a_task_moves_its_card_on_the_board(
    state: Arc<AppState<InMemoryBackend>>,
) -> Result<(), eyre::Report> {
    let seeded = seed(state).await?;
    let task = create_task(&seeded, "Write release notes", "Manager").await?;

    let path = format!("/api/projects/{}/board", seeded.project.id);
    let before: BoardResponse = expect_json(seeded.server.get(&path).await?, StatusCode::OK).await?;
    eyre::ensure!(before.stages == DELIVERY, "unexpected stages {:?}", before.stages);
    eyre::ensure!(column_titles(&before, "Manager") == ["Write release notes"]);

    let moved: TaskResponse = expect_json(
        seeded
            .server
            .post(
                &format!("/api/tasks/{}/move", task.id),
                &json!({ "stage": "Tester" }),
            )
            .await?,
        StatusCode::OK,
    )
    .await?;
    eyre::ensure!(moved.status == "Tester", "task moved to {}", moved.status);

    let after: BoardResponse = expect_json(seeded.server.get(&path).await?, StatusCode::OK).await?;
    eyre::ensure!(column_titles(&after, "Manager").is_empty());
    eyre::ensure!(column_titles(&after, "Tester") == ["Write release notes"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn creating_a_task_outside_the_board_names_the_status_field(
    state: Arc<AppState<InMemoryBackend>>,
) -> Result<(), eyre::Report> {
    let seeded = seed(state).await?;

    let error: Value = expect_json(
        seeded
            .server
            .post(
                "/api/tasks",
                &json!({ "projectId": seeded.project.id, "title": "Ship", "status": "Done" }),
            )
            .await?,
        StatusCode::BAD_REQUEST,
    )
    .await?;

    eyre::ensure!(error["field"] == "status", "unexpected error body {error}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn overlong_task_title_names_the_title_field(
    state: Arc<AppState<InMemoryBackend>>,
) -> Result<(), eyre::Report> {
    let seeded = seed(state).await?;

    let error: Value = expect_json(
        seeded
            .server
            .post(
                "/api/tasks",
                &json!({ "projectId": seeded.project.id, "title": "t".repeat(300) }),
            )
            .await?,
        StatusCode::BAD_REQUEST,
    )
    .await?;

    eyre::ensure!(error["field"] == "title", "unexpected error body {error}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn moving_to_a_stage_outside_the_board_is_rejected(
    state: Arc<AppState<InMemoryBackend>>,
) -> Result<(), eyre::Report> {
    let seeded = seed(state).await?;
    let task = create_task(&seeded, "Ship", "Developer").await?;

    let error: Value = expect_json(
        seeded
            .server
            .post(
                &format!("/api/tasks/{}/move", task.id),
                &json!({ "stage": "Done" }),
            )
            .await?,
        StatusCode::BAD_REQUEST,
    )
    .await?;
    eyre::ensure!(error["field"] == "stage", "unexpected error body {error}");

    let stored: TaskResponse = expect_json(
        seeded.server.get(&format!("/api/tasks/{}", task.id)).await?,
        StatusCode::OK,
    )
    .await?;
    eyre::ensure!(stored.status == "Developer", "task moved to {}", stored.status);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_without_status_starts_in_the_first_stage(
    state: Arc<AppState<InMemoryBackend>>,
) -> Result<(), eyre::Report> {
    let seeded = seed(state).await?;

    let task: TaskResponse = expect_json(
        seeded
            .server
            .post(
                "/api/tasks",
                &json!({ "projectId": seeded.project.id, "title": "Triage" }),
            )
            .await?,
        StatusCode::CREATED,
    )
    .await?;

    eyre::ensure!(task.status == "Manager", "task created in {}", task.status);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unbound_project_reports_the_default_stages(
    state: Arc<AppState<InMemoryBackend>>,
) -> Result<(), eyre::Report> {
    let server = TestServer::start(state).await?;
    let project: ProjectResponse = expect_json(
        server
            .post(
                "/api/projects",
                &json!({ "workspaceId": Uuid::new_v4(), "name": "Gemini" }),
            )
            .await?,
        StatusCode::CREATED,
    )
    .await?;

    let stages: StagesResponse = expect_json(
        server
            .get(&format!("/api/projects/{}/stages", project.id))
            .await?,
        StatusCode::OK,
    )
    .await?;

    eyre::ensure!(
        stages.stages == ["To Do", "In Progress", "Done"],
        "unexpected default stages {:?}",
        stages.stages
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn workflow_in_use_cannot_be_deleted_until_unbound(
    state: Arc<AppState<InMemoryBackend>>,
) -> Result<(), eyre::Report> {
    let seeded = seed(state).await?;
    let workflow_path = format!("/api/workflows/{}", seeded.workflow.id);

    let refused = seeded.server.delete(&workflow_path).await?;
    eyre::ensure!(
        refused.status() == StatusCode::CONFLICT,
        "expected 409, got {}",
        refused.status()
    );

    let unbound: ProjectResponse = expect_json(
        seeded
            .server
            .put(
                &format!("/api/projects/{}/workflow", seeded.project.id),
                &json!({ "workflowId": null }),
            )
            .await?,
        StatusCode::OK,
    )
    .await?;
    eyre::ensure!(unbound.workflow_id.is_none(), "project still bound");

    let deleted = seeded.server.delete(&workflow_path).await?;
    eyre::ensure!(
        deleted.status() == StatusCode::NO_CONTENT,
        "expected 204, got {}",
        deleted.status()
    );
    let missing = seeded.server.get(&workflow_path).await?;
    eyre::ensure!(missing.status() == StatusCode::NOT_FOUND);
    Ok(())
}

#[rstest]
#[case::task(format!("/api/tasks/{}", Uuid::new_v4()))]
#[case::project_board(format!("/api/projects/{}/board", Uuid::new_v4()))]
#[case::workflow(format!("/api/workflows/{}", Uuid::new_v4()))]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_resources_return_not_found(
    state: Arc<AppState<InMemoryBackend>>,
    #[case] path: String,
) -> Result<(), eyre::Report> {
    let server = TestServer::start(state).await?;

    let error: Value = expect_json(server.get(&path).await?, StatusCode::NOT_FOUND).await?;

    eyre::ensure!(error["message"].is_string(), "unexpected error body {error}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_json_is_a_bad_request(
    state: Arc<AppState<InMemoryBackend>>,
) -> Result<(), eyre::Report> {
    let server = TestServer::start(state).await?;

    let response = server
        .client()
        .post(server.url("/api/workflows"))
        .header("content-type", "application/json")
        .body("{\"name\": ")
        .send()
        .await?;

    eyre::ensure!(
        response.status() == StatusCode::BAD_REQUEST,
        "expected 400, got {}",
        response.status()
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn updating_a_task_clears_nullable_fields(
    state: Arc<AppState<InMemoryBackend>>,
) -> Result<(), eyre::Report> {
    let seeded = seed(state).await?;
    let created: TaskResponse = expect_json(
        seeded
            .server
            .post(
                "/api/tasks",
                &json!({
                    "projectId": seeded.project.id,
                    "title": "Draft",
                    "description": "first pass",
                    "priority": "high",
                }),
            )
            .await?,
        StatusCode::CREATED,
    )
    .await?;

    let updated: TaskResponse = expect_json(
        seeded
            .server
            .put(
                &format!("/api/tasks/{}", created.id),
                &json!({ "description": null, "status": "Developer" }),
            )
            .await?,
        StatusCode::OK,
    )
    .await?;

    eyre::ensure!(updated.description.is_none(), "description not cleared");
    eyre::ensure!(updated.status == "Developer", "status is {}", updated.status);
    eyre::ensure!(updated.title == "Draft", "title changed to {}", updated.title);
    Ok(())
}

#[rstest]
#[case::task_path("/api/tasks/not-a-uuid", "id")]
#[case::board_path("/api/projects/42/board", "id")]
#[case::task_query("/api/tasks?projectId=not-a-uuid", "projectId")]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_identifiers_return_json_errors(
    state: Arc<AppState<InMemoryBackend>>,
    #[case] path: &str,
    #[case] field: &str,
) -> Result<(), eyre::Report> {
    let server = TestServer::start(state).await?;

    let error: Value = expect_json(server.get(path).await?, StatusCode::BAD_REQUEST).await?;

    eyre::ensure!(error["field"] == field, "unexpected error body {error}");
    eyre::ensure!(error["message"].is_string(), "unexpected error body {error}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_tasks_of_an_unknown_project_is_empty(
    state: Arc<AppState<InMemoryBackend>>,
) -> Result<(), eyre::Report> {
    let seeded = seed(state).await?;
    create_task(&seeded, "Ship", "Manager").await?;

    let tasks: Vec<TaskResponse> = expect_json(
        seeded
            .server
            .get(&format!("/api/tasks?projectId={}", Uuid::new_v4()))
            .await?,
        StatusCode::OK,
    )
    .await?;

    eyre::ensure!(tasks.is_empty(), "expected no tasks, found {}", tasks.len());
    Ok(())
}
