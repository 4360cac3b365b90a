//! In-memory integration tests for rebinding projects between workflows.

use super::helpers::{DELIVERY, state};
use std::sync::Arc;

use rstest::rstest;
use taskboard::board::services::MoveTaskRequest;
use taskboard::http::{AppState, InMemoryBackend};
use taskboard::project::{domain::WorkspaceId, services::CreateProjectRequest};
use taskboard::task::services::CreateTaskRequest;
use taskboard::workflow::services::CreateWorkflowRequest;
use uuid::Uuid;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rebinding_orphans_tasks_until_they_are_moved(
    state: Arc<AppState<InMemoryBackend>>,
) -> Result<(), eyre::Report> {
    let delivery = state
        .workflows()
        .create(CreateWorkflowRequest::new("Delivery", DELIVERY))
        .await?;
    let review = state
        .workflows()
        .create(CreateWorkflowRequest::new("Review", ["Draft", "Reviewed"]))
        .await?;
    let project = state
        .projects()
        .create(
            CreateProjectRequest::new(WorkspaceId::from_uuid(Uuid::new_v4()), "Apollo")
                .with_workflow(delivery.id()),
        )
        .await?;
    let task = state
        .tasks()
        .create(CreateTaskRequest::new(project.id(), "Design review").with_status("Tester"))
        .await?;

    state
        .projects()
        .assign_workflow(project.id(), Some(review.id()))
        .await?;
    let rebound = state.board().load_board(project.id()).await?;
    eyre::ensure!(
        rebound.stages().to_strings() == ["Draft", "Reviewed"],
        "board still uses old stages"
    );
    eyre::ensure!(rebound.board().shown_count() == 0, "orphan shown in a column");
    eyre::ensure!(
        rebound.board().orphaned().iter().any(|orphan| orphan.id() == task.id()),
        "task not reported as orphaned"
    );

    state
        .board()
        .move_task(MoveTaskRequest::new(task.id(), "Draft"))
        .await?;
    let recovered = state.board().load_board(project.id()).await?;
    let draft = recovered
        .board()
        .column("Draft")
        .ok_or_else(|| eyre::eyre!("missing Draft column"))?;
    eyre::ensure!(draft.tasks().len() == 1, "task not back on the board");
    eyre::ensure!(recovered.board().orphaned().is_empty(), "orphan remains");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_listing_is_scoped_to_the_project(
    state: Arc<AppState<InMemoryBackend>>,
) -> Result<(), eyre::Report> {
    let workspace = WorkspaceId::from_uuid(Uuid::new_v4());
    let apollo = state
        .projects()
        .create(CreateProjectRequest::new(workspace, "Apollo"))
        .await?;
    let gemini = state
        .projects()
        .create(CreateProjectRequest::new(workspace, "Gemini"))
        .await?;
    state
        .tasks()
        .create(CreateTaskRequest::new(apollo.id(), "Launch"))
        .await?;
    state
        .tasks()
        .create(CreateTaskRequest::new(gemini.id(), "Dock"))
        .await?;

    let scoped = state.tasks().list(Some(apollo.id())).await?;
    let everything = state.tasks().list(None).await?;

    eyre::ensure!(scoped.len() == 1, "expected one Apollo task, found {}", scoped.len());
    eyre::ensure!(
        scoped.iter().all(|task| task.project_id() == apollo.id()),
        "listing leaked another project's task"
    );
    eyre::ensure!(everything.len() == 2, "expected two tasks, found {}", everything.len());
    Ok(())
}
