//! Users, current user, comments and the activity log over HTTP.

use std::sync::Arc;

use super::helpers::{TestServer, expect_json, state};
use mockable::DefaultClock;
use reqwest::StatusCode;
use rstest::rstest;
use serde_json::Value;
use taskboard::feed::{
    domain::{Activity, Comment, EntityKind},
    ports::{ActivityRepository, CommentRepository},
};
use taskboard::http::dto::{ActivityResponse, CommentResponse, UserResponse};
use taskboard::http::{AppState, InMemoryBackend, Stores};
use taskboard::task::domain::TaskId;
use taskboard::user::{
    domain::{User, UserId},
    ports::UserRepository,
};
use taskboard::workflow::domain::StageList;
use uuid::Uuid;

/// Who `GET /api/me` should report.
#[derive(Debug, Clone, Copy)]
enum Acting {
    Unconfigured,
    Grace,
    Stranger,
}

struct Directory {
    server: TestServer,
    ada: User,
    grace: User,
    task_id: TaskId,
}

async fn directory(acting: Acting) -> Result<Directory, eyre::Report> {
    let clock = DefaultClock;
    let stores = Stores::in_memory();
    let ada = User::new("Ada Lovelace", "ada@example.com", "admin")?
        .with_avatar_url("https://example.com/ada.png");
    let grace = User::new("Grace Hopper", "grace@example.com", "member")?;
    stores.users.store(&ada).await?;
    stores.users.store(&grace).await?;

    let task_id = TaskId::new();
    let first = Comment::new(task_id, ada.id(), "Needs a design review", &clock)?;
    let second = Comment::new(task_id, grace.id(), "Reviewed, looks good", &clock)?;
    let elsewhere = Comment::new(TaskId::new(), grace.id(), "Unrelated", &clock)?;
    for comment in [&first, &second, &elsewhere] {
        stores.comments.store(comment).await?;
    }

    let moved = Activity::new(
        EntityKind::Task,
        task_id.into_inner(),
        ada.id(),
        "moved",
        &clock,
    )?
    .with_details("Manager -> Developer");
    let created = Activity::new(
        EntityKind::Project,
        Uuid::new_v4(),
        grace.id(),
        "created",
        &clock,
    )?;
    stores.activities.store(&moved).await?;
    stores.activities.store(&created).await?;

    let current = match acting {
        Acting::Unconfigured => None,
        Acting::Grace => Some(grace.id()),
        Acting::Stranger => Some(UserId::new()),
    };
    let state = AppState::new(stores, StageList::default_board(), current);
    let server = TestServer::start(Arc::new(state)).await?;
    Ok(Directory {
        server,
        ada,
        grace,
        task_id,
    })
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn users_are_listed_in_registration_order() -> Result<(), eyre::Report> {
    let dir = directory(Acting::Unconfigured).await?;

    let users: Vec<UserResponse> =
        expect_json(dir.server.get("/api/users").await?, StatusCode::OK).await?;

    let ids: Vec<UserId> = users.iter().map(|user| user.id).collect();
    eyre::ensure!(
        ids == [dir.ada.id(), dir.grace.id()],
        "unexpected order {ids:?}"
    );
    let ada = users
        .first()
        .ok_or_else(|| eyre::eyre!("no users returned"))?;
    eyre::ensure!(ada.email == "ada@example.com", "unexpected email {ada:?}");
    eyre::ensure!(
        ada.avatar_url.as_deref() == Some("https://example.com/ada.png"),
        "avatar missing from {ada:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn me_defaults_to_the_first_registered_user() -> Result<(), eyre::Report> {
    let dir = directory(Acting::Unconfigured).await?;

    let me: UserResponse = expect_json(dir.server.get("/api/me").await?, StatusCode::OK).await?;

    eyre::ensure!(me.id == dir.ada.id(), "expected Ada, got {me:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn me_reports_the_configured_user() -> Result<(), eyre::Report> {
    let dir = directory(Acting::Grace).await?;

    let me: UserResponse = expect_json(dir.server.get("/api/me").await?, StatusCode::OK).await?;

    eyre::ensure!(me.id == dir.grace.id(), "expected Grace, got {me:?}");
    eyre::ensure!(me.role == "member", "unexpected role {}", me.role);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn me_is_not_found_for_an_unknown_configured_user() -> Result<(), eyre::Report> {
    let dir = directory(Acting::Stranger).await?;

    let error: Value =
        expect_json(dir.server.get("/api/me").await?, StatusCode::NOT_FOUND).await?;

    eyre::ensure!(error["message"].is_string(), "unexpected error body {error}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn me_is_not_found_without_users(
    state: Arc<AppState<InMemoryBackend>>,
) -> Result<(), eyre::Report> {
    let server = TestServer::start(state).await?;

    let error: Value = expect_json(server.get("/api/me").await?, StatusCode::NOT_FOUND).await?;

    eyre::ensure!(error["message"].is_string(), "unexpected error body {error}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_comments_are_listed_oldest_first() -> Result<(), eyre::Report> {
    let dir = directory(Acting::Unconfigured).await?;

    let comments: Vec<CommentResponse> = expect_json(
        dir.server
            .get(&format!("/api/tasks/{}/comments", dir.task_id))
            .await?,
        StatusCode::OK,
    )
    .await?;

    let bodies: Vec<&str> = comments.iter().map(|c| c.content.as_str()).collect();
    eyre::ensure!(
        bodies == ["Needs a design review", "Reviewed, looks good"],
        "unexpected comments {bodies:?}"
    );
    eyre::ensure!(
        comments.iter().all(|c| c.task_id == dir.task_id),
        "comment from another task leaked"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn comments_of_an_unknown_task_are_empty() -> Result<(), eyre::Report> {
    let dir = directory(Acting::Unconfigured).await?;

    let comments: Vec<CommentResponse> = expect_json(
        dir.server
            .get(&format!("/api/tasks/{}/comments", Uuid::new_v4()))
            .await?,
        StatusCode::OK,
    )
    .await?;

    eyre::ensure!(comments.is_empty(), "expected no comments, got {comments:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_task_id_for_comments_is_a_bad_request() -> Result<(), eyre::Report> {
    let dir = directory(Acting::Unconfigured).await?;

    let error: Value = expect_json(
        dir.server.get("/api/tasks/seven/comments").await?,
        StatusCode::BAD_REQUEST,
    )
    .await?;

    eyre::ensure!(error["field"] == "id", "unexpected error body {error}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn activities_are_listed_in_recording_order() -> Result<(), eyre::Report> {
    let dir = directory(Acting::Unconfigured).await?;

    let activities: Vec<ActivityResponse> =
        expect_json(dir.server.get("/api/activities").await?, StatusCode::OK).await?;

    let summary: Vec<(&str, &str)> = activities
        .iter()
        .map(|a| (a.entity_type.as_str(), a.action.as_str()))
        .collect();
    eyre::ensure!(
        summary == [("task", "moved"), ("project", "created")],
        "unexpected activities {summary:?}"
    );
    let moved = activities
        .first()
        .ok_or_else(|| eyre::eyre!("no activities returned"))?;
    eyre::ensure!(
        moved.entity_id == dir.task_id.into_inner(),
        "moved entry names {}",
        moved.entity_id
    );
    eyre::ensure!(
        moved.details.as_deref() == Some("Manager -> Developer"),
        "unexpected details {:?}",
        moved.details
    );
    Ok(())
}
