//! Store, find, update and delete against the `PostgreSQL` adapters.

use crate::postgres::helpers::{StoreContext, clock, store_context};
use chrono::{TimeZone, Utc};
use mockable::DefaultClock;
use rstest::rstest;
use uuid::Uuid;
use taskboard::feed::{
    domain::{Activity, Comment, EntityKind},
    ports::{ActivityRepository, CommentRepository},
};
use taskboard::project::{
    domain::{Project, WorkspaceId},
    ports::ProjectRepository,
};
use taskboard::task::{
    domain::{Task, TaskId, TaskPatch, TaskPriority, TaskTags, UserId},
    ports::{TaskRepository, TaskRepositoryError},
};
use taskboard::user::{
    domain::User,
    ports::{UserRepository, UserRepositoryError},
};
use taskboard::workflow::{
    domain::{StageList, StageName, Workflow},
    ports::{WorkflowRepository, WorkflowRepositoryError},
};

const DELIVERY: [&str; 4] = ["Manager", "Developer", "Tester", "Deployed"];

fn delivery_workflow(clock: &DefaultClock) -> Workflow {
    let steps = StageList::new(DELIVERY).expect("valid stages");
    Workflow::new("Delivery", steps, clock).expect("valid workflow")
}

fn stored_project(context: &StoreContext, clock: &DefaultClock, workflow: &Workflow) -> Project {
    let project = Project::new(WorkspaceId::from_uuid(Uuid::new_v4()), "Apollo", clock)
        .expect("valid project")
        .with_workflow(workflow.id());
    context
        .block_on(context.stores.workflows.store(workflow))
        .expect("store workflow");
    context
        .block_on(context.stores.projects.store(&project))
        .expect("store project");
    project
}

fn stage(name: &str) -> StageName {
    StageName::new(name).expect("valid stage")
}

#[rstest]
fn workflow_steps_keep_their_order(clock: DefaultClock, store_context: StoreContext) {
    let context = store_context;
    let workflow = delivery_workflow(&clock).with_description("Release pipeline");

    context
        .block_on(context.stores.workflows.store(&workflow))
        .expect("store should succeed");
    let found = context
        .block_on(context.stores.workflows.find_by_id(workflow.id()))
        .expect("find should succeed")
        .expect("workflow should exist");

    assert_eq!(found.name(), "Delivery");
    assert_eq!(found.description(), Some("Release pipeline"));
    assert_eq!(found.steps().to_strings(), DELIVERY);

    context.cleanup();
}

#[rstest]
fn duplicate_workflow_is_rejected(clock: DefaultClock, store_context: StoreContext) {
    let context = store_context;
    let workflow = delivery_workflow(&clock);

    context
        .block_on(context.stores.workflows.store(&workflow))
        .expect("first store should succeed");
    let result = context.block_on(context.stores.workflows.store(&workflow));

    assert!(matches!(
        result,
        Err(WorkflowRepositoryError::DuplicateWorkflow(id)) if id == workflow.id()
    ));

    context.cleanup();
}

#[rstest]
fn referenced_workflow_cannot_be_deleted(clock: DefaultClock, store_context: StoreContext) {
    let context = store_context;
    let workflow = delivery_workflow(&clock);
    stored_project(&context, &clock, &workflow);

    let in_use = context
        .block_on(context.stores.projects.uses_workflow(workflow.id()))
        .expect("uses_workflow should succeed");
    let result = context.block_on(context.stores.workflows.delete(workflow.id()));

    assert!(in_use);
    assert!(matches!(
        result,
        Err(WorkflowRepositoryError::InUse(id)) if id == workflow.id()
    ));

    context.cleanup();
}

#[rstest]
fn unbound_workflow_can_be_deleted(clock: DefaultClock, store_context: StoreContext) {
    let context = store_context;
    let workflow = delivery_workflow(&clock);
    let mut project = stored_project(&context, &clock, &workflow);

    project.assign_workflow(None, &clock);
    context
        .block_on(context.stores.projects.update(&project))
        .expect("update should succeed");
    let in_use = context
        .block_on(context.stores.projects.uses_workflow(workflow.id()))
        .expect("uses_workflow should succeed");
    context
        .block_on(context.stores.workflows.delete(workflow.id()))
        .expect("delete should succeed");
    let found = context
        .block_on(context.stores.workflows.find_by_id(workflow.id()))
        .expect("find should succeed");

    assert!(!in_use);
    assert!(found.is_none());

    context.cleanup();
}

#[rstest]
fn task_round_trips_every_field(clock: DefaultClock, store_context: StoreContext) {
    let context = store_context;
    let project = stored_project(&context, &clock, &delivery_workflow(&clock));
    let due = Utc.with_ymd_and_hms(2026, 11, 1, 9, 0, 0).single().expect("valid date");
    let assignee = UserId::new();
    let task = Task::new(project.id(), "Ship login", stage("Tester"), &clock)
        .expect("valid task")
        .with_description("Behind the feature flag")
        .with_assignee(assignee)
        .with_priority(TaskPriority::High)
        .with_tags(TaskTags::new(["auth", "web"]).expect("valid tags"))
        .with_due_date(due);

    context
        .block_on(context.stores.tasks.store(&task))
        .expect("store should succeed");
    let found = context
        .block_on(context.stores.tasks.find_by_id(task.id()))
        .expect("find should succeed")
        .expect("task should exist");

    assert_eq!(found.project_id(), project.id());
    assert_eq!(found.title(), "Ship login");
    assert_eq!(found.description(), Some("Behind the feature flag"));
    assert_eq!(found.assignee_id(), Some(assignee));
    assert_eq!(found.status().as_str(), "Tester");
    assert_eq!(found.priority(), TaskPriority::High);
    assert_eq!(found.tags().iter().collect::<Vec<_>>(), ["auth", "web"]);
    assert_eq!(found.due_date(), Some(due));

    context.cleanup();
}

#[rstest]
fn cleared_task_fields_are_written_as_null(clock: DefaultClock, store_context: StoreContext) {
    let context = store_context;
    let project = stored_project(&context, &clock, &delivery_workflow(&clock));
    let due = Utc.with_ymd_and_hms(2026, 12, 24, 17, 0, 0).single().expect("valid date");
    let mut task = Task::new(project.id(), "Write notes", stage("Manager"), &clock)
        .expect("valid task")
        .with_description("Draft first")
        .with_assignee(UserId::new())
        .with_due_date(due);
    context
        .block_on(context.stores.tasks.store(&task))
        .expect("store should succeed");

    task.apply(
        TaskPatch {
            description: Some(None),
            assignee_id: Some(None),
            due_date: Some(None),
            ..TaskPatch::default()
        },
        &clock,
    )
    .expect("patch should apply");
    context
        .block_on(context.stores.tasks.update(&task))
        .expect("update should succeed");
    let found = context
        .block_on(context.stores.tasks.find_by_id(task.id()))
        .expect("find should succeed")
        .expect("task should exist");

    assert_eq!(found.description(), None);
    assert_eq!(found.assignee_id(), None);
    assert_eq!(found.due_date(), None);

    context.cleanup();
}

#[rstest]
fn missing_task_is_reported(clock: DefaultClock, store_context: StoreContext) {
    let context = store_context;
    let project = stored_project(&context, &clock, &delivery_workflow(&clock));
    let ghost = Task::new(project.id(), "Never stored", stage("Manager"), &clock)
        .expect("valid task");

    let found = context
        .block_on(context.stores.tasks.find_by_id(TaskId::new()))
        .expect("find should succeed");
    let updated = context.block_on(context.stores.tasks.update(&ghost));
    let deleted = context.block_on(context.stores.tasks.delete(ghost.id()));

    assert!(found.is_none());
    assert!(matches!(updated, Err(TaskRepositoryError::NotFound(id)) if id == ghost.id()));
    assert!(matches!(deleted, Err(TaskRepositoryError::NotFound(id)) if id == ghost.id()));

    context.cleanup();
}

#[rstest]
fn duplicate_user_email_is_rejected(store_context: StoreContext) {
    let context = store_context;
    let ada = User::new("Ada Lovelace", "ada@example.com", "admin").expect("valid user");
    let impostor = User::new("Ada L.", "ADA@example.com", "member").expect("valid user");

    context
        .block_on(context.stores.users.store(&ada))
        .expect("store should succeed");
    let result = context.block_on(context.stores.users.store(&impostor));
    let found = context
        .block_on(context.stores.users.find_by_id(ada.id()))
        .expect("find should succeed")
        .expect("user should exist");

    assert!(matches!(
        result,
        Err(UserRepositoryError::DuplicateEmail(email)) if email == "ada@example.com"
    ));
    assert_eq!(found.name(), "Ada Lovelace");

    context.cleanup();
}

#[rstest]
fn comments_and_activities_round_trip(clock: DefaultClock, store_context: StoreContext) {
    let context = store_context;
    let project = stored_project(&context, &clock, &delivery_workflow(&clock));
    let task = Task::new(project.id(), "Review copy", stage("Manager"), &clock)
        .expect("valid task");
    let author = User::new("Grace Hopper", "grace@example.com", "member").expect("valid user");
    context
        .block_on(context.stores.tasks.store(&task))
        .expect("store task");
    context
        .block_on(context.stores.users.store(&author))
        .expect("store user");

    let comment = Comment::new(task.id(), author.id(), "  Looks good  ", &clock)
        .expect("valid comment");
    let activity = Activity::new(
        EntityKind::Task,
        task.id().into_inner(),
        author.id(),
        "commented",
        &clock,
    )
    .expect("valid activity")
    .with_details("Review copy");
    context
        .block_on(context.stores.comments.store(&comment))
        .expect("store comment");
    context
        .block_on(context.stores.activities.store(&activity))
        .expect("store activity");

    let comments = context
        .block_on(context.stores.comments.list_by_task(task.id()))
        .expect("list comments");
    let activities = context
        .block_on(context.stores.activities.list_all())
        .expect("list activities");

    let [stored_comment] = comments.as_slice() else {
        panic!("expected one comment, got {comments:?}");
    };
    assert_eq!(stored_comment.id(), comment.id());
    assert_eq!(stored_comment.user_id(), author.id());
    assert_eq!(stored_comment.content(), "  Looks good  ");
    let [stored_activity] = activities.as_slice() else {
        panic!("expected one activity, got {activities:?}");
    };
    assert_eq!(stored_activity.entity_kind(), EntityKind::Task);
    assert_eq!(stored_activity.entity_id(), task.id().into_inner());
    assert_eq!(stored_activity.action(), "commented");
    assert_eq!(stored_activity.details(), Some("Review copy"));

    context.cleanup();
}

#[rstest]
fn deleting_a_task_removes_its_comments(clock: DefaultClock, store_context: StoreContext) {
    let context = store_context;
    let project = stored_project(&context, &clock, &delivery_workflow(&clock));
    let task = Task::new(project.id(), "Short lived", stage("Manager"), &clock)
        .expect("valid task");
    let author = User::new("Ada Lovelace", "ada@example.com", "admin").expect("valid user");
    context
        .block_on(context.stores.tasks.store(&task))
        .expect("store task");
    context
        .block_on(context.stores.users.store(&author))
        .expect("store user");
    let comment = Comment::new(task.id(), author.id(), "Soon gone", &clock).expect("valid comment");
    context
        .block_on(context.stores.comments.store(&comment))
        .expect("store comment");

    context
        .block_on(context.stores.tasks.delete(task.id()))
        .expect("delete should succeed");
    let comments = context
        .block_on(context.stores.comments.list_by_task(task.id()))
        .expect("list comments");

    assert!(comments.is_empty());

    context.cleanup();
}
