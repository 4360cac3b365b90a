//! Listings come back in the order records were stored.

use crate::postgres::helpers::{StoreContext, clock, store_context};
use mockable::DefaultClock;
use rstest::rstest;
use uuid::Uuid;
use taskboard::feed::{domain::Comment, ports::CommentRepository};
use taskboard::project::{
    domain::{Project, ProjectId, WorkspaceId},
    ports::ProjectRepository,
};
use taskboard::task::{
    domain::{Task, TaskId, TaskPatch},
    ports::TaskRepository,
};
use taskboard::user::{domain::User, ports::UserRepository};
use taskboard::workflow::{
    domain::{StageList, StageName, Workflow},
    ports::WorkflowRepository,
};

fn stored_project(context: &StoreContext, clock: &DefaultClock, name: &str) -> Project {
    let project = Project::new(WorkspaceId::from_uuid(Uuid::new_v4()), name, clock).expect("valid project");
    context
        .block_on(context.stores.projects.store(&project))
        .expect("store project");
    project
}

fn store_tasks(
    context: &StoreContext,
    clock: &DefaultClock,
    project: &Project,
    titles: &[&str],
) -> Vec<Task> {
    let todo = StageName::new("To Do").expect("valid stage");
    titles
        .iter()
        .map(|title| {
            let task = Task::new(project.id(), *title, todo.clone(), clock).expect("valid task");
            context
                .block_on(context.stores.tasks.store(&task))
                .expect("store task");
            task
        })
        .collect()
}

fn titles(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(Task::title).collect()
}

#[rstest]
fn project_tasks_are_listed_in_insertion_order(clock: DefaultClock, store_context: StoreContext) {
    let context = store_context;
    let apollo = stored_project(&context, &clock, "Apollo");
    let gemini = stored_project(&context, &clock, "Gemini");
    store_tasks(&context, &clock, &apollo, &["Zulu", "Alpha"]);
    store_tasks(&context, &clock, &gemini, &["Mike"]);
    store_tasks(&context, &clock, &apollo, &["Bravo"]);

    let listed = context
        .block_on(context.stores.tasks.list_by_project(apollo.id()))
        .expect("list should succeed");
    let everything = context
        .block_on(context.stores.tasks.list_all())
        .expect("list should succeed");

    assert_eq!(titles(&listed), ["Zulu", "Alpha", "Bravo"]);
    assert_eq!(titles(&everything), ["Zulu", "Alpha", "Mike", "Bravo"]);

    context.cleanup();
}

#[rstest]
fn updates_do_not_reorder_tasks(clock: DefaultClock, store_context: StoreContext) {
    let context = store_context;
    let project = stored_project(&context, &clock, "Apollo");
    let mut tasks = store_tasks(&context, &clock, &project, &["First", "Second", "Third"]);
    let first = tasks.first_mut().expect("three tasks");

    first
        .apply(
            TaskPatch {
                status: Some(StageName::new("Done").expect("valid stage")),
                ..TaskPatch::default()
            },
            &clock,
        )
        .expect("patch should apply");
    context
        .block_on(context.stores.tasks.update(first))
        .expect("update should succeed");
    let listed = context
        .block_on(context.stores.tasks.list_by_project(project.id()))
        .expect("list should succeed");

    assert_eq!(titles(&listed), ["First", "Second", "Third"]);
    assert_eq!(listed.first().map(|task| task.status().as_str()), Some("Done"));

    context.cleanup();
}

#[rstest]
fn unknown_project_lists_no_tasks(clock: DefaultClock, store_context: StoreContext) {
    let context = store_context;
    let project = stored_project(&context, &clock, "Apollo");
    store_tasks(&context, &clock, &project, &["Only"]);

    let listed = context
        .block_on(context.stores.tasks.list_by_project(ProjectId::new()))
        .expect("list should succeed");

    assert!(listed.is_empty());

    context.cleanup();
}

#[rstest]
fn workflows_and_projects_are_listed_in_insertion_order(
    clock: DefaultClock,
    store_context: StoreContext,
) {
    let context = store_context;
    for name in ["Zeta", "Alpha", "Mu"] {
        let steps = StageList::new(["Open", "Closed"]).expect("valid stages");
        let workflow = Workflow::new(name, steps, &clock).expect("valid workflow");
        context
            .block_on(context.stores.workflows.store(&workflow))
            .expect("store workflow");
    }
    for name in ["Orion", "Apollo"] {
        stored_project(&context, &clock, name);
    }

    let workflows = context
        .block_on(context.stores.workflows.list_all())
        .expect("list workflows");
    let projects = context
        .block_on(context.stores.projects.list_all())
        .expect("list projects");

    let workflow_names: Vec<&str> = workflows.iter().map(Workflow::name).collect();
    let project_names: Vec<&str> = projects.iter().map(Project::name).collect();
    assert_eq!(workflow_names, ["Zeta", "Alpha", "Mu"]);
    assert_eq!(project_names, ["Orion", "Apollo"]);

    context.cleanup();
}

#[rstest]
fn users_and_comments_are_listed_in_insertion_order(
    clock: DefaultClock,
    store_context: StoreContext,
) {
    let context = store_context;
    let project = stored_project(&context, &clock, "Apollo");
    let tasks = store_tasks(&context, &clock, &project, &["Discuss"]);
    let task_id: TaskId = tasks.first().expect("one task").id();
    let mut authors = Vec::new();
    for (name, email) in [("Zoe", "zoe@example.com"), ("Abe", "abe@example.com")] {
        let user = User::new(name, email, "member").expect("valid user");
        context
            .block_on(context.stores.users.store(&user))
            .expect("store user");
        authors.push(user);
    }
    for (author, body) in authors.iter().cycle().zip(["third", "first", "second"]) {
        let comment = Comment::new(task_id, author.id(), body, &clock).expect("valid comment");
        context
            .block_on(context.stores.comments.store(&comment))
            .expect("store comment");
    }

    let users = context
        .block_on(context.stores.users.list_all())
        .expect("list users");
    let comments = context
        .block_on(context.stores.comments.list_by_task(task_id))
        .expect("list comments");

    let user_names: Vec<&str> = users.iter().map(User::name).collect();
    let bodies: Vec<&str> = comments.iter().map(Comment::content).collect();
    assert_eq!(user_names, ["Zoe", "Abe"]);
    assert_eq!(bodies, ["third", "first", "second"]);

    context.cleanup();
}
