//! Given steps for board move BDD scenarios.

use super::world::{BoardWorld, run_async, stage_names};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest_bdd_macros::given;
use taskboard::project::{domain::WorkspaceId, services::CreateProjectRequest};
use taskboard::board::services::BoardSession;
use taskboard::task::{domain::Task, ports::TaskRepository, services::CreateTaskRequest};
use taskboard::workflow::{domain::StageName, services::CreateWorkflowRequest};
use uuid::Uuid;

#[given(r#"a workflow with stages "{stages}""#)]
fn workflow_with_stages(world: &mut BoardWorld, stages: String) -> Result<(), eyre::Report> {
    let request = CreateWorkflowRequest::new("Delivery", stage_names(&stages));
    let created = run_async(world.state.workflows().create(request))
        .wrap_err("create workflow for board scenario")?;
    world.workflow = Some(created);
    Ok(())
}

#[given("a project bound to that workflow")]
fn project_bound_to_workflow(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let workflow_id = world
        .workflow
        .as_ref()
        .map(|workflow| workflow.id())
        .ok_or_else(|| eyre::eyre!("missing workflow in scenario world"))?;
    let request = CreateProjectRequest::new(WorkspaceId::from_uuid(Uuid::new_v4()), "Apollo")
        .with_workflow(workflow_id);
    let created = run_async(world.state.projects().create(request))
        .wrap_err("create bound project")?;
    world.project = Some(created);
    Ok(())
}

#[given("a project without a workflow")]
fn project_without_workflow(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let request = CreateProjectRequest::new(WorkspaceId::from_uuid(Uuid::new_v4()), "Gemini");
    let created = run_async(world.state.projects().create(request))
        .wrap_err("create unbound project")?;
    world.project = Some(created);
    Ok(())
}

#[given(r#"a task "{title}" in stage "{stage}""#)]
fn task_in_stage(world: &mut BoardWorld, title: String, stage: String) -> Result<(), eyre::Report> {
    let project_id = world.project()?.id();
    let request = CreateTaskRequest::new(project_id, title.clone()).with_status(stage);
    let created = run_async(world.state.tasks().create(request))
        .wrap_err("create task through the stage guard")?;
    world.task_ids.insert(title, created.id());
    Ok(())
}

#[given(r#"a legacy task "{title}" with status "{status}""#)]
fn legacy_task(world: &mut BoardWorld, title: String, status: String) -> Result<(), eyre::Report> {
    let project_id = world.project()?.id();
    let task = Task::new(project_id, title.clone(), StageName::new(status)?, &DefaultClock)?;
    run_async(world.tasks.store(&task)).wrap_err("store legacy task directly")?;
    world.task_ids.insert(title, task.id());
    Ok(())
}

#[given("the board is open on the client")]
fn board_open_on_client(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let project_id = world.project()?.id();
    let loaded = run_async(world.state.board().load_board(project_id))
        .wrap_err("load board for client session")?;
    world.session = Some(BoardSession::from_board(loaded));
    Ok(())
}
