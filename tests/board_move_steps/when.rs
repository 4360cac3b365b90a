//! When steps for board move BDD scenarios.

use super::world::{BoardWorld, UnavailableGateway, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskboard::board::services::MoveTaskRequest;
use taskboard::workflow::domain::StageName;

#[when("the board is loaded")]
fn board_is_loaded(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let project_id = world.project()?.id();
    let loaded = run_async(world.state.board().load_board(project_id))
        .wrap_err("load board")?;
    world.loaded = Some(loaded);
    Ok(())
}

#[when(r#"task "{title}" is moved to "{stage}""#)]
fn task_is_moved(world: &mut BoardWorld, title: String, stage: String) -> Result<(), eyre::Report> {
    let task_id = world.task_id(&title)?;
    let result = run_async(
        world
            .state
            .board()
            .move_task(MoveTaskRequest::new(task_id, stage)),
    );
    world.last_move = Some(result);
    Ok(())
}

#[when(r#"task "{title}" is moved to "{stage}" while the store is unavailable"#)]
fn task_is_moved_while_unavailable(
    world: &mut BoardWorld,
    title: String,
    stage: String,
) -> Result<(), eyre::Report> {
    let task_id = world.task_id(&title)?;
    let target = StageName::new(stage)?;
    let session = world
        .session
        .as_mut()
        .ok_or_else(|| eyre::eyre!("missing client session in scenario world"))?;
    let result = run_async(session.move_task(&UnavailableGateway, task_id, &target));
    world.last_session_move = Some(result);
    Ok(())
}
