//! Then steps for board move BDD scenarios.

use super::world::{BoardWorld, run_async, stage_names};
use rstest_bdd_macros::then;
use taskboard::board::domain::Board;
use taskboard::board::services::{BoardError, BoardSessionError};
use taskboard::task::ports::TaskRepository;

fn loaded_board(world: &BoardWorld) -> Result<&Board, eyre::Report> {
    world
        .loaded
        .as_ref()
        .map(|loaded| loaded.board())
        .ok_or_else(|| eyre::eyre!("board has not been loaded"))
}

fn column_titles(board: &Board, stage: &str) -> Result<Vec<String>, eyre::Report> {
    let column = board
        .column(stage)
        .ok_or_else(|| eyre::eyre!("board has no column {stage}"))?;
    Ok(column
        .tasks()
        .iter()
        .map(|task| task.title().to_owned())
        .collect())
}

#[then("the board has {count:usize} columns")]
fn board_has_columns(world: &BoardWorld, count: usize) -> Result<(), eyre::Report> {
    let board = loaded_board(world)?;
    if board.columns().len() != count {
        return Err(eyre::eyre!(
            "expected {count} columns, found {}",
            board.columns().len()
        ));
    }
    Ok(())
}

#[then(r#"column "{stage}" holds "{title}""#)]
fn column_holds(world: &BoardWorld, stage: String, title: String) -> Result<(), eyre::Report> {
    let titles = column_titles(loaded_board(world)?, &stage)?;
    if titles != [title.as_str()] {
        return Err(eyre::eyre!("expected column {stage} to hold [{title}], found {titles:?}"));
    }
    Ok(())
}

#[then(r#"column "{stage}" is empty"#)]
fn column_is_empty(world: &BoardWorld, stage: String) -> Result<(), eyre::Report> {
    let titles = column_titles(loaded_board(world)?, &stage)?;
    if !titles.is_empty() {
        return Err(eyre::eyre!("expected column {stage} to be empty, found {titles:?}"));
    }
    Ok(())
}

#[then(r#"task "{title}" is orphaned"#)]
fn task_is_orphaned(world: &BoardWorld, title: String) -> Result<(), eyre::Report> {
    let board = loaded_board(world)?;
    let orphaned = board.orphaned().iter().any(|task| task.title() == title);
    let shown = board
        .columns()
        .iter()
        .any(|column| column.tasks().iter().any(|task| task.title() == title));
    if !orphaned || shown {
        return Err(eyre::eyre!("expected task {title} to be orphaned and hidden"));
    }
    Ok(())
}

#[then(r#"the board stages are "{stages}""#)]
fn board_stages_are(world: &BoardWorld, stages: String) -> Result<(), eyre::Report> {
    let loaded = world
        .loaded
        .as_ref()
        .ok_or_else(|| eyre::eyre!("board has not been loaded"))?;
    let expected = stage_names(&stages);
    if loaded.stages().to_strings() != expected {
        return Err(eyre::eyre!(
            "expected stages {expected:?}, found {:?}",
            loaded.stages().to_strings()
        ));
    }
    Ok(())
}

#[then("the move is rejected as an invalid stage")]
fn move_rejected_as_invalid_stage(world: &BoardWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_move
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing move result"))?;
    if !matches!(result, Err(BoardError::InvalidStage { .. })) {
        return Err(eyre::eyre!("expected InvalidStage error, got {result:?}"));
    }
    Ok(())
}

#[then(r#"task "{title}" is still in "{stage}""#)]
fn task_still_in_stage(world: &BoardWorld, title: String, stage: String) -> Result<(), eyre::Report> {
    let task_id = world.task_id(&title)?;
    let stored = run_async(world.tasks.find_by_id(task_id))?
        .ok_or_else(|| eyre::eyre!("task {title} missing from store"))?;
    if stored.status().as_str() != stage {
        return Err(eyre::eyre!(
            "expected task {title} in {stage}, found {}",
            stored.status()
        ));
    }
    Ok(())
}

#[then(r#"the client board shows task "{title}" in "{stage}""#)]
fn client_board_shows_task(
    world: &BoardWorld,
    title: String,
    stage: String,
) -> Result<(), eyre::Report> {
    let session = world
        .session
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing client session"))?;
    let titles = column_titles(&session.columns(), &stage)?;
    if !titles.contains(&title) {
        return Err(eyre::eyre!("expected {title} in client column {stage}, found {titles:?}"));
    }
    Ok(())
}

#[then(r#"a move failure is reported for task "{title}""#)]
fn move_failure_reported(world: &BoardWorld, title: String) -> Result<(), eyre::Report> {
    let task_id = world.task_id(&title)?;
    let result = world
        .last_session_move
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing client move result"))?;
    let Err(BoardSessionError::MoveFailed(failure)) = result else {
        return Err(eyre::eyre!("expected MoveFailed error, got {result:?}"));
    };
    let recorded = world
        .session
        .as_ref()
        .map(|session| session.failures().to_vec())
        .unwrap_or_default();
    if failure.task_id() != task_id || recorded != [failure.clone()] {
        return Err(eyre::eyre!("failure not recorded for task {title}: {recorded:?}"));
    }
    Ok(())
}
