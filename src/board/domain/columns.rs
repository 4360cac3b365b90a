//! Column derivation for the board view.

use crate::task::domain::Task;
use crate::workflow::domain::{StageList, StageName};
use serde::Serialize;
use std::collections::HashMap;

/// A single board column: one stage and the tasks currently in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardColumn {
    stage: StageName,
    tasks: Vec<Task>,
}

impl BoardColumn {
    /// Returns the stage this column shows.
    #[must_use]
    pub const fn stage(&self) -> &StageName {
        &self.stage
    }

    /// Returns the tasks in this column, in fetch order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns `true` when the column has no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Column-grouped view of a project's tasks.
///
/// Tasks whose status matches no stage are kept aside in
/// [`Board::orphaned`] rather than placed in any column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    columns: Vec<BoardColumn>,
    orphaned: Vec<Task>,
}

impl Board {
    /// Returns the columns in stage order.
    #[must_use]
    pub fn columns(&self) -> &[BoardColumn] {
        &self.columns
    }

    /// Returns the column for `stage`, if the board has one.
    #[must_use]
    pub fn column(&self, stage: &str) -> Option<&BoardColumn> {
        self.columns.iter().find(|column| column.stage == stage)
    }

    /// Returns tasks whose status matches no stage, in fetch order.
    #[must_use]
    pub fn orphaned(&self) -> &[Task] {
        &self.orphaned
    }

    /// Returns the number of tasks placed in columns.
    #[must_use]
    pub fn shown_count(&self) -> usize {
        self.columns.iter().map(|column| column.tasks.len()).sum()
    }

    /// Consumes the board, returning columns and orphaned tasks.
    #[must_use]
    pub fn into_parts(self) -> (Vec<BoardColumn>, Vec<Task>) {
        (self.columns, self.orphaned)
    }
}

/// Groups `tasks` into one column per stage of `stages`.
///
/// Every stage gets a column, in list order, even when empty. Within a
/// column tasks keep the order in which they were supplied. A task whose
/// status is not a listed stage lands in [`Board::orphaned`] and in no
/// column.
#[must_use]
pub fn derive_columns<I>(stages: &StageList, tasks: I) -> Board
where
    I: IntoIterator<Item = Task>,
{
    let mut columns: Vec<BoardColumn> = stages
        .iter()
        .map(|stage| BoardColumn {
            stage: stage.clone(),
            tasks: Vec::new(),
        })
        .collect();
    let slots: HashMap<&str, usize> = stages
        .iter()
        .enumerate()
        .map(|(index, stage)| (stage.as_str(), index))
        .collect();

    let mut orphaned = Vec::new();
    for task in tasks {
        let slot = slots
            .get(task.status().as_str())
            .and_then(|index| columns.get_mut(*index));
        match slot {
            Some(column) => column.tasks.push(task),
            None => orphaned.push(task),
        }
    }

    Board { columns, orphaned }
}
