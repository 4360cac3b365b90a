//! Stage resolution for a project's board.

use crate::project::domain::Project;
use crate::workflow::domain::{StageList, Workflow};

/// Returns the bound workflow's stages, or `fallback` when none is bound.
#[must_use]
pub fn list_available_stages<'a>(
    workflow: Option<&'a Workflow>,
    fallback: &'a StageList,
) -> &'a StageList {
    workflow.map_or(fallback, Workflow::steps)
}

/// Resolves the stage list shown on `project`'s board.
///
/// `workflow` is only used when it is the workflow the project is bound to;
/// an unbound project, or a mismatched workflow, resolves to `fallback`.
#[must_use]
pub fn resolve_stages<'a>(
    project: &Project,
    workflow: Option<&'a Workflow>,
    fallback: &'a StageList,
) -> &'a StageList {
    let bound = workflow.filter(|candidate| project.workflow_id() == Some(candidate.id()));
    list_available_stages(bound, fallback)
}

/// Returns `true` when `stage` is a column on `project`'s board.
#[must_use]
pub fn is_valid_stage_for_project(
    project: &Project,
    workflow: Option<&Workflow>,
    fallback: &StageList,
    stage: &str,
) -> bool {
    resolve_stages(project, workflow, fallback).contains(stage)
}
