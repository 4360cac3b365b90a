//! Pure board logic: stage resolution and column derivation.

mod columns;
mod stages;

pub use columns::{Board, BoardColumn, derive_columns};
pub use stages::{is_valid_stage_for_project, list_available_stages, resolve_stages};
