//! Workflow-driven task board.
//!
//! The board groups a project's tasks into one column per workflow stage,
//! decides which stages a task may occupy, and moves tasks between stages.
//! Two move paths exist:
//!
//! - [`services::BoardService::move_task`] validates and persists a move on
//!   the server side.
//! - [`services::BoardSession`] holds a client's local copy of the board,
//!   applies moves optimistically and reverts them when persistence fails.
//!
//! Column derivation and stage checks are pure functions in [`domain`].

pub mod domain;
pub mod ports;
pub mod services;
