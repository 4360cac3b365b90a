//! Taskboard: workflow-driven project and task board.
//!
//! Projects optionally bind to a workflow, an ordered list of stages. The
//! board shows one column per stage and places each task in the column
//! matching its `status`. Moving a card changes only the task's status and
//! is checked against the project's stages.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`workflow`]: Named, ordered stage lists
//! - [`project`]: Projects and their workflow binding
//! - [`task`]: Tasks and stage-guarded task writes
//! - [`user`]: People tasks are assigned to
//! - [`feed`]: Task comments and the activity log
//! - [`board`]: Column derivation, stage checks and optimistic moves
//! - [`http`]: JSON API over the services
//! - [`config`]: Layered server configuration

pub mod board;
pub mod config;
pub mod feed;
pub mod http;
pub mod persistence;
pub mod project;
pub mod task;
pub mod user;
pub mod workflow;
