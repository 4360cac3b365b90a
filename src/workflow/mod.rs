//! Workflow definitions for the task board.
//!
//! A workflow is a named, ordered list of stages. Projects reference a
//! workflow to decide which columns their board shows and which `status`
//! values their tasks may carry. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
