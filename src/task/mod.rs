//! Task records and their stage-guarded lifecycle.
//!
//! Tasks belong to a project and carry a `status` naming one stage of that
//! project's board. Creation and updates go through
//! [`services::TaskService`], which rejects any status the project's board
//! does not show. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
