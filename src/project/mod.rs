//! Projects and their workflow binding.
//!
//! A project owns its tasks and optionally references one workflow. When no
//! workflow is bound, the board falls back to the configured default stage
//! list.
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
