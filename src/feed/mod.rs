//! Task comments and the activity log.
//!
//! Both are append-only records. The API only reads them; the board never
//! writes either, so a move produces no activity entry.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Read services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
