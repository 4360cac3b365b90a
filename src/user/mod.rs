//! People who can be assigned tasks.
//!
//! User records are read-only through the API: they are listed for
//! assignment pickers and one of them is reported as the current user.
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
