//! Adapter implementations for the workflow repository port.

pub mod memory;
pub mod postgres;
