//! Adapter implementations for the feed repository ports.

pub mod memory;
pub mod postgres;
