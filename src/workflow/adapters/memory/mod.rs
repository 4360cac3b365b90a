//! In-memory workflow adapters.

mod workflow;

pub use workflow::InMemoryWorkflowRepository;
