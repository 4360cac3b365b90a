//! Application services for workflow definitions.

mod catalog;

pub use catalog::{
    CreateWorkflowRequest, WorkflowCatalogService, WorkflowServiceError, WorkflowServiceResult,
};
