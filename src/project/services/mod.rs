//! Application services for projects.

mod projects;

pub use projects::{CreateProjectRequest, ProjectService, ProjectServiceError, ProjectServiceResult};
