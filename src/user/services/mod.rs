//! Read services for users.

mod directory;

pub use directory::{UserDirectory, UserServiceError, UserServiceResult};
